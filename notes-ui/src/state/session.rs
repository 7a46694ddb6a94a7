//! Session persistence in `window.localStorage`
//!
//! The token and the JSON-encoded user live under separate keys. A session
//! is only restored when both are present and the user decodes.

use super::global::User;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Stored bearer token, if any
pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

/// User of a previously persisted session
pub fn restore() -> Option<User> {
    let raw = storage()?.get_item(USER_KEY).ok()?;
    session_user(token(), raw)
}

/// A session needs a non-empty token and a decodable user
fn session_user(token: Option<String>, raw_user: Option<String>) -> Option<User> {
    token.filter(|token| !token.is_empty())?;
    match serde_json::from_str(&raw_user?) {
        Ok(user) => Some(user),
        Err(e) => {
            web_sys::console::warn_1(&format!("Discarding stored user: {}", e).into());
            None
        }
    }
}

pub fn persist(token: &str, user: &User) {
    let Some(storage) = storage() else {
        return;
    };
    let Ok(raw) = serde_json::to_string(user) else {
        return;
    };
    if storage.set_item(USER_KEY, &raw).is_err() || storage.set_item(TOKEN_KEY, token).is_err() {
        web_sys::console::error_1(&"Failed to persist session".into());
        clear();
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
