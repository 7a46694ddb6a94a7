//! Core data types for the SaaS Notes client
//!
//! Everything here is owned by the server and only held client-side:
//! - `User`: the authenticated identity, with its `Role` and tenant
//! - `Tenant`: subscription `Plan`, note count and `PlanLimit`
//! - `Note`: a single note as returned by the API
//! - `Session`: the `{token, user}` pair persisted between runs

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque server identifier
///
/// The API may hand out numeric or string identifiers; both are kept as-is
/// and only ever formatted back into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Text(s)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    /// Command-line input: digits become numeric ids, anything else text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Id::Number(n),
            Err(_) => Id::Text(s.to_string()),
        })
    }
}

/// Role of a user within its tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

/// Authenticated user as returned by `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub role: Role,
    /// Tenant identifier, used to address `/tenants/:id/upgrade`
    pub tenant: Id,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
        }
    }
}

/// Note-count ceiling of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanLimit {
    Unlimited,
    Limited(u32),
}

impl From<Option<u32>> for PlanLimit {
    fn from(limit: Option<u32>) -> Self {
        match limit {
            Some(max) => PlanLimit::Limited(max),
            None => PlanLimit::Unlimited,
        }
    }
}

impl From<PlanLimit> for Option<u32> {
    fn from(limit: PlanLimit) -> Self {
        match limit {
            PlanLimit::Unlimited => None,
            PlanLimit::Limited(max) => Some(max),
        }
    }
}

/// Tenant information from `GET /tenant`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TenantWire", into = "TenantWire")]
pub struct Tenant {
    pub name: String,
    pub plan: Plan,
    pub notes_count: u32,
    pub limit: PlanLimit,
}

/// Wire shape of a tenant: camelCase with a nullable `noteLimit`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantWire {
    name: String,
    plan: Plan,
    #[serde(default)]
    notes_count: u32,
    #[serde(default)]
    note_limit: Option<u32>,
}

impl From<TenantWire> for Tenant {
    fn from(wire: TenantWire) -> Self {
        Self {
            name: wire.name,
            plan: wire.plan,
            notes_count: wire.notes_count,
            limit: wire.note_limit.into(),
        }
    }
}

impl From<Tenant> for TenantWire {
    fn from(tenant: Tenant) -> Self {
        Self {
            name: tenant.name,
            plan: tenant.plan,
            notes_count: tenant.notes_count,
            note_limit: tenant.limit.into(),
        }
    }
}

impl Tenant {
    /// True when the free plan's ceiling has been reached
    ///
    /// Pro tenants and unlimited plans never reach a limit.
    pub fn limit_reached(&self) -> bool {
        match (self.plan, self.limit) {
            (Plan::Free, PlanLimit::Limited(max)) => self.notes_count >= max,
            _ => false,
        }
    }

    /// "3/10" for limited plans, "3 (unlimited)" otherwise
    pub fn usage_label(&self) -> String {
        match self.limit {
            PlanLimit::Limited(max) => format!("{}/{}", self.notes_count, max),
            PlanLimit::Unlimited => format!("{} (unlimited)", self.notes_count),
        }
    }
}

/// A single note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: String,
}

impl Note {
    /// Calendar date of `created_at`
    ///
    /// Accepts RFC 3339 timestamps and plain dates. Anything else is shown
    /// verbatim.
    pub fn created_date(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return dt.date_naive().to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(&self.created_at, "%Y-%m-%d") {
            return date.to_string();
        }
        self.created_at.clone()
    }
}

/// Client-held proof of authentication
#[derive(Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Tenant slug, e.g. "acme"
    pub tenant: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

/// Body of `POST /notes` and `PUT /notes/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(plan: Plan, notes_count: u32, limit: PlanLimit) -> Tenant {
        Tenant {
            name: "Acme".to_string(),
            plan,
            notes_count,
            limit,
        }
    }

    #[test]
    fn test_tenant_wire_null_limit_is_unlimited() {
        let json = r#"{"name":"Acme","plan":"pro","notesCount":12,"noteLimit":null}"#;
        let tenant: Tenant = serde_json::from_str(json).unwrap();
        assert_eq!(tenant.plan, Plan::Pro);
        assert_eq!(tenant.notes_count, 12);
        assert_eq!(tenant.limit, PlanLimit::Unlimited);

        let json = r#"{"name":"Acme","plan":"free","notesCount":3}"#;
        let tenant: Tenant = serde_json::from_str(json).unwrap();
        assert_eq!(tenant.limit, PlanLimit::Unlimited);
    }

    #[test]
    fn test_tenant_wire_limit() {
        let json = r#"{"name":"Acme","plan":"free","notesCount":3,"noteLimit":10}"#;
        let tenant: Tenant = serde_json::from_str(json).unwrap();
        assert_eq!(tenant.limit, PlanLimit::Limited(10));

        let back = serde_json::to_value(&tenant).unwrap();
        assert_eq!(back["noteLimit"], 10);
        assert_eq!(back["notesCount"], 3);
    }

    #[test]
    fn test_limit_reached() {
        assert!(tenant(Plan::Free, 10, PlanLimit::Limited(10)).limit_reached());
        assert!(tenant(Plan::Free, 11, PlanLimit::Limited(10)).limit_reached());
        assert!(!tenant(Plan::Free, 9, PlanLimit::Limited(10)).limit_reached());
        assert!(!tenant(Plan::Free, 50, PlanLimit::Unlimited).limit_reached());
        assert!(!tenant(Plan::Pro, 50, PlanLimit::Limited(10)).limit_reached());
    }

    #[test]
    fn test_usage_label() {
        assert_eq!(tenant(Plan::Free, 3, PlanLimit::Limited(10)).usage_label(), "3/10");
        assert_eq!(
            tenant(Plan::Pro, 3, PlanLimit::Unlimited).usage_label(),
            "3 (unlimited)"
        );
    }

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"email":"a@acme.test","role":"admin","tenant":"acme"}"#,
        )
        .unwrap();
        assert_eq!(user.id, Id::Number(7));
        assert_eq!(user.tenant, Id::Text("acme".to_string()));
        assert!(user.is_admin());
        assert_eq!("42".parse::<Id>().unwrap(), Id::Number(42));
        assert_eq!("abc".parse::<Id>().unwrap().to_string(), "abc");
    }

    #[test]
    fn test_created_date() {
        let mut note = Note {
            id: Id::Number(1),
            title: "t".to_string(),
            content: None,
            created_at: "2024-03-05T10:20:30.000Z".to_string(),
        };
        assert_eq!(note.created_date(), "2024-03-05");

        note.created_at = "yesterday".to_string();
        assert_eq!(note.created_date(), "yesterday");
    }
}
