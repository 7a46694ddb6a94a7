//! Page components

mod dashboard;
mod login;

pub use dashboard::Dashboard;
pub use login::Login;
