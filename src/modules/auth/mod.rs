//! Login, lockout and password-reset flows.

pub mod attempts;
pub mod login;
pub mod reset;

pub use attempts::LoginAttemptService;
pub use login::LoginService;
pub use reset::PasswordResetService;
