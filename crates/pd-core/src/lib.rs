pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::auth_outcome::AuthOutcome;
pub use models::auth_status::AuthStatus;
pub use models::controller_state::ControllerState;
pub use models::identity::Identity;
pub use models::new_profile::NewProfile;
pub use models::profile::Profile;
pub use models::profile_patch::ProfilePatch;
pub use models::session::Session;
pub use models::session_token::SessionToken;
pub use validation::FormValidator;

#[cfg(test)]
mod tests;
