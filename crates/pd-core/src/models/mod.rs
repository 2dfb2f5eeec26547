pub mod auth_outcome;
pub mod auth_status;
pub mod controller_state;
pub mod identity;
pub mod new_profile;
pub mod profile;
pub mod profile_patch;
pub mod session;
pub mod session_token;
