mod auth_status;
mod controller_state;
mod profile;
mod profile_patch;
mod session;
