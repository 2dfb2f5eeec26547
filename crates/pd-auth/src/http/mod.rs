//! REST implementation of the remote service (GoTrue-style auth endpoints
//! plus a PostgREST-style profile table).

mod client;
mod session_file;
mod wire;

pub use client::RemoteClient;
pub use session_file::SessionFile;
