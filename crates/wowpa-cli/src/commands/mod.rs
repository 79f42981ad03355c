//! CLI command implementations.

pub mod layout;
pub mod route;
pub mod status;
pub mod watch;
