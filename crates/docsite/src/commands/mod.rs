//! CLI command implementations.

pub mod check;
pub mod fmt;
pub mod init;
pub mod nav;
pub mod rules;
pub mod watch;
