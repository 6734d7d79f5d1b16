//! CLI command handlers
//!
//! Each subcommand group lives in its own module and shares service
//! construction through `helpers`.

pub mod helpers;
pub mod model;
pub mod serve;
pub mod tasks;
