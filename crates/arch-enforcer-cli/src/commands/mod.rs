//! CLI subcommands.

pub mod init;
pub mod output;
pub mod scan;
pub mod validate;
