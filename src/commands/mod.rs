//! CLI commands for hatecheck

pub mod accounts;
pub mod dispatch;
pub mod init;
pub mod output;
pub mod predict;
pub mod preprocess;
