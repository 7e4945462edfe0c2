//! Library components of the table viewer CLI.

pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod report;
