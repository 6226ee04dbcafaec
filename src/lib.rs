//! Food Diary application layer: SQLite storage, configuration, CLI commands,
//! text rendering and the HTTP API shared by the `fooddiary` and
//! `fooddiary-server` binaries.

pub mod commands;
pub mod config;
pub mod db;
pub mod render;
pub mod server;
