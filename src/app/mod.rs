// logshed - app/mod.rs
//
// Application layer: file I/O and orchestration around the core logic.

pub mod commands;
pub mod config;
