// logshed - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// programmatic use. The CLI surface lives in main.rs.

pub mod app;
pub mod core;
pub mod util;
