// logshed - core/mod.rs
//
// Core business logic layer: parsing, querying, splitting, reporting,
// and export serialisation. Functions here accept already-read content
// and write to `Write` trait objects; the app layer owns the filesystem.

pub mod export;
pub mod model;
pub mod parser;
pub mod query;
pub mod report;
pub mod source;
pub mod split;
