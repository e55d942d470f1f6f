// SimVerdict - core/mod.rs
//
// Core business logic layer.
// Dependencies: util only.
// Must NOT depend on: platform or app. Reads no files; writes only to
// caller-supplied `io::Write` sinks (discovery queries the filesystem
// through `glob`).

pub mod classifier;
pub mod discovery;
pub mod export;
pub mod model;
pub mod report;
