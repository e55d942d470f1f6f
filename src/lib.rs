// SimVerdict - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// programmatic use (e.g. a CI wrapper that wants the records rather than
// the printed table).

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
