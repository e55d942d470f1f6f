// SimVerdict - platform/mod.rs
//
// Platform abstraction layer: log reading/decoding, output file creation,
// and config file location.
// Dependencies: util, standard library, directories, encoding_rs.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
