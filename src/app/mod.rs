// SimVerdict - app/mod.rs
//
// Application layer: wires discovery, reading, classification, and
// reporting into one run.
// Dependencies: core, platform, util.

pub mod summarize;
