// crates/hardness-engines/src/lib.rs
pub mod client;
pub mod extract;
pub mod runner;
pub mod stages;
