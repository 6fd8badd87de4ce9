// crates/hardness-core/src/lib.rs
pub mod accounts;
pub mod context;
pub mod error;
pub mod normalizer;
pub mod renderer;
pub mod scoring;
pub mod types;
