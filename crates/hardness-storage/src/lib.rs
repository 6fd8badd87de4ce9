// crates/hardness-storage/src/lib.rs
pub mod csv;
pub mod store;

pub use store::{FeedbackStore, FeedbackTable, RecordOutcome};
