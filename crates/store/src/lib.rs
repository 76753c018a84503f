pub mod tracker;

pub use tracker::{JsonFileLog, MemoryLog, ProcessedLog, StoreError};
