// src/file/mod.rs
pub mod storage;
pub mod history;
pub mod export;

// Re-export commonly used types
pub use storage::{SessionStorage, MemoryStorage, DirStorage};
