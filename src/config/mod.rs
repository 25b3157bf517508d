// src/config/mod.rs
pub mod record;
pub mod settings;

// Re-export commonly used types
pub use record::{CalculationRecord, InputValue};
pub use settings::Settings;
