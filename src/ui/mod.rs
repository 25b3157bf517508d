// src/ui/mod.rs
pub mod calculators;
pub mod history;
pub mod dialog;
