// src/config/record.rs
use serde::{Serialize, Deserialize};
use crate::calc::CalculationKind;

/// One labelled input value, kept in the order the calculator lists them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputValue {
    pub label: String,
    pub value: f64,
}

impl InputValue {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A saved calculation. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: String,
    pub kind: CalculationKind,
    pub title: String,
    pub inputs: Vec<InputValue>,
    pub result: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl CalculationRecord {
    #[cfg(test)]
    pub fn input(&self, label: &str) -> Option<f64> {
        self.inputs.iter()
            .find(|input| input.label == label)
            .map(|input| input.value)
    }

    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.created_at)
    }
}
