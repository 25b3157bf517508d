// src/calc/mod.rs
use serde::{Serialize, Deserialize};
use thiserror::Error;

pub mod cvss;
pub mod vrl;
pub mod ip;

// Re-export commonly used types
pub use vrl::RecoveryStatus;

/// Why an evaluator produced no result. Every variant is shown to the
/// user the same way (the result panel is hidden).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("{field} is not a number: {input:?}")]
    Parse {
        field: &'static str,
        input: String,
    },

    #[error("percentage must be below 100, got {percentage}")]
    PercentageOutOfRange { percentage: f64 },

    #[error("{field} must not be zero")]
    DivisionByZero { field: &'static str },

    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalculationKind {
    Cvss,
    Vrl,
    Ip,
}

/// A defined evaluator output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub status: Option<RecoveryStatus>,
}

impl Evaluation {
    pub fn plain(value: f64) -> Self {
        Self { value, status: None }
    }

    /// Advisory note stored with a saved record (VRL only).
    pub fn note(&self) -> Option<&'static str> {
        self.status.map(|status| status.note())
    }
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 3] = [
        CalculationKind::Cvss,
        CalculationKind::Vrl,
        CalculationKind::Ip,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::Cvss => "CVSS",
            CalculationKind::Vrl => "VRL",
            CalculationKind::Ip => "IP",
        }
    }

    /// Title stored on saved records.
    pub fn title(&self) -> &'static str {
        match self {
            CalculationKind::Cvss => "Correct Value (CVSS)",
            CalculationKind::Vrl => "Value to Recover Loss (VRL)",
            CalculationKind::Ip => "Inverse Percentage (IP)",
        }
    }

    pub fn card_title(&self) -> &'static str {
        match self {
            CalculationKind::Cvss => "CVSS Calculator",
            CalculationKind::Vrl => "VRL Calculator",
            CalculationKind::Ip => "IP Calculator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculationKind::Cvss => "Correct Value to Send over Strip",
            CalculationKind::Vrl => "Value to Recover Loss",
            CalculationKind::Ip => "Inverse Percentage Calculation",
        }
    }

    /// Labels used on saved records, in evaluation order.
    pub fn input_labels(&self) -> [&'static str; 2] {
        match self {
            CalculationKind::Cvss => ["X (Input)", "P (Percentage)"],
            CalculationKind::Vrl => ["Purchase Value", "Market Value"],
            CalculationKind::Ip => ["X (Base)", "Y (Part)"],
        }
    }

    /// Form labels, in evaluation order.
    pub fn field_labels(&self) -> [&'static str; 2] {
        match self {
            CalculationKind::Cvss => ["Input Value (X)", "Percentage (P)"],
            CalculationKind::Vrl => ["Purchase Value", "Market Value"],
            CalculationKind::Ip => ["Value X (Base)", "Value Y (Part)"],
        }
    }

    pub fn field_hints(&self) -> [&'static str; 2] {
        match self {
            CalculationKind::Cvss => ["Enter amount...", "3"],
            CalculationKind::Vrl => ["e.g. 1000", "e.g. 900"],
            CalculationKind::Ip => ["Enter base value...", "Enter part value..."],
        }
    }

    pub fn result_label(&self) -> &'static str {
        match self {
            CalculationKind::Cvss => "Calculated Value (Y)",
            CalculationKind::Vrl => "Recovery Index (f')",
            CalculationKind::Ip => "Percentage (f)",
        }
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self, CalculationKind::Vrl | CalculationKind::Ip)
    }

    /// Evaluates raw form text, `first` and `second` following `input_labels` order.
    pub fn evaluate(&self, first: &str, second: &str) -> Result<Evaluation, EvalError> {
        match self {
            CalculationKind::Cvss => cvss::evaluate(first, second),
            CalculationKind::Vrl => vrl::evaluate(first, second),
            CalculationKind::Ip => ip::evaluate(first, second),
        }
    }
}

pub fn parse_input(field: &'static str, raw: &str) -> Result<f64, EvalError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EvalError::Parse {
            field,
            input: raw.to_string(),
        }),
    }
}

pub(crate) fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}
