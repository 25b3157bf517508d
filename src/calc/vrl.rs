// src/calc/vrl.rs
//
// Value to Recover Loss: f' = ((purchase / market) - 1) * 100

use serde::{Serialize, Deserialize};
use super::{finite, parse_input, EvalError, Evaluation};

/// Results at or below this index (inclusive) are still recoverable.
pub const SAFE_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecoveryStatus {
    Safe,
    Exit,
}

impl RecoveryStatus {
    pub fn classify(index: f64) -> Self {
        if index <= SAFE_THRESHOLD {
            RecoveryStatus::Safe
        } else {
            RecoveryStatus::Exit
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            RecoveryStatus::Safe => "Safe to recover",
            RecoveryStatus::Exit => "Recommend exit",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RecoveryStatus::Safe => "You are safe, you can recover your loss.",
            RecoveryStatus::Exit => "Value > 10%. We recommend to exit.",
        }
    }
}

pub fn compute(purchase: f64, market: f64) -> Result<f64, EvalError> {
    if market == 0.0 {
        return Err(EvalError::DivisionByZero { field: "market" });
    }

    finite(((purchase / market) - 1.0) * 100.0)
}

pub fn evaluate(raw_purchase: &str, raw_market: &str) -> Result<Evaluation, EvalError> {
    let purchase = parse_input("purchase", raw_purchase)?;
    let market = parse_input("market", raw_market)?;
    let value = compute(purchase, market)?;

    Ok(Evaluation {
        value,
        status: Some(RecoveryStatus::classify(value)),
    })
}
