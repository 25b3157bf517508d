// src/calc/cvss.rs
//
// Correct Value to Send over Strip: y = x / (1 - p/100)

use super::{finite, parse_input, EvalError, Evaluation};

/// Computes `x / (1 - p/100)`. Negative percentages are accepted and
/// shrink the result instead of inflating it.
pub fn compute(x: f64, percentage: f64) -> Result<f64, EvalError> {
    if percentage >= 100.0 {
        return Err(EvalError::PercentageOutOfRange { percentage });
    }

    let fraction = percentage / 100.0;
    finite(x / (1.0 - fraction))
}

pub fn evaluate(raw_x: &str, raw_percentage: &str) -> Result<Evaluation, EvalError> {
    let x = parse_input("x", raw_x)?;
    let percentage = parse_input("percentage", raw_percentage)?;
    compute(x, percentage).map(Evaluation::plain)
}
