// src/state/calculator_state.rs
use crate::calc::{CalculationKind, EvalError, Evaluation};
use crate::config::InputValue;

/// Form state of one calculator card. `first`/`second` hold raw text in
/// the kind's evaluation order.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    pub kind: CalculationKind,
    pub first: String,
    pub second: String,
    default_second: String,
    outcome: Result<Evaluation, EvalError>,
}

/// What gets handed to the history store on save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub kind: CalculationKind,
    pub title: String,
    pub inputs: Vec<InputValue>,
    pub result: f64,
    pub note: Option<String>,
}

impl CalculatorState {
    pub fn new(kind: CalculationKind) -> Self {
        Self::with_default(kind, String::new())
    }

    /// A calculator whose second field starts out (and resets to) `default_second`.
    pub fn with_default(kind: CalculationKind, default_second: String) -> Self {
        let mut state = Self {
            kind,
            first: String::new(),
            second: default_second.clone(),
            default_second,
            outcome: Err(EvalError::NonFinite),
        };
        state.recompute();
        state
    }

    /// Must be called after every edit of `first` or `second`.
    pub fn recompute(&mut self) {
        self.outcome = self.kind.evaluate(&self.first, &self.second);
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.outcome.as_ref().ok()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&EvalError> {
        self.outcome.as_ref().err()
    }

    pub fn reset(&mut self) {
        self.first.clear();
        self.second = self.default_second.clone();
        self.recompute();
    }

    /// None while the result is undefined.
    pub fn save_request(&self) -> Option<SaveRequest> {
        let evaluation = self.evaluation()?;
        let [first_label, second_label] = self.kind.input_labels();
        let first = self.first.trim().parse::<f64>().ok()?;
        let second = self.second.trim().parse::<f64>().ok()?;

        Some(SaveRequest {
            kind: self.kind,
            title: self.kind.title().to_string(),
            inputs: vec![
                InputValue::new(first_label, first),
                InputValue::new(second_label, second),
            ],
            result: evaluation.value,
            note: evaluation.note().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cvss_starts_with_default_percentage() {
        let mut state = CalculatorState::with_default(CalculationKind::Cvss, "3".to_string());
        assert_eq!(state.second, "3");
        assert!(state.evaluation().is_none());

        state.first = "97".to_string();
        state.recompute();
        let value = state.evaluation().unwrap().value;
        assert!((value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = CalculatorState::with_default(CalculationKind::Cvss, "3".to_string());
        state.first = "10".to_string();
        state.second = "50".to_string();
        state.recompute();
        assert!(state.evaluation().is_some());

        state.reset();
        assert_eq!(state.first, "");
        assert_eq!(state.second, "3");
        assert!(state.evaluation().is_none());
    }

    #[test]
    fn test_undefined_result_cannot_be_saved() {
        let mut state = CalculatorState::new(CalculationKind::Ip);
        state.first = "0".to_string();
        state.second = "50".to_string();
        state.recompute();

        assert_eq!(state.error(), Some(&EvalError::DivisionByZero { field: "base" }));
        assert_eq!(state.save_request(), None);
    }

    #[test]
    fn test_vrl_save_request_carries_note_and_labels() {
        let mut state = CalculatorState::new(CalculationKind::Vrl);
        state.first = "1000".to_string();
        state.second = "900".to_string();
        state.recompute();

        let request = state.save_request().unwrap();
        assert_eq!(request.kind, CalculationKind::Vrl);
        assert_eq!(request.title, "Value to Recover Loss (VRL)");
        assert_eq!(
            request.inputs,
            vec![
                InputValue::new("Purchase Value", 1000.0),
                InputValue::new("Market Value", 900.0),
            ]
        );
        assert_eq!(request.note.as_deref(), Some("Recommend exit"));
    }

    #[test]
    fn test_ip_save_request_has_no_note() {
        let mut state = CalculatorState::new(CalculationKind::Ip);
        state.first = " 200 ".to_string();
        state.second = "50".to_string();
        state.recompute();

        let request = state.save_request().unwrap();
        assert_eq!(request.result, 25.0);
        assert_eq!(request.note, None);
        assert_eq!(request.inputs[0], InputValue::new("X (Base)", 200.0));
    }
}
