// src/calc/ip.rs
//
// Inverse Percentage: f = (part / base) * 100

use super::{finite, parse_input, EvalError, Evaluation};

pub fn compute(base: f64, part: f64) -> Result<f64, EvalError> {
    if base == 0.0 {
        return Err(EvalError::DivisionByZero { field: "base" });
    }

    finite((part / base) * 100.0)
}

pub fn evaluate(raw_base: &str, raw_part: &str) -> Result<Evaluation, EvalError> {
    let base = parse_input("base", raw_base)?;
    let part = parse_input("part", raw_part)?;
    compute(base, part).map(Evaluation::plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter() {
        assert_eq!(compute(200.0, 50.0), Ok(25.0));
        assert_eq!(evaluate("200", "50").unwrap(), Evaluation::plain(25.0));
    }

    #[test]
    fn test_matches_ieee_formula() {
        let cases = [(3.0, 1.0), (-8.0, 2.5), (0.1, 0.3), (1e-3, 7.0)];
        for (base, part) in cases {
            assert_eq!(compute(base, part), Ok((part / base) * 100.0));
        }
    }

    #[test]
    fn test_zero_base_is_undefined() {
        for part in [0.0, 50.0, -1.0] {
            assert_eq!(
                compute(0.0, part),
                Err(EvalError::DivisionByZero { field: "base" })
            );
        }
    }

    #[test]
    fn test_unparseable_part_is_undefined() {
        assert!(matches!(
            evaluate("200", "fifty"),
            Err(EvalError::Parse { field: "part", .. })
        ));
    }
}
