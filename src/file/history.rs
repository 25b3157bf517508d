// src/file/history.rs
use std::collections::HashSet;
use anyhow::{Result, Context, anyhow};
use crate::config::CalculationRecord;

/// Storage key holding the serialized history.
pub const HISTORY_KEY: &str = "fincalc_history";

pub fn encode_history(records: &[CalculationRecord]) -> Result<String> {
    ron::ser::to_string_pretty(
        records,
        ron::ser::PrettyConfig::new()
            .new_line("\n".to_string())
            .depth_limit(4)
            .separate_tuple_members(true)
    ).context("Failed to serialize history")
}

/// Decodes and validates a persisted history. A value that decodes but
/// breaks the record invariants is rejected like one that doesn't decode.
pub fn decode_history(content: &str) -> Result<Vec<CalculationRecord>> {
    let records: Vec<CalculationRecord> = ron::from_str(content)
        .context("Failed to parse history")?;

    let mut seen = HashSet::new();
    for record in &records {
        if !record.result.is_finite() {
            return Err(anyhow!("Record {} has a non-finite result", record.id));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(anyhow!("Duplicate record id: {}", record.id));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::CalculationKind;
    use crate::config::InputValue;

    fn record(id: &str, result: f64) -> CalculationRecord {
        CalculationRecord {
            id: id.to_string(),
            kind: CalculationKind::Vrl,
            title: CalculationKind::Vrl.title().to_string(),
            inputs: vec![
                InputValue::new("Purchase Value", 1000.0),
                InputValue::new("Market Value", 900.0),
            ],
            result,
            note: Some("Recommend exit".to_string()),
            created_at: 1_700_000_000_123,
        }
    }

    #[test]
    fn test_layout_uses_camel_case_fields() {
        let content = encode_history(&[record("a", 11.5)]).unwrap();
        assert!(content.contains("createdAt: 1700000000123"));
        assert!(content.contains("kind: VRL"));
        assert!(content.contains("note: Some(\"Recommend exit\")"));
    }

    #[test]
    fn test_note_is_optional_when_reading() {
        let content = r#"[
            (
                id: "a",
                kind: IP,
                title: "Inverse Percentage (IP)",
                inputs: [(label: "X (Base)", value: 200.0), (label: "Y (Part)", value: 50.0)],
                result: 25.0,
                createdAt: 5,
            ),
        ]"#;
        let records = decode_history(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].note, None);
        assert_eq!(records[0].input("Y (Part)"), Some(50.0));
    }

    #[test]
    fn test_rejects_malformed_content() {
        assert!(decode_history("").is_err());
        assert!(decode_history("not ron at all {").is_err());
        assert!(decode_history("[(id: \"a\")]").is_err());
    }

    #[test]
    fn test_rejects_broken_invariants() {
        let duplicated = encode_history(&[record("a", 1.0), record("a", 2.0)]).unwrap();
        assert!(decode_history(&duplicated).is_err());

        let infinite = encode_history(&[record("a", f64::INFINITY)]).unwrap();
        assert!(decode_history(&infinite).is_err());
    }
}
