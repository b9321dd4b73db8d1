//! Input normalization.
//!
//! Turns raw [`TaskInput`] rows into [`Task`] records. Nothing here fails:
//! malformed numbers fall back to a caller-chosen default, and rows without
//! a code or without a positive observed time are skipped.
//!
//! # Fallbacks
//!
//! | Field | Blank | Malformed |
//! |-------|-------|-----------|
//! | observed time | row skipped | row skipped |
//! | multiplier | 1 | 1 (also when below 1) |
//! | allowance % | line default | 0 |
//! | frequency % | line default | 100 |

use crate::models::{LineParameters, LooseNumber, Task, TaskInput};

/// Parses the leading number in `text`, or returns `fallback`.
///
/// Accepts leading whitespace, an optional sign, digits with at most one
/// decimal point and an optional exponent. Trailing garbage is ignored
/// (`"12s"` → 12). Non-finite results also yield `fallback`.
pub fn safe_number(text: &str, fallback: f64) -> f64 {
    let prefix = numeric_prefix(text.trim_start());
    match prefix.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Longest prefix of `text` shaped like a decimal number.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return "";
    }

    // Exponent only counts when digits follow it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

/// Splits a comma-separated predecessor list.
///
/// Entries are trimmed; empty entries and the `-` placeholder are dropped.
/// Duplicated entries are kept as entered.
pub fn parse_predecessors(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty() && *code != "-")
        .map(String::from)
        .collect()
}

/// Observed time of a row, in seconds. 0 when missing or unparsable.
///
/// Text holding several comma-separated samples (`"20, 25"`) yields the
/// mean of the positive samples.
pub fn observed_time(value: Option<&LooseNumber>) -> f64 {
    match value {
        None => 0.0,
        Some(LooseNumber::Text(text)) if text.contains(',') => {
            let samples: Vec<f64> = text
                .split(',')
                .map(|sample| safe_number(sample, f64::NAN))
                .filter(|sample| *sample > 0.0)
                .collect();
            if samples.is_empty() {
                0.0
            } else {
                samples.iter().sum::<f64>() / samples.len() as f64
            }
        }
        Some(value) => value.value_or(0.0),
    }
}

/// Value of an optional percentage, with the line default for blanks.
fn percent_or_default(value: Option<&LooseNumber>, default: f64, malformed: f64) -> f64 {
    match value {
        None => default,
        Some(v) if v.is_blank() => default,
        Some(v) => v.value_or(malformed),
    }
}

/// Normalizes one row. Returns `None` for rows that do not qualify.
pub fn normalize_task(input: &TaskInput, params: &LineParameters) -> Option<Task> {
    let code = input.code.trim();
    if code.is_empty() {
        return None;
    }

    let observed = observed_time(input.observed_time.as_ref());
    if observed <= 0.0 {
        return None;
    }

    let multiplier = match input.repetition_multiplier.as_ref() {
        Some(value) => value.value_or(1.0),
        None => 1.0,
    };
    // Zero and negative multipliers mean "no split".
    let multiplier = multiplier.max(1.0);

    let mut task = Task::new(code, observed)
        .with_description(input.description.trim())
        .with_multiplier(multiplier)
        .with_allowance(percent_or_default(
            input.allowance_percent.as_ref(),
            params.default_allowance_percent,
            0.0,
        ))
        .with_frequency(percent_or_default(
            input.frequency_percent.as_ref(),
            params.default_frequency_percent,
            100.0,
        ));
    task.predecessors = parse_predecessors(&input.predecessors);
    Some(task)
}

/// Normalizes all rows, keeping input order and dropping rows that do not
/// qualify.
pub fn normalize_tasks(inputs: &[TaskInput], params: &LineParameters) -> Vec<Task> {
    inputs
        .iter()
        .filter_map(|input| normalize_task(input, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_number_plain() {
        assert!((safe_number("12.5", 0.0) - 12.5).abs() < 1e-10);
        assert!((safe_number("  -3", 0.0) + 3.0).abs() < 1e-10);
        assert!((safe_number(".5", 0.0) - 0.5).abs() < 1e-10);
        assert!((safe_number("1e3", 0.0) - 1000.0).abs() < 1e-10);
    }

    #[test]
    fn test_safe_number_trailing_garbage() {
        assert!((safe_number("12s", 0.0) - 12.0).abs() < 1e-10);
        assert!((safe_number("7.5 min", 0.0) - 7.5).abs() < 1e-10);
        assert!((safe_number("2e", 0.0) - 2.0).abs() < 1e-10);
        assert!((safe_number("3.", 0.0) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_safe_number_fallback() {
        assert!((safe_number("", 5.0) - 5.0).abs() < 1e-10);
        assert!((safe_number("abc", 5.0) - 5.0).abs() < 1e-10);
        assert!((safe_number("-", 5.0) - 5.0).abs() < 1e-10);
        assert!((safe_number(".", 5.0) - 5.0).abs() < 1e-10);
        assert!((safe_number("inf", 5.0) - 5.0).abs() < 1e-10);
        assert!((safe_number("1e999", 5.0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_parse_predecessors() {
        assert_eq!(parse_predecessors("A, B ,C"), vec!["A", "B", "C"]);
        assert_eq!(parse_predecessors(""), Vec::<String>::new());
        assert_eq!(parse_predecessors("-"), Vec::<String>::new());
        assert_eq!(parse_predecessors("A,,B,"), vec!["A", "B"]);
        assert_eq!(parse_predecessors("A,A"), vec!["A", "A"]);
    }

    #[test]
    fn test_observed_time_samples() {
        let v = LooseNumber::from("20, 25");
        assert!((observed_time(Some(&v)) - 22.5).abs() < 1e-10);

        let v = LooseNumber::from("20, x, -4, 30");
        assert!((observed_time(Some(&v)) - 25.0).abs() < 1e-10);

        let v = LooseNumber::from(",,");
        assert_eq!(observed_time(Some(&v)), 0.0);
        assert_eq!(observed_time(None), 0.0);
    }

    #[test]
    fn test_normalize_skips_unqualified_rows() {
        let params = LineParameters::new(480.0, 480.0);
        let inputs = vec![
            TaskInput::new("", 10.0),
            TaskInput::new("A", 0.0),
            TaskInput::new("B", "abc"),
            TaskInput::default().with_description("no code, no time"),
            TaskInput::new(" C ", 10.0),
        ];
        let tasks = normalize_tasks(&inputs, &params);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].code, "C");
    }

    #[test]
    fn test_normalize_defaults() {
        let params = LineParameters::new(480.0, 480.0)
            .with_default_allowance(12.0)
            .with_default_frequency(80.0);

        let blank = TaskInput::new("A", 10.0).with_allowance("").with_frequency(" ");
        let task = normalize_task(&blank, &params).unwrap();
        assert!((task.allowance_percent - 12.0).abs() < 1e-10);
        assert!((task.frequency_percent - 80.0).abs() < 1e-10);
        assert!((task.repetition_multiplier - 1.0).abs() < 1e-10);

        let unset = TaskInput::new("A", 10.0);
        let task = normalize_task(&unset, &params).unwrap();
        assert!((task.allowance_percent - 12.0).abs() < 1e-10);
        assert!((task.frequency_percent - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_malformed_fields() {
        let params = LineParameters::new(480.0, 480.0).with_default_allowance(12.0);
        let input = TaskInput::new("A", "10")
            .with_multiplier("zero")
            .with_allowance("lots")
            .with_frequency("often")
            .with_predecessors("X, -, Y");
        let task = normalize_task(&input, &params).unwrap();
        assert!((task.repetition_multiplier - 1.0).abs() < 1e-10);
        assert!((task.allowance_percent - 0.0).abs() < 1e-10);
        assert!((task.frequency_percent - 100.0).abs() < 1e-10);
        assert_eq!(task.predecessors, vec!["X", "Y"]);
    }

    #[test]
    fn test_normalize_zero_multiplier() {
        let params = LineParameters::new(480.0, 480.0);
        let task = normalize_task(&TaskInput::new("A", 10.0).with_multiplier(0.0), &params).unwrap();
        assert!((task.repetition_multiplier - 1.0).abs() < 1e-10);

        let task = normalize_task(&TaskInput::new("A", 10.0).with_multiplier(3.0), &params).unwrap();
        assert!((task.repetition_multiplier - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_negative_multiplier() {
        let params = LineParameters::new(480.0, 480.0);
        for raw in [LooseNumber::from(-2.0), LooseNumber::from("-2"), LooseNumber::from(0.5)] {
            let input = TaskInput::new("A", 10.0).with_multiplier(raw);
            let task = normalize_task(&input, &params).unwrap();
            assert!((task.repetition_multiplier - 1.0).abs() < 1e-10);
        }
    }
}
