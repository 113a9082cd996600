//! `munglog samples`: run dataset questions through one session.
//!
//! Accepts either a JSON array of objects or JSON Lines. Each row's question
//! is the first non-blank string among [`QUESTION_FIELDS`].

use std::path::PathBuf;

use serde_json::Value;

use super::{describe_failure, load_controller};

/// Column names tried in order when picking a row's question.
pub const QUESTION_FIELDS: &[&str] = &["question", "prompt", "instruction", "input", "text"];

/// A question drawn from a dataset row.
#[derive(Debug, PartialEq, Eq)]
pub struct Sample {
    /// Zero-based row index in the file.
    pub row: usize,
    pub question: String,
}

/// First non-blank string field among [`QUESTION_FIELDS`].
pub fn pick_question(row: &Value) -> Option<&str> {
    QUESTION_FIELDS
        .iter()
        .filter_map(|field| row.get(*field).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

/// Parse dataset rows from a JSON array or JSON Lines document.
pub fn parse_rows(content: &str) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    if content.trim_start().starts_with('[') {
        let rows: Vec<Value> =
            serde_json::from_str(content).map_err(|e| format!("Invalid JSON array: {e}"))?;
        return Ok(rows);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| -> Result<Value, Box<dyn std::error::Error>> {
            Ok(serde_json::from_str(line)
                .map_err(|e| format!("Invalid JSON on line {}: {e}", n + 1))?)
        })
        .collect()
}

/// Questions from the first `limit` rows; rows without one are skipped.
pub fn collect_samples(rows: &[Value], limit: usize) -> Vec<Sample> {
    rows.iter()
        .take(limit)
        .enumerate()
        .filter_map(|(row, value)| {
            pick_question(value).map(|q| Sample {
                row,
                question: q.to_string(),
            })
        })
        .collect()
}

pub async fn run(file: PathBuf, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let rows = parse_rows(&content)?;
    let samples = collect_samples(&rows, limit);

    tracing::info!(
        rows = rows.len(),
        limit,
        questions = samples.len(),
        "Loaded dataset samples"
    );

    let (_, controller) = load_controller()?;

    for sample in &samples {
        println!();
        println!("[{}] Q: {}", sample.row, sample.question);
        match controller.ask(&sample.question).await {
            Ok(answer) => println!("A : {answer}"),
            Err(e) => println!("A : [Error] {}", describe_failure(&e)),
        }
    }

    Ok(())
}
