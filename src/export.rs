// src/export.rs
// Serialization of analysis records for download and charting. JSON
// keeps the records verbatim under a "tokens" key; CSV flattens the
// feature map into one cell. Non-ASCII text stays unescaped in both.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use memchr::{memchr, memchr3};
use serde::Serialize;
use thiserror::Error;

use crate::{lexicon::Features, pipeline::AnalysisRecord};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

const CSV_HEADER: &str =
    "id,original,segmentation,pos_tag,pos_confidence,morphology,confidence_reasoning";

/// Byte-order mark so spreadsheet imports detect UTF-8.
const BOM: &str = "\u{feff}";

#[derive(Serialize)]
struct Report<'a> {
    tokens: &'a [AnalysisRecord],
}

/// Records as indented JSON, wrapped in `{"tokens": [...]}`.
pub fn to_json(records: &[AnalysisRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&Report { tokens: records })?)
}

/// Records as UTF-8 CSV with a leading BOM, one row per record.
///
/// Fields are quoted only when they need it; the feature map flattens
/// to `key=value` pairs joined by `; `.
pub fn to_csv(records: &[AnalysisRecord]) -> String {
    let mut out = String::with_capacity(64 + records.len() * 96);
    out.push_str(BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in records {
        let _ = write!(out, "{},", record.id);
        push_field(&mut out, &record.original);
        out.push(',');
        push_field(&mut out, &record.segmentation);
        out.push(',');
        push_field(&mut out, &record.pos_tag);
        let _ = write!(out, ",{},", record.pos_confidence);
        push_field(&mut out, &flatten_features(&record.morphology));
        out.push(',');
        push_field(&mut out, &record.confidence_reasoning);
        out.push('\n');
    }

    out
}

fn flatten_features(features: &Features) -> String {
    let mut flat = String::new();
    for (i, (key, value)) in features.iter().enumerate() {
        if i > 0 {
            flat.push_str("; ");
        }
        flat.push_str(key);
        flat.push('=');
        flat.push_str(value);
    }
    flat
}

/// Minimal quoting: only fields containing a quote, comma or line
/// break get wrapped, with inner quotes doubled.
fn push_field(out: &mut String, field: &str) {
    let bytes = field.as_bytes();
    let needs_quoting =
        memchr3(b'"', b',', b'\n', bytes).is_some() || memchr(b'\r', bytes).is_some();

    if needs_quoting {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Tag frequencies for charting, keyed by tag.
pub fn pos_distribution(records: &[AnalysisRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.pos_tag.clone()).or_insert(0) += 1;
    }
    counts
}

/// Confidence values in record order, for histograms.
pub fn confidence_series(records: &[AnalysisRecord]) -> Vec<f64> {
    records.iter().map(|record| record.pos_confidence).collect()
}

/// One-line run summary.
pub fn summary(records: &[AnalysisRecord]) -> String {
    format!("Analysis complete. Found {} tokens.", records.len())
}
