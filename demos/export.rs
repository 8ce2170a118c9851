// demos/export.rs
//! Serializing analysis results: JSON for download, CSV for
//! spreadsheets, plus the aggregations the charting layer feeds on.
//!
//! Run with `cargo run --example export`

use std::error::Error;

use morfo::{HEB, Morfo, export};

fn main() -> Result<(), Box<dyn Error>> {
    let analyzer = Morfo::builder().lang(HEB).build();
    let analysis = analyzer.analyze("קראתי ספר מעניין");

    // Indented JSON, Hebrew glyphs kept unescaped.
    println!("{}", export::to_json(&analysis.records)?);
    // → {
    //     "tokens": [
    //       {
    //         "id": 1,
    //         "original": "קראתי",
    //         ...

    // CSV opens straight in a spreadsheet thanks to the BOM; the
    // feature map is flattened into one cell.
    print!("{}", export::to_csv(&analysis.records));
    // → id,original,segmentation,pos_tag,pos_confidence,morphology,confidence_reasoning
    //   1,קראתי,קראתי,VERB,0.6,...

    // Aggregations for charts.
    let distribution = export::pos_distribution(&analysis.records);
    for (tag, count) in &distribution {
        println!("{tag}: {count}");
    }
    // → ADJ: 1
    //   NOUN: 1
    //   VERB: 1

    let series = export::confidence_series(&analysis.records);
    println!("confidence: {series:?}");
    // → confidence: [0.6, 0.7, 0.7]

    println!("{}", export::summary(&analysis.records));
    // → Analysis complete. Found 3 tokens.

    Ok(())
}
