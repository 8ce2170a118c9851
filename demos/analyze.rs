// demos/analyze.rs
//! Walkthrough of the analysis pipeline across the three built-in
//! language profiles.
//!
//! Run with `cargo run --example analyze`

use std::error::Error;

use morfo::{ENG, HEB, Morfo, TLH, available_models};

fn main() -> Result<(), Box<dyn Error>> {
    // ────────────────────────────────────────────────────────────────
    // HEBREW – niqqud stripping, article splitting, dictionary hits
    // ────────────────────────────────────────────────────────────────
    let heb = Morfo::builder().lang(HEB).build();

    let analysis = heb.analyze("קראתי סֵפֶר מעניין אתמול");
    for record in &analysis.records {
        println!(
            "{}. {} → {} [{}] {:.2}",
            record.id, record.original, record.segmentation, record.pos_tag, record.pos_confidence
        );
    }
    // → 1. קראתי → קראתי [VERB] 0.60
    //   2. ספר → ספר [NOUN] 0.70       (the pointed form hit the dictionary once stripped)
    //   3. מעניין → מ-עניין [ADJ] 0.70
    //   4. אתמול → אתמול [ADV] 0.50

    // ────────────────────────────────────────────────────────────────
    // KLINGON – pronominal prefixes, roots found inside complex words
    // ────────────────────────────────────────────────────────────────
    let tlh = Morfo::builder().lang(TLH).build();

    let analysis = tlh.analyze("tlhIngan maH jIyajbe'");
    for record in &analysis.records {
        println!(
            "{}. {} → {} [{}]",
            record.id, record.original, record.segmentation, record.pos_tag
        );
        if let Some(note) = record.morphology.get("notes") {
            println!("   note: {note}");
        }
    }
    // → 1. tlhIngan → tlhIngan [NOUN]
    //   2. maH → maH [PRON]            (the "ma" prefix would leave a 1-char stem, so no split)
    //   3. jIyajbe' → jI-yaj-be' [VERB]
    //      note: Root found in complex word

    // Anything outside the transcription alphabet stops the run early.
    let rejected = tlh.analyze("nuqneH!");
    println!("valid: {}", rejected.verdict.is_valid);
    for warning in &rejected.verdict.warnings {
        println!("warning: {warning}");
    }
    // → valid: false
    //   warning: Contains invalid characters for Klingon transcription

    // ────────────────────────────────────────────────────────────────
    // ENGLISH – suffix stripping and lemma recovery through the parts
    // ────────────────────────────────────────────────────────────────
    let eng = Morfo::builder().lang(ENG).build();

    let analysis = eng.analyze("The cats played quickly");
    for record in &analysis.records {
        println!(
            "{}. {} → {} [{}]",
            record.id, record.original, record.segmentation, record.pos_tag
        );
    }
    // → 1. The → The [DET]
    //   2. cats → cat-s [NOUN]
    //   3. played → play-ed [VERB]
    //   4. quickly → quickly [ADV]

    println!("{}", morfo::export::summary(&analysis.records));
    // → Analysis complete. Found 4 tokens.

    // ────────────────────────────────────────────────────────────────
    // Model registry – selectable profiles, one shared rule set today
    // ────────────────────────────────────────────────────────────────
    for info in available_models() {
        println!(
            "{:<12} accuracy {:.2}  {}",
            info.name, info.accuracy, info.description
        );
    }
    // → Fast         accuracy 0.92  Rule-based, high speed
    //   Accurate     accuracy 0.96  Dictionary + ML hybrid
    //   Experimental accuracy 0.97  Deep learning (beta)

    Ok(())
}
