use std::error::Error;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use morfo::{Analysis, Lang, ModelKind, Morfo, export};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned columns for the terminal
    Table,
    /// Indented JSON wrapped as {"tokens": [...]}
    Json,
    /// UTF-8 CSV with a leading BOM
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "morfo")]
#[command(about = "Rule and dictionary morphological analysis for Hebrew, Klingon and English")]
struct Args {
    /// Text to analyze
    #[arg(required_unless_present = "example")]
    text: Option<String>,

    /// Analyze the language's built-in example sentence
    #[arg(long, conflicts_with = "text")]
    example: bool,

    /// Language code (HEB, TLH or ENG, case-insensitive)
    #[arg(short, long, default_value = "HEB")]
    lang: Lang,

    /// Tagging profile: fast, accurate or experimental
    #[arg(short, long, default_value = "accurate")]
    model: ModelKind,

    /// Keep diacritics instead of stripping them
    #[arg(long)]
    keep_diacritics: bool,

    /// Load dictionaries from this directory instead of the builtin data
    #[arg(long, value_name = "DIR")]
    lexicon_dir: Option<std::path::PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Morfo::builder()
        .lang(args.lang)
        .model(args.model)
        .strip_diacritics(!args.keep_diacritics);
    if let Some(dir) = &args.lexicon_dir {
        builder = builder.lexicon_dir(dir);
    }
    let analyzer = builder.build();

    let text = match args.text {
        Some(text) => text,
        None => analyzer.lang().entry().example.to_string(),
    };

    let started = Instant::now();
    let analysis = analyzer.analyze(&text);
    let elapsed = started.elapsed().as_secs_f64();

    for warning in &analysis.verdict.warnings {
        eprintln!("warning: {warning}");
    }
    if !analysis.verdict.is_valid {
        eprintln!(
            "Input does not appear to contain valid {} text.",
            analyzer.lang().name()
        );
        std::process::exit(1);
    }

    match args.format {
        Format::Json => println!("{}", export::to_json(&analysis.records)?),
        Format::Csv => print!("{}", export::to_csv(&analysis.records)),
        Format::Table => print_table(&analysis, &analyzer, elapsed),
    }

    Ok(())
}

fn print_table(analysis: &Analysis, analyzer: &Morfo, elapsed: f64) {
    let records = &analysis.records;

    println!(
        "Tokens: {}  |  Time: {elapsed:.3}s  |  Model: {}",
        records.len(),
        analyzer.model().info().name
    );
    println!();

    let mut tok_w = "Token".len();
    let mut seg_w = "Segmentation".len();
    let mut pos_w = "POS".len();
    for record in records {
        tok_w = tok_w.max(record.original.chars().count());
        seg_w = seg_w.max(record.segmentation.chars().count());
        pos_w = pos_w.max(record.pos_tag.chars().count());
    }

    println!(
        "{:<4}  {:<tok_w$}  {:<seg_w$}  {:<pos_w$}  Confidence",
        "ID", "Token", "Segmentation", "POS",
    );
    for record in records {
        println!(
            "{:<4}  {:<tok_w$}  {:<seg_w$}  {:<pos_w$}  {:.2}",
            record.id, record.original, record.segmentation, record.pos_tag, record.pos_confidence,
        );
    }

    let ambiguous = analysis.ambiguous().count();
    if ambiguous > 0 {
        println!();
        println!("{ambiguous} token(s) with ambiguous readings.");
    }

    println!();
    println!("{}", export::summary(records));
}
