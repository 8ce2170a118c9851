pub mod context;
pub mod export;
pub mod lang;
pub mod lexicon;
pub mod model;
pub mod morphology;
pub mod pipeline;
pub mod preprocess;
pub mod score;
pub mod tokenize;

pub use lang::Lang;
pub use lang::{DEFAULT_LANG, ENG, HEB, TLH, all_langs};

pub use context::Context;
pub use lexicon::{Features, Lexicon};
pub use model::{ModelKind, PosTagger, available_models};
pub use pipeline::{Analysis, AnalysisRecord, Morfo, MorfoBuilder};
pub use preprocess::Verdict;
pub use tokenize::{Alternative, Segmentation};
