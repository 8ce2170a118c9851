// src/pipeline.rs
// The analysis run: normalize, validate, tokenize, then one record per
// token in discovery order. Holds no mutable state, so one `Morfo` can
// serve any number of calls, concurrently included.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    context::Context,
    lang::{DEFAULT_LANG, Lang},
    lexicon::{Features, Lexicon},
    model::{ModelKind, PosTagger},
    morphology,
    preprocess::{self, Verdict},
    score, tokenize,
};

/// One analyzed token. This is the whole contract surface handed to
/// rendering and export; field names are part of the serialized shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub id: usize,
    pub original: String,
    pub segmentation: String,
    pub pos_tag: String,
    pub pos_confidence: f64,
    pub morphology: Features,
    pub confidence_reasoning: String,
}

/// Outcome of one analysis run.
///
/// `records` is empty when validation rejected the input; the verdict
/// carries the warnings either way.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub verdict: Verdict,
    pub records: Vec<AnalysisRecord>,
}

impl Analysis {
    /// Records whose confidence falls under the ambiguity threshold.
    pub fn ambiguous(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.records
            .iter()
            .filter(|record| record.pos_confidence < score::AMBIGUITY_THRESHOLD)
    }
}

/// Configured analyzer for one language.
pub struct Morfo {
    ctx: Context,
    lexicon: Lexicon,
    tagger: PosTagger,
    strip_diacritics: bool,
    include_alternatives: bool,
}

impl Default for Morfo {
    fn default() -> Self {
        Morfo::builder().build()
    }
}

impl Morfo {
    pub fn builder() -> MorfoBuilder {
        MorfoBuilder::default()
    }

    pub fn lang(&self) -> Lang {
        self.ctx.lang
    }

    pub fn model(&self) -> ModelKind {
        self.tagger.kind()
    }

    pub fn strip_diacritics(&self) -> bool {
        self.strip_diacritics
    }

    /// Display toggle carried through for rendering layers. The records
    /// an analysis produces are the same either way.
    pub fn include_alternatives(&self) -> bool {
        self.include_alternatives
    }

    /// Run the full pipeline over `text`.
    ///
    /// Invalid input is not an error: the verdict flags it, its
    /// warnings say why, and the record list comes back empty. Tokens
    /// are processed strictly left to right and ids are 1-based.
    pub fn analyze(&self, text: &str) -> Analysis {
        let normalized = preprocess::normalize(text, self.strip_diacritics, &self.ctx);
        let verdict = preprocess::validate(&normalized, &self.ctx);

        for warning in &verdict.warnings {
            warn!(lang = self.ctx.lang.code(), warning, "validation warning");
        }
        if !verdict.is_valid {
            return Analysis {
                verdict,
                records: Vec::new(),
            };
        }

        let tokens = tokenize::tokenize(&normalized, &self.ctx);
        // One fallback tag sequence for the whole token list, up front.
        let fallback_tags = self.tagger.predict_pos_tags(&tokens);

        let mut records = Vec::with_capacity(tokens.len());
        for (i, (&token, &fallback_tag)) in tokens.iter().zip(&fallback_tags).enumerate() {
            let seg = tokenize::segment(token, &self.ctx);
            let features = morphology::analyze(token, Some(&seg.best), &self.lexicon, &self.ctx);
            let confidence = score::score(token, &features);
            // The analyzer's own tag wins even when it says UNKNOWN.
            let pos_tag = features
                .get("pos")
                .cloned()
                .unwrap_or_else(|| fallback_tag.to_string());

            records.push(AnalysisRecord {
                id: i + 1,
                original: token.to_string(),
                segmentation: seg.best,
                pos_tag,
                pos_confidence: confidence,
                morphology: features,
                confidence_reasoning: score::explain(confidence).to_string(),
            });
        }

        debug!(
            lang = self.ctx.lang.code(),
            tokens = records.len(),
            "analysis complete"
        );
        Analysis { verdict, records }
    }
}

/// Builder for [`Morfo`]. Every knob has a default, so `build` cannot
/// fail; a missing lexicon directory degrades to the builtin data.
pub struct MorfoBuilder {
    lang: Lang,
    model: ModelKind,
    strip_diacritics: bool,
    include_alternatives: bool,
    lexicon: Option<Lexicon>,
    lexicon_dir: Option<PathBuf>,
}

impl Default for MorfoBuilder {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG,
            model: ModelKind::default(),
            strip_diacritics: true,
            include_alternatives: true,
            lexicon: None,
            lexicon_dir: None,
        }
    }
}

impl MorfoBuilder {
    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn model(mut self, model: ModelKind) -> Self {
        self.model = model;
        self
    }

    pub fn strip_diacritics(mut self, strip: bool) -> Self {
        self.strip_diacritics = strip;
        self
    }

    pub fn include_alternatives(mut self, include: bool) -> Self {
        self.include_alternatives = include;
        self
    }

    /// Use this lexicon verbatim, skipping builtin data and directory
    /// loading.
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Load the language's lexicon from `dir` instead of the builtin
    /// data. Missing or malformed files degrade to an empty lexicon.
    pub fn lexicon_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lexicon_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Morfo {
        let ctx = Context::new(self.lang);
        let lexicon = match (self.lexicon, self.lexicon_dir) {
            (Some(lexicon), _) => lexicon,
            (None, Some(dir)) => Lexicon::from_dir(dir, self.lang),
            (None, None) => Lexicon::builtin(self.lang).clone(),
        };

        Morfo {
            ctx,
            lexicon,
            tagger: PosTagger::new(self.model),
            strip_diacritics: self.strip_diacritics,
            include_alternatives: self.include_alternatives,
        }
    }
}
