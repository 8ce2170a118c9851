// src/lang.rs
// Type vocabulary for the per-language profile table. Every behavioural
// difference between languages lives in a LangEntry; the pipeline code
// itself is language-agnostic.

pub mod data;

pub use data::{ENG, HEB, TLH, all_langs, from_code};

use std::str::FromStr;

use thiserror::Error;

use crate::lang::data::LANG_TABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lang {
    pub code: &'static str,
    pub name: &'static str,
}

impl Lang {
    #[inline(always)]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Canonical static profile for this language.
    #[inline]
    pub fn entry(&self) -> &'static LangEntry {
        LANG_TABLE
            .get(self.code)
            .expect("language not present in LANG_TABLE – this is a bug")
    }
}

#[derive(Debug, Error)]
#[error("unknown language code `{0}` (expected HEB, TLH or ENG)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Lang {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

pub const DEFAULT_LANG: Lang = crate::HEB;

/// Rendering direction reported to display surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// How a language decides whether text plausibly belongs to it.
///
/// The three variants mirror the three validation styles in the wild:
/// a Unicode-block census, a closed transcription alphabet, and a plain
/// ASCII-letter ratio.
#[derive(Debug, Clone, Copy)]
pub enum ScriptCheck {
    /// Count characters inside an inclusive Unicode block. Any hit makes
    /// the text valid; a ratio below one half only warns.
    Block {
        start: char,
        end: char,
        low_ratio_warning: &'static str,
    },
    /// Every character must come from the transcription alphabet
    /// (ASCII letters, whitespace, plus `extra`). All-or-nothing.
    Charset {
        extra: &'static [char],
        invalid_warning: &'static str,
    },
    /// ASCII-letter ratio must clear one half.
    Letters { low_ratio_warning: &'static str },
}

/// Normalization switches applied before validation and tokenization.
#[derive(Debug, Clone, Copy)]
pub struct NormalizePolicy {
    /// Run Unicode NFKC first.
    pub nfkc: bool,
    /// Inclusive combining-mark range removed when diacritic stripping
    /// is enabled. None means the language has no strippable marks.
    pub marks: Option<(char, char)>,
}

/// One suffix-stripping rule for the segmenter.
#[derive(Debug, Clone, Copy)]
pub struct SuffixRule {
    pub affix: &'static str,
    /// Minimum stem length, in chars, left after removal.
    pub min_stem: usize,
    /// Vetoes the rule when the word already ends with this ("ss" keeps
    /// English "glass" intact).
    pub unless_ends: Option<&'static str>,
}

/// Affix tables and fixed confidences driving `tokenize::segment`.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPolicy {
    /// Scanned in order; first prefix that leaves a long-enough stem wins.
    pub prefixes: &'static [&'static str],
    /// Scanned in order; first suffix whose rule passes wins.
    pub suffixes: &'static [SuffixRule],
    /// Minimum token length, in chars, before the prefix scan runs at all.
    pub min_token: usize,
    /// Minimum stem length, in chars, left after a prefix strip.
    pub min_stem: usize,
    /// Confidence reported when at least one affix matched.
    pub hit: f64,
    /// Confidence reported when nothing matched.
    pub miss: f64,
    /// Confidence attached to alternative readings; None keeps the
    /// alternatives list empty.
    pub alt: Option<f64>,
}

/// Feature pairs written by a single fallback rule.
pub type FeatureSet = &'static [(&'static str, &'static str)];

/// Rule tables for the analyzer's no-dictionary-match fallback.
#[derive(Debug, Clone, Copy)]
pub struct FallbackRules {
    /// Baseline feature mapping. Never empty.
    pub defaults: FeatureSet,
    /// Ordered (suffix, features) rules; first match wins.
    pub suffix_features: &'static [(&'static str, FeatureSet)],
    /// Ordered (prefix, features) rules; every match applies.
    pub prefix_features: &'static [(&'static str, FeatureSet)],
    /// Verb-pattern detection: the feature key written, its default
    /// value, and the ordered (prefix, value) table. First match wins.
    pub pattern: Option<PatternRule>,
}

#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub key: &'static str,
    pub default: &'static str,
    pub prefixes: &'static [(&'static str, &'static str)],
}

/// Full per-language profile. All fields are `'static` data produced by
/// the `define_languages!` table in `lang::data`.
#[derive(Debug, Clone, Copy)]
pub struct LangEntry {
    pub direction: Direction,
    /// Suggested display font stack.
    pub font: &'static str,
    /// Canonical sample sentence for demos and smoke tests.
    pub example: &'static str,
    pub script: ScriptCheck,
    pub normalize: NormalizePolicy,
    /// Characters isolated into standalone tokens.
    pub punctuation: &'static [char],
    pub segment: SegmentPolicy,
    pub fallback: FallbackRules,
    /// Fold tokens to lowercase before dictionary lookup.
    pub fold_lookup: bool,
}

impl LangEntry {
    #[inline]
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    /// True when `c` falls in the strippable combining-mark range.
    #[inline]
    pub fn is_strippable_mark(&self, c: char) -> bool {
        match self.normalize.marks {
            Some((lo, hi)) => c >= lo && c <= hi,
            None => false,
        }
    }

    /// Per-character form of the script check. `Charset` membership here
    /// means "allowed", not "counted"; the ratio logic lives in
    /// `preprocess::validate`.
    #[inline]
    pub fn in_script(&self, c: char) -> bool {
        match self.script {
            ScriptCheck::Block { start, end, .. } => c >= start && c <= end,
            ScriptCheck::Charset { extra, .. } => {
                c.is_ascii_alphabetic() || c.is_whitespace() || extra.contains(&c)
            }
            ScriptCheck::Letters { .. } => c.is_ascii_alphabetic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ENG, HEB, TLH};

    #[test]
    fn entry_lookup_never_panics_for_table_langs() {
        for &lang in data::all_langs() {
            let entry = lang.entry();
            assert!(!entry.fallback.defaults.is_empty());
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("heb".parse::<Lang>().unwrap(), HEB);
        assert_eq!("Tlh".parse::<Lang>().unwrap(), TLH);
        assert_eq!("ENG".parse::<Lang>().unwrap(), ENG);
        assert!("xyz".parse::<Lang>().is_err());
    }

    #[test]
    fn unknown_language_error_names_the_code() {
        let err = "klingon".parse::<Lang>().unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn hebrew_marks_range_covers_niqqud() {
        let entry = HEB.entry();
        assert!(entry.is_strippable_mark('\u{05B0}')); // sheva
        assert!(entry.is_strippable_mark('\u{05C1}')); // shin dot
        assert!(!entry.is_strippable_mark('ס'));
    }

    #[test]
    fn script_membership_per_language() {
        assert!(HEB.entry().in_script('ס'));
        assert!(!HEB.entry().in_script('s'));
        assert!(TLH.entry().in_script('\''));
        assert!(!TLH.entry().in_script('é'));
        assert!(ENG.entry().in_script('s'));
        assert!(!ENG.entry().in_script('1'));
    }
}
