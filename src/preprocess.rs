// src/preprocess.rs
// Normalization and script validation, the first two pipeline steps.
// Both run on the profile carried by the Context; neither knows which
// language it is serving.

use std::{borrow::Cow, sync::LazyLock};

use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};
use memchr::memchr_iter;
use smallvec::SmallVec;

use crate::{context::Context, lang::ScriptCheck};

// ── ICU4X ──
static ICU4X_NFKC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfkc);

/// Outcome of `validate`. `script_ratio` is the share of non-space
/// characters that belong to the profile's script; the exact meaning of
/// "belong" depends on the profile's `ScriptCheck` variant.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub is_valid: bool,
    pub script_ratio: f64,
    pub warnings: SmallVec<[String; 2]>,
}

impl Verdict {
    fn invalid(warning: &str) -> Self {
        let mut warnings = SmallVec::new();
        warnings.push(warning.to_string());
        Self {
            is_valid: false,
            script_ratio: 0.0,
            warnings,
        }
    }
}

/// Normalize `raw` according to the profile: optional NFKC, optional
/// combining-mark removal, then a trim. Zero-copy whenever no step
/// changes the text.
pub fn normalize<'a>(raw: &'a str, strip_diacritics: bool, ctx: &Context) -> Cow<'a, str> {
    if raw.is_empty() {
        return Cow::Borrowed(raw);
    }
    let entry = ctx.entry;

    let mut text: Cow<'a, str> = if entry.normalize.nfkc && !ICU4X_NFKC.is_normalized(raw) {
        Cow::Owned(ICU4X_NFKC.normalize(raw).into_owned())
    } else {
        Cow::Borrowed(raw)
    };

    if strip_diacritics
        && entry.normalize.marks.is_some()
        && text.chars().any(|c| entry.is_strippable_mark(c))
    {
        text = Cow::Owned(text.chars().filter(|&c| !entry.is_strippable_mark(c)).collect());
    }

    trim_preserving_borrow(text)
}

fn trim_preserving_borrow(text: Cow<'_, str>) -> Cow<'_, str> {
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        return text;
    }
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}

/// Count characters that are not an ASCII space. The denominator of
/// every script ratio; multi-byte UTF-8 never contains the 0x20 byte,
/// so a byte scan is exact.
fn non_space_chars(text: &str) -> usize {
    text.chars().count() - memchr_iter(b' ', text.as_bytes()).count()
}

/// Decide whether `text` plausibly belongs to the profile's language.
/// Expects normalized text; never rejects outright except for empty or
/// all-space input and the closed-alphabet check.
pub fn validate(text: &str, ctx: &Context) -> Verdict {
    if text.is_empty() {
        return Verdict::invalid("Empty text");
    }

    match ctx.entry.script {
        ScriptCheck::Block {
            low_ratio_warning, ..
        } => {
            let total = non_space_chars(text);
            if total == 0 {
                return Verdict::invalid("Only whitespace");
            }
            let hits = text.chars().filter(|&c| ctx.entry.in_script(c)).count();
            let ratio = hits as f64 / total as f64;
            let mut warnings = SmallVec::new();
            if ratio < 0.5 {
                warnings.push(low_ratio_warning.to_string());
            }
            Verdict {
                is_valid: hits > 0,
                script_ratio: ratio,
                warnings,
            }
        }
        ScriptCheck::Charset {
            invalid_warning, ..
        } => {
            let is_valid = text.chars().all(|c| ctx.entry.in_script(c));
            let mut warnings = SmallVec::new();
            if !is_valid {
                warnings.push(invalid_warning.to_string());
            }
            Verdict {
                is_valid,
                script_ratio: if is_valid { 1.0 } else { 0.0 },
                warnings,
            }
        }
        ScriptCheck::Letters { low_ratio_warning } => {
            let total = non_space_chars(text);
            if total == 0 {
                return Verdict::invalid("Only whitespace");
            }
            let hits = text.chars().filter(|&c| ctx.entry.in_script(c)).count();
            let ratio = hits as f64 / total as f64;
            let is_valid = ratio > 0.5;
            let mut warnings = SmallVec::new();
            if !is_valid {
                warnings.push(low_ratio_warning.to_string());
            }
            Verdict {
                is_valid,
                script_ratio: ratio,
                warnings,
            }
        }
    }
}

/// Rough per-token script label produced by `label_tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTag {
    /// Contains at least one character of the profile's script.
    Native,
    /// No native characters, but at least one ASCII letter.
    Latin,
    /// Digits, punctuation, anything else.
    Other,
}

/// Split on whitespace and label every token by script membership.
/// Useful for mixed-script input before committing to one pipeline.
pub fn label_tokens<'a>(text: &'a str, ctx: &Context) -> Vec<(&'a str, ScriptTag)> {
    text.split_whitespace()
        .map(|token| {
            let tag = if token.chars().any(|c| ctx.entry.in_script(c)) {
                ScriptTag::Native
            } else if token.chars().any(|c| c.is_ascii_alphabetic()) {
                ScriptTag::Latin
            } else {
                ScriptTag::Other
            };
            (token, tag)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ENG, HEB, TLH};
    use std::borrow::Cow;

    fn ctx(lang: crate::lang::Lang) -> Context {
        Context::new(lang)
    }

    // ── normalize ───────────────────────────────────────────────────────

    #[test]
    fn hebrew_niqqud_is_stripped_by_default_policy() {
        let c = ctx(HEB);
        assert_eq!(normalize("בְּרֵאשִׁית", true, &c), "בראשית");
    }

    #[test]
    fn hebrew_niqqud_survives_when_stripping_is_off() {
        let c = ctx(HEB);
        assert_eq!(normalize("בְּרֵאשִׁית", false, &c), "בְּרֵאשִׁית");
    }

    #[test]
    fn hebrew_presentation_forms_decompose_then_strip() {
        // U+FB35 is vav with dagesh; NFKC splits it, the strip drops the dagesh.
        let c = ctx(HEB);
        assert_eq!(normalize("\u{FB35}", true, &c), "ו");
        assert_eq!(normalize("\u{FB35}", false, &c), "\u{05D5}\u{05BC}");
    }

    #[test]
    fn normalize_trims_both_ends() {
        let c = ctx(HEB);
        assert_eq!(normalize("  שלום \n", true, &c), "שלום");
    }

    #[test]
    fn normalize_is_zero_copy_when_clean() {
        let c = ctx(HEB);
        let input = "שלום עולם";
        let out = normalize(input, true, &c);
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn klingon_normalize_preserves_case() {
        let c = ctx(TLH);
        assert_eq!(normalize("  tlhIngan Hol  ", true, &c), "tlhIngan Hol");
        // No NFKC for the transcription: compatibility chars pass through.
        assert_eq!(normalize("ﬁ", true, &c), "ﬁ");
    }

    #[test]
    fn english_normalize_only_trims() {
        let c = ctx(ENG);
        assert_eq!(normalize(" The cats ", true, &c), "The cats");
        assert_eq!(normalize("café", true, &c), "café");
    }

    #[test]
    fn empty_input_stays_empty() {
        for &lang in crate::lang::data::all_langs() {
            assert_eq!(normalize("", true, &ctx(lang)), "");
        }
    }

    // ── validate ────────────────────────────────────────────────────────

    #[test]
    fn hebrew_text_validates() {
        let v = validate("קראתי ספר", &ctx(HEB));
        assert!(v.is_valid);
        assert_eq!(v.script_ratio, 1.0);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn mostly_foreign_hebrew_warns_but_passes() {
        // One Hebrew char among Latin: valid, ratio far below half.
        let v = validate("hello ס world", &ctx(HEB));
        assert!(v.is_valid);
        assert!(v.script_ratio < 0.5);
        assert_eq!(v.warnings.len(), 1);
        assert!(v.warnings[0].contains("non-Hebrew"));
    }

    #[test]
    fn latin_only_input_fails_hebrew_check() {
        let v = validate("hello world", &ctx(HEB));
        assert!(!v.is_valid);
        assert_eq!(v.script_ratio, 0.0);
    }

    #[test]
    fn empty_and_whitespace_verdicts() {
        let v = validate("", &ctx(HEB));
        assert!(!v.is_valid);
        assert_eq!(v.warnings[0], "Empty text");

        let v = validate("   ", &ctx(HEB));
        assert!(!v.is_valid);
        assert_eq!(v.warnings[0], "Only whitespace");
    }

    #[test]
    fn klingon_closed_alphabet_is_all_or_nothing() {
        let c = ctx(TLH);
        assert!(validate("tlhIngan maH", &c).is_valid);
        assert!(validate("nuqneH'a'", &c).is_valid);

        // Punctuation is outside the transcription alphabet.
        let v = validate("nuqneH!", &c);
        assert!(!v.is_valid);
        assert_eq!(v.script_ratio, 0.0);
        assert!(v.warnings[0].contains("Klingon"));
    }

    #[test]
    fn english_needs_a_letter_majority() {
        let c = ctx(ENG);
        let v = validate("The cats played", &c);
        assert!(v.is_valid);
        assert_eq!(v.script_ratio, 1.0);

        let v = validate("12345 abc", &c);
        assert!(!v.is_valid);
        assert!(v.warnings[0].contains("English"));
    }

    // ── label_tokens ────────────────────────────────────────────────────

    #[test]
    fn mixed_script_tokens_get_labels() {
        let c = ctx(HEB);
        let labels = label_tokens("ספר book 42", &c);
        assert_eq!(
            labels,
            vec![
                ("ספר", ScriptTag::Native),
                ("book", ScriptTag::Latin),
                ("42", ScriptTag::Other),
            ]
        );
    }

    #[test]
    fn native_wins_over_latin_in_one_token() {
        let c = ctx(HEB);
        let labels = label_tokens("ספרbook", &c);
        assert_eq!(labels[0].1, ScriptTag::Native);
    }
}
