// src/score.rs
// Confidence scoring shared by every language profile. The formula is
// fixed-step: a baseline, feature bonuses, a short-token penalty, then
// a clamp. Buckets map scores to one of three canned justifications.

use crate::lexicon::Features;

const BASELINE: f64 = 0.5;
const GENDER_BONUS: f64 = 0.2;
const PATTERN_BONUS: f64 = 0.1;
const SHORT_TOKEN_PENALTY: f64 = 0.1;
const SHORT_TOKEN_CHARS: usize = 2;

pub const HIGH_CONFIDENCE: &str = "High confidence: Clear morphological markers found.";
pub const MEDIUM_CONFIDENCE: &str = "Medium confidence: Some ambiguity in suffix.";
pub const LOW_CONFIDENCE: &str = "Low confidence: Word not in dictionary and no clear patterns.";

/// Scores under this are flagged as ambiguous readings.
pub const AMBIGUITY_THRESHOLD: f64 = 0.6;

/// Score a single analysis in [0,1].
///
/// A feature counts only when it is present with a value other than
/// "unknown"; an absent key earns nothing.
pub fn score(token: &str, features: &Features) -> f64 {
    let mut score = BASELINE;

    if recognized(features, "gender") {
        score += GENDER_BONUS;
    }
    if recognized(features, "binyan") {
        score += PATTERN_BONUS;
    }
    if token.chars().count() < SHORT_TOKEN_CHARS {
        score -= SHORT_TOKEN_PENALTY;
    }

    score.clamp(0.0, 1.0)
}

#[inline]
fn recognized(features: &Features, key: &str) -> bool {
    features.get(key).is_some_and(|value| value != "unknown")
}

/// Map a score to its fixed justification sentence. Thresholds are
/// exclusive: 0.8 itself is still medium, 0.5 itself is still low.
pub fn explain(score: f64) -> &'static str {
    if score > 0.8 {
        HIGH_CONFIDENCE
    } else if score > 0.5 {
        MEDIUM_CONFIDENCE
    } else {
        LOW_CONFIDENCE
    }
}

/// Combine several scores into one.
///
/// Weighted mean when `weights` is given, matches `scores` in length
/// and has positive mass; otherwise the plain mean. Empty input is 0.0
/// by definition, not an error.
pub fn ensemble_score(scores: &[f64], weights: Option<&[f64]>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    if let Some(weights) = weights
        && weights.len() == scores.len()
    {
        let mass: f64 = weights.iter().sum();
        if mass > 0.0 {
            let weighted: f64 = scores.iter().zip(weights).map(|(s, w)| s * w).sum();
            return weighted / mass;
        }
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(pairs: &[(&str, &str)]) -> Features {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn baseline_for_featureless_tokens() {
        assert_eq!(score("garden", &Features::new()), 0.5);
    }

    #[test]
    fn gender_and_pattern_earn_bonuses() {
        let f = features(&[("gender", "feminine")]);
        assert_eq!(score("ילדה", &f), BASELINE + GENDER_BONUS);

        let f = features(&[("binyan", "nifal")]);
        assert_eq!(score("נכתב", &f), BASELINE + PATTERN_BONUS);

        let f = features(&[("gender", "masculine"), ("binyan", "hitpael")]);
        assert_eq!(score("התלבש", &f), BASELINE + GENDER_BONUS + PATTERN_BONUS);
    }

    #[test]
    fn unknown_or_absent_features_earn_nothing() {
        let f = features(&[("gender", "unknown"), ("binyan", "unknown")]);
        assert_eq!(score("ספר", &f), BASELINE);

        // Absent keys are not "recognized" either.
        let f = features(&[("pos", "NOUN")]);
        assert_eq!(score("book", &f), BASELINE);
    }

    #[test]
    fn short_tokens_are_penalized() {
        assert_eq!(score("ו", &Features::new()), BASELINE - SHORT_TOKEN_PENALTY);
        assert_eq!(score("", &Features::new()), BASELINE - SHORT_TOKEN_PENALTY);
        // Two chars clear the bar.
        assert_eq!(score("ab", &Features::new()), BASELINE);
    }

    #[test]
    fn short_token_length_counts_chars_not_bytes() {
        // One Hebrew char is two bytes; still short.
        assert_eq!(score("ב", &Features::new()), BASELINE - SHORT_TOKEN_PENALTY);
        // Two Hebrew chars are four bytes; not short.
        assert_eq!(score("בא", &Features::new()), BASELINE);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let stacked = features(&[("gender", "feminine"), ("binyan", "piel")]);
        let s = score("", &stacked);
        assert!((0.0..=1.0).contains(&s));
        assert!((0.0..=1.0).contains(&score("x", &Features::new())));
    }

    #[test]
    fn explain_buckets_with_exclusive_thresholds() {
        assert_eq!(explain(0.9), HIGH_CONFIDENCE);
        assert_eq!(explain(0.8), MEDIUM_CONFIDENCE);
        assert_eq!(explain(0.6), MEDIUM_CONFIDENCE);
        assert_eq!(explain(0.5), LOW_CONFIDENCE);
        assert_eq!(explain(0.0), LOW_CONFIDENCE);
    }

    #[test]
    fn maximum_score_still_buckets_medium() {
        // 0.5 + 0.2 + 0.1 lands a hair under 0.8 in f64.
        let f = features(&[("gender", "masculine"), ("binyan", "hitpael")]);
        let s = score("התלבש", &f);
        assert!(s < 0.8);
        assert_eq!(explain(s), MEDIUM_CONFIDENCE);
    }

    #[test]
    fn ensemble_empty_is_zero() {
        assert_eq!(ensemble_score(&[], None), 0.0);
        assert_eq!(ensemble_score(&[], Some(&[1.0])), 0.0);
    }

    #[test]
    fn ensemble_single_weighted_is_identity() {
        assert_eq!(ensemble_score(&[0.7], Some(&[1.0])), 0.7);
        assert_eq!(ensemble_score(&[0.0], Some(&[1.0])), 0.0);
    }

    #[test]
    fn ensemble_weighted_mean() {
        let s = ensemble_score(&[1.0, 0.0], Some(&[3.0, 1.0]));
        assert!((s - 0.75).abs() < 1e-12);
    }

    #[test]
    fn ensemble_falls_back_to_plain_mean() {
        // Length mismatch ignores the weights.
        let s = ensemble_score(&[0.4, 0.8], Some(&[1.0]));
        assert!((s - 0.6).abs() < 1e-12);
        // Zero mass does too.
        let s = ensemble_score(&[0.4, 0.8], Some(&[0.0, 0.0]));
        assert!((s - 0.6).abs() < 1e-12);
        let s = ensemble_score(&[0.4, 0.8], None);
        assert!((s - 0.6).abs() < 1e-12);
    }
}
