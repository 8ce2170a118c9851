// src/morphology.rs
// Feature inference for one token: dictionary first, then the hyphen
// parts of its segmentation, then the profile's rule fallback. Always
// returns a non-empty mapping.

use std::borrow::Cow;

use crate::{
    context::Context,
    lang::LangEntry,
    lexicon::{Features, Lexicon},
};

/// Feature key carrying the provenance note when features came from a
/// sub-token root instead of the full token.
pub const NOTES_KEY: &str = "notes";
pub const ROOT_NOTE: &str = "Root found in complex word";

/// Infer morphological features for `token`.
///
/// Step 1: exact dictionary lookup (folded first when the profile says
/// so) returns the stored mapping verbatim. Step 2: when `segmentation`
/// contains a hyphen split, each part is looked up in order; the first
/// hit returns its mapping plus a provenance note. Step 3: rule-based
/// fallback from the profile tables, never empty.
pub fn analyze(
    token: &str,
    segmentation: Option<&str>,
    lexicon: &Lexicon,
    ctx: &Context,
) -> Features {
    let entry = ctx.entry;

    if let Some(features) = lexicon.lookup(&lookup_key(token, entry)) {
        return features.clone();
    }

    if let Some(seg) = segmentation
        && seg.contains('-')
    {
        for part in seg.split('-') {
            if let Some(features) = lexicon.lookup(&lookup_key(part, entry)) {
                let mut found = features.clone();
                found.insert(NOTES_KEY.to_string(), ROOT_NOTE.to_string());
                return found;
            }
        }
    }

    fallback(token, entry)
}

#[inline]
fn lookup_key<'a>(word: &'a str, entry: &LangEntry) -> Cow<'a, str> {
    if entry.fold_lookup {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Rule-based fallback. Surface-pattern rules look at the original
/// token, not a folded copy.
fn fallback(token: &str, entry: &LangEntry) -> Features {
    let rules = &entry.fallback;

    let mut features: Features = rules
        .defaults
        .iter()
        .map(|&(key, value)| (key.to_string(), value.to_string()))
        .collect();

    for &(suffix, set) in rules.suffix_features {
        if token.ends_with(suffix) {
            for &(key, value) in set {
                features.insert(key.to_string(), value.to_string());
            }
            break;
        }
    }

    for &(prefix, set) in rules.prefix_features {
        if token.starts_with(prefix) {
            for &(key, value) in set {
                features.insert(key.to_string(), value.to_string());
            }
        }
    }

    if let Some(pattern) = rules.pattern {
        let category = pattern
            .prefixes
            .iter()
            .find(|(prefix, _)| token.starts_with(prefix))
            .map(|&(_, category)| category)
            .unwrap_or(pattern.default);
        features.insert(pattern.key.to_string(), category.to_string());
    }

    features
}
