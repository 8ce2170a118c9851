// src/tokenize.rs
// Whitespace/punctuation tokenization and rule-based word segmentation.
// Tokens borrow from the input; segmentation owns its strings because it
// synthesizes hyphen-joined candidates.

use smallvec::{SmallVec, smallvec};

use crate::context::Context;

/// Split normalized text into word and punctuation tokens.
///
/// Profile punctuation becomes standalone single-char tokens; everything
/// else splits on whitespace. Tokens are subslices of `text`, in input
/// order, never empty.
pub fn tokenize<'a>(text: &'a str, ctx: &Context) -> Vec<&'a str> {
    let entry = ctx.entry;
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
        } else if entry.is_punctuation(c) {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            tokens.push(&text[i..i + c.len_utf8()]);
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

/// One alternative reading attached to a `Segmentation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub segment: String,
    pub confidence: f64,
}

/// Result of segmenting a single token.
///
/// Invariants: `segments` starts with the original token; `best` equals
/// the last element of `segments` (the affix split when one was found,
/// the token itself otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub segments: SmallVec<[String; 2]>,
    pub best: String,
    pub confidence: f64,
    pub alternatives: SmallVec<[Alternative; 1]>,
}

impl Segmentation {
    /// True when an affix split was found.
    #[inline]
    pub fn is_split(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Try to split a token into `prefix-stem` / `stem-suffix` /
/// `prefix-stem-suffix` using the profile's affix tables.
///
/// Each side is scanned once, front to back; the first affix that leaves
/// a stem of at least `min_stem` chars wins. Length gates count chars,
/// not bytes.
pub fn segment(token: &str, ctx: &Context) -> Segmentation {
    let policy = &ctx.entry.segment;
    let mut segments: SmallVec<[String; 2]> = smallvec![token.to_string()];
    let mut alternatives: SmallVec<[Alternative; 1]> = SmallVec::new();

    let mut stem = token;
    let mut prefix: Option<&'static str> = None;
    let mut suffix: Option<&'static str> = None;

    if token.chars().count() >= policy.min_token {
        for &candidate in policy.prefixes {
            if let Some(rest) = stem.strip_prefix(candidate)
                && rest.chars().count() >= policy.min_stem
            {
                prefix = Some(candidate);
                stem = rest;
                break;
            }
        }
    }

    for rule in policy.suffixes {
        if let Some(veto) = rule.unless_ends
            && stem.ends_with(veto)
        {
            continue;
        }
        if let Some(rest) = stem.strip_suffix(rule.affix)
            && rest.chars().count() >= rule.min_stem
        {
            suffix = Some(rule.affix);
            stem = rest;
            break;
        }
    }

    let (best, confidence) = if prefix.is_some() || suffix.is_some() {
        let mut parts: SmallVec<[&str; 3]> = SmallVec::new();
        if let Some(p) = prefix {
            parts.push(p);
        }
        parts.push(stem);
        if let Some(s) = suffix {
            parts.push(s);
        }
        let joined = parts.join("-");
        if let Some(alt) = policy.alt {
            alternatives.push(Alternative {
                segment: joined.clone(),
                confidence: alt,
            });
        }
        segments.push(joined.clone());
        (joined, policy.hit)
    } else {
        (token.to_string(), policy.miss)
    };

    Segmentation {
        segments,
        best,
        confidence,
        alternatives,
    }
}
