use crate::lang::{
    Direction, FallbackRules, FeatureSet, Lang, LangEntry, NormalizePolicy, PatternRule,
    ScriptCheck, SegmentPolicy, SuffixRule,
};

use paste::paste;
use phf::{Map, phf_map};

/// ---------------------------------------------------------------------------
///    Macro – generates everything from a single table
/// ---------------------------------------------------------------------------
macro_rules! define_languages {
($(
        $code:ident, $code_str:literal, $name:literal,
        direction: $direction:expr,
        font: $font:literal,
        example: $example:literal,
        script: $script:expr,
        nfkc: $nfkc:expr,
        marks: $marks:expr,
        punctuation: [ $($p:literal),* $(,)? ],
        prefixes: [ $($pre:literal),* $(,)? ],
        suffixes: [ $( ($sa:literal, $sm:expr, $su:expr) ),* $(,)? ],
        min_token: $min_token:expr,
        min_stem: $min_stem:expr,
        hit: $hit:expr,
        miss: $miss:expr,
        alt: $alt:expr,
        fold_lookup: $fold:expr,
        defaults: [ $($dk:literal => $dv:literal),* $(,)? ],
        suffix_features: [ $( $sfa:literal => [ $($sfk:literal => $sfv:literal),* $(,)? ] ),* $(,)? ],
        prefix_features: [ $( $pfa:literal => [ $($pfk:literal => $pfv:literal),* $(,)? ] ),* $(,)? ],
        pattern_key: $pk:literal,
        pattern_default: $pd:literal,
        pattern_prefixes: [ $($ppa:literal => $ppv:literal),* $(,)? ]
    ),* $(,)?) => {
        // Public `Lang` constants
        $(
            pub const $code: Lang = Lang { code: $code_str, name: $name };
        )*

        // Per-language static data modules
        $(
            paste! {
                mod [<$code:lower _data>] {
                    use super::*;

                    pub static PUNCTUATION: &[char] = &[$($p),*];

                    pub static PREFIXES: &[&str] = &[$($pre),*];

                    pub static SUFFIXES: &[SuffixRule] = &[
                        $(SuffixRule { affix: $sa, min_stem: $sm, unless_ends: $su }),*
                    ];

                    pub static DEFAULTS: &[(&str, &str)] = &[$(($dk, $dv)),*];

                    pub static SUFFIX_FEATURES: &[(&str, FeatureSet)] = &[
                        $( ($sfa, &[$(($sfk, $sfv)),*]) ),*
                    ];

                    pub static PREFIX_FEATURES: &[(&str, FeatureSet)] = &[
                        $( ($pfa, &[$(($pfk, $pfv)),*]) ),*
                    ];

                    pub static PATTERN_KEY: &str = $pk;
                    pub static PATTERN_DEFAULT: &str = $pd;
                    pub static PATTERN_PREFIXES: &[(&str, &str)] = &[$(($ppa, $ppv)),*];
                }
            }
        )*

        // Global lookup table (public)
        paste! {
            pub static LANG_TABLE: Map<&'static str, LangEntry> = phf_map! {
                $(
                    $code_str => LangEntry {
                        direction: $direction,
                        font: $font,
                        example: $example,
                        script: $script,
                        normalize: NormalizePolicy { nfkc: $nfkc, marks: $marks },
                        punctuation: [<$code:lower _data>]::PUNCTUATION,
                        segment: SegmentPolicy {
                            prefixes: [<$code:lower _data>]::PREFIXES,
                            suffixes: [<$code:lower _data>]::SUFFIXES,
                            min_token: $min_token,
                            min_stem: $min_stem,
                            hit: $hit,
                            miss: $miss,
                            alt: $alt,
                        },
                        fallback: FallbackRules {
                            defaults: [<$code:lower _data>]::DEFAULTS,
                            suffix_features: [<$code:lower _data>]::SUFFIX_FEATURES,
                            prefix_features: [<$code:lower _data>]::PREFIX_FEATURES,
                            pattern: if [<$code:lower _data>]::PATTERN_KEY.is_empty() {
                                None
                            } else {
                                Some(PatternRule {
                                    key: [<$code:lower _data>]::PATTERN_KEY,
                                    default: [<$code:lower _data>]::PATTERN_DEFAULT,
                                    prefixes: [<$code:lower _data>]::PATTERN_PREFIXES,
                                })
                            },
                        },
                        fold_lookup: $fold,
                    }
                ),*
            };
        }

        // Helper: `Lang::from_code`
        pub fn from_code(code: &str) -> Option<Lang> {
            let upper = code.to_uppercase();
            match upper.as_str() {
                $(
                    $code_str => Some($code),
                )*
                _ => None,
            }
        }

        pub fn all_langs() -> &'static [Lang] {
            &[$($code),*]
        }
    };
}

// ---------------------------------------------------------------------------
//    Language definitions (single source of truth)
//
//    Affix scan order is load-bearing: prefix and suffix tables are walked
//    front to back and the first rule that leaves a viable stem wins.
//    Confidences are the fixed per-language values reported by `segment`.
// ---------------------------------------------------------------------------
define_languages! {
    HEB, "HEB", "Hebrew",
        direction: Direction::Rtl,
        font: "Courier New",
        example: "קראתי ספר מעניין אתמול",
        script: ScriptCheck::Block {
            start: '\u{0590}',
            end: '\u{05FF}',
            low_ratio_warning: "Text contains mostly non-Hebrew characters",
        },
        nfkc: true,
        marks: Some(('\u{0591}', '\u{05C7}')),
        punctuation: [ '.', ',', '!', '?', '(', ')', '[', ']', '{', '}', ';', ':', '"', '\'' ],
        // Single-letter prepositional/article prefixes
        prefixes: [ "ה", "ו", "ב", "ל", "מ", "ש", "כ" ],
        suffixes: [],
        min_token: 4,
        min_stem: 2,
        hit: 1.0,
        miss: 1.0,
        alt: Some(0.7),
        fold_lookup: false,
        defaults: [
            "gender" => "unknown",
            "number" => "singular",
            "person" => "unknown",
            "tense" => "unknown",
            "binyan" => "unknown",
            "state" => "absolute",
            "definiteness" => "indefinite",
        ],
        suffix_features: [
            "ים" => [ "gender" => "masculine", "number" => "plural" ],
            "ות" => [ "gender" => "feminine", "number" => "plural" ],
            "ה" => [ "gender" => "feminine" ],
        ],
        prefix_features: [
            "ה" => [ "definiteness" => "definite" ],
        ],
        pattern_key: "binyan",
        pattern_default: "pahal",
        pattern_prefixes: [ "הת" => "hitpael", "נ" => "nifal", "מ" => "piel" ],

    TLH, "TLH", "Klingon",
        direction: Direction::Ltr,
        font: "Impact, Charcoal, sans-serif",
        example: "tlhIngan maH nuqneH",
        script: ScriptCheck::Charset {
            extra: &['\''],
            invalid_warning: "Contains invalid characters for Klingon transcription",
        },
        // Case carries meaning in the transcription (q vs Q), so no
        // folding or mark handling of any kind.
        nfkc: false,
        marks: None,
        punctuation: [ '.', ',', '!', '?' ],
        // Pronominal prefixes, subject/object markers first
        prefixes: [
            "jI", "qa", "vI", "Da", "wI", "bo", "lu",
            "ma", "cho", "ju", "nu", "Sa", "pI", "HI", "gho", "yI", "pe", "tI",
        ],
        // Negation/emphatic, aspect, then noun suffixes
        suffixes: [
            ("be'", 2, None), ("qu'", 2, None), ("Ha'", 2, None),
            ("pu'", 2, None), ("taH", 2, None), ("lI'", 2, None),
            ("Daq", 2, None), ("vo'", 2, None), ("mo'", 2, None),
        ],
        min_token: 0,
        min_stem: 2,
        hit: 0.8,
        miss: 0.5,
        alt: None,
        fold_lookup: false,
        defaults: [
            "pos" => "UNKNOWN",
            "translation" => "?",
            "type" => "unknown",
        ],
        suffix_features: [],
        prefix_features: [],
        pattern_key: "",
        pattern_default: "",
        pattern_prefixes: [],

    ENG, "ENG", "English",
        direction: Direction::Ltr,
        font: "Arial, sans-serif",
        example: "The cats played in the garden",
        script: ScriptCheck::Letters {
            low_ratio_warning: "Text does not appear to be English",
        },
        nfkc: false,
        marks: None,
        punctuation: [ '.', ',', '!', '?', '(', ')', '[', ']', '{', '}', ';', ':', '"', '\'' ],
        prefixes: [],
        // "ss" veto keeps words like "glass" whole
        suffixes: [
            ("ing", 2, None),
            ("ed", 2, None),
            ("s", 3, Some("ss")),
        ],
        min_token: 0,
        min_stem: 2,
        hit: 0.9,
        miss: 0.9,
        alt: None,
        fold_lookup: true,
        defaults: [
            "pos" => "UNKNOWN",
            "type" => "unknown",
        ],
        suffix_features: [
            "ing" => [ "pos" => "VERB", "tense" => "present participle" ],
            "ed" => [ "pos" => "VERB", "tense" => "past" ],
            "ly" => [ "pos" => "ADV" ],
        ],
        prefix_features: [],
        pattern_key: "",
        pattern_default: "",
        pattern_prefixes: [],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_lang_const() {
        assert_eq!(LANG_TABLE.len(), all_langs().len());
        for &lang in all_langs() {
            assert!(LANG_TABLE.get(lang.code()).is_some(), "{} missing", lang.code());
        }
    }

    #[test]
    fn from_code_roundtrip() {
        for &lang in all_langs() {
            assert_eq!(from_code(lang.code()), Some(lang));
            assert_eq!(from_code(&lang.code().to_lowercase()), Some(lang));
        }
        assert_eq!(from_code("FRA"), None);
        assert_eq!(from_code(""), None);
    }

    #[test]
    fn hebrew_affixes_live_inside_the_block() {
        let entry = LANG_TABLE.get("HEB").unwrap();
        for prefix in entry.segment.prefixes {
            for c in prefix.chars() {
                assert!(entry.in_script(c), "prefix {prefix} outside block");
            }
        }
        for (suffix, _) in entry.fallback.suffix_features {
            for c in suffix.chars() {
                assert!(entry.in_script(c), "suffix {suffix} outside block");
            }
        }
    }

    #[test]
    fn klingon_affixes_fit_the_transcription_alphabet() {
        let entry = LANG_TABLE.get("TLH").unwrap();
        for prefix in entry.segment.prefixes {
            assert!(prefix.chars().all(|c| entry.in_script(c)), "bad prefix {prefix}");
        }
        for rule in entry.segment.suffixes {
            assert!(rule.affix.chars().all(|c| entry.in_script(c)), "bad suffix {}", rule.affix);
        }
    }

    #[test]
    fn segment_confidences_are_probabilities() {
        for &lang in all_langs() {
            let policy = &lang.entry().segment;
            assert!((0.0..=1.0).contains(&policy.hit));
            assert!((0.0..=1.0).contains(&policy.miss));
            if let Some(alt) = policy.alt {
                assert!((0.0..=1.0).contains(&alt));
            }
        }
    }

    #[test]
    fn suffix_rules_always_keep_a_stem() {
        for &lang in all_langs() {
            for rule in lang.entry().segment.suffixes {
                assert!(rule.min_stem >= 1, "{} rule strips to nothing", rule.affix);
            }
        }
    }

    #[test]
    fn english_pattern_tables_are_absent() {
        assert!(LANG_TABLE.get("ENG").unwrap().fallback.pattern.is_none());
        assert!(LANG_TABLE.get("TLH").unwrap().fallback.pattern.is_none());
        let heb = LANG_TABLE.get("HEB").unwrap().fallback.pattern.unwrap();
        assert_eq!(heb.key, "binyan");
        assert_eq!(heb.default, "pahal");
        assert_eq!(heb.prefixes.len(), 3);
    }

    #[test]
    fn display_metadata_is_populated() {
        for &lang in all_langs() {
            let entry = lang.entry();
            assert!(!entry.font.is_empty());
            assert!(!entry.example.is_empty());
            assert!(!entry.punctuation.is_empty());
        }
        assert_eq!(LANG_TABLE.get("HEB").unwrap().direction, Direction::Rtl);
        assert_eq!(LANG_TABLE.get("TLH").unwrap().direction, Direction::Ltr);
    }
}
