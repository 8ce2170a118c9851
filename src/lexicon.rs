// src/lexicon.rs
// Dictionary storage and loading. A lexicon maps headwords to feature
// maps; lookups are exact (case folding happens in the analyzer, per
// profile). Loading never fails: malformed sources degrade to fewer
// entries, with the reason logged.

use std::{collections::BTreeMap, fs, io, path::Path, sync::LazyLock};

use serde_json::Value;
use tracing::{debug, warn};

use crate::lang::Lang;

/// Morphological feature map of one analysis: `"gender" => "feminine"`,
/// `"pos" => "NOUN"` and so on. Ordered so serialized output is stable.
pub type Features = BTreeMap<String, String>;

static BUILTIN_HEB: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_json(include_str!("../data/heb.json")));
static BUILTIN_TLH: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_json(include_str!("../data/tlh.json")));
static BUILTIN_ENG: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_json(include_str!("../data/eng.json")));
static EMPTY: LazyLock<Lexicon> = LazyLock::new(Lexicon::default);

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: BTreeMap<String, Features>,
}

impl Lexicon {
    /// The dictionary compiled into the crate for `lang`.
    pub fn builtin(lang: Lang) -> &'static Lexicon {
        match lang.code() {
            "HEB" => &BUILTIN_HEB,
            "TLH" => &BUILTIN_TLH,
            "ENG" => &BUILTIN_ENG,
            _ => &EMPTY,
        }
    }

    /// Parse a dictionary from JSON source.
    ///
    /// The expected shape is an object of objects with string values.
    /// Anything else is skipped entry by entry so one bad record cannot
    /// take the whole dictionary down.
    pub fn from_json(source: &str) -> Self {
        let mut entries = BTreeMap::new();

        let root: Value = match serde_json::from_str(source) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "dictionary is not valid JSON, starting empty");
                return Self { entries };
            }
        };
        let Value::Object(map) = root else {
            warn!("dictionary root is not an object, starting empty");
            return Self { entries };
        };

        for (headword, value) in map {
            let Value::Object(raw) = value else {
                warn!(headword = %headword, "skipping non-object dictionary entry");
                continue;
            };
            let mut features = Features::new();
            for (key, value) in raw {
                match value {
                    Value::String(s) => {
                        features.insert(key, s);
                    }
                    _ => {
                        warn!(headword = %headword, key = %key, "skipping non-string feature");
                    }
                }
            }
            if features.is_empty() {
                warn!(headword = %headword, "skipping dictionary entry with no usable features");
                continue;
            }
            entries.insert(headword, features);
        }

        Self { entries }
    }

    /// Load `<dir>/<code>.json` (code lowercased) for `lang`. A missing
    /// file yields an empty lexicon; so does unreadable content.
    pub fn from_dir(dir: impl AsRef<Path>, lang: Lang) -> Self {
        let path = dir.as_ref().join(format!("{}.json", lang.code().to_lowercase()));
        match fs::read_to_string(&path) {
            Ok(source) => {
                let lexicon = Self::from_json(&source);
                debug!(path = %path.display(), entries = lexicon.len(), "loaded dictionary");
                lexicon
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no dictionary file, starting empty");
                Self::default()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read dictionary, starting empty");
                Self::default()
            }
        }
    }

    /// Build a lexicon from in-memory entries. Mostly for tests and
    /// embedding callers.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Features)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Exact headword lookup.
    #[inline]
    pub fn lookup(&self, headword: &str) -> Option<&Features> {
        self.entries.get(headword)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn headwords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ENG, HEB, TLH};

    #[test]
    fn parses_well_formed_dictionaries() {
        let lex = Lexicon::from_json(r#"{"yaj": {"pos": "VERB", "translation": "understand"}}"#);
        assert_eq!(lex.len(), 1);
        let features = lex.lookup("yaj").unwrap();
        assert_eq!(features["pos"], "VERB");
        assert_eq!(features["translation"], "understand");
    }

    #[test]
    fn invalid_json_degrades_to_empty() {
        assert!(Lexicon::from_json("not json at all").is_empty());
        assert!(Lexicon::from_json("[1, 2, 3]").is_empty());
        assert!(Lexicon::from_json("").is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let lex = Lexicon::from_json(
            r#"{
                "good": {"pos": "NOUN"},
                "bad_scalar": 42,
                "bad_values": {"pos": 1, "count": null},
                "half_good": {"pos": "VERB", "weight": 3}
            }"#,
        );
        assert_eq!(lex.len(), 2);
        assert!(lex.lookup("good").is_some());
        assert!(lex.lookup("bad_scalar").is_none());
        assert!(lex.lookup("bad_values").is_none());
        // Non-string values vanish, string ones survive.
        let half = lex.lookup("half_good").unwrap();
        assert_eq!(half.len(), 1);
        assert_eq!(half["pos"], "VERB");
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let lex = Lexicon::from_json(r#"{"nuqneH": {"type": "greeting"}}"#);
        assert!(lex.lookup("nuqneH").is_some());
        assert!(lex.lookup("nuqneh").is_none());
        assert!(lex.lookup("NUQNEH").is_none());
    }

    #[test]
    fn builtin_dictionaries_carry_the_expected_anchors() {
        assert_eq!(
            Lexicon::builtin(TLH).lookup("nuqneH").unwrap()["type"],
            "greeting"
        );
        assert_eq!(
            Lexicon::builtin(ENG).lookup("cats").unwrap()["number"],
            "plural"
        );
        assert!(Lexicon::builtin(HEB).lookup("ספר").is_some());
        for lang in [HEB, TLH, ENG] {
            assert!(!Lexicon::builtin(lang).is_empty());
        }
    }

    #[test]
    fn from_dir_loads_and_degrades() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tlh.json"),
            r#"{"ghojwI'": {"pos": "NOUN", "translation": "student"}}"#,
        )
        .unwrap();

        let lex = Lexicon::from_dir(dir.path(), TLH);
        assert_eq!(lex.len(), 1);
        assert!(lex.lookup("ghojwI'").is_some());

        // No heb.json in the dir: empty, not an error.
        assert!(Lexicon::from_dir(dir.path(), HEB).is_empty());
    }

    #[test]
    fn from_entries_builds_directly() {
        let features: Features =
            [("pos".to_string(), "NOUN".to_string())].into_iter().collect();
        let lex = Lexicon::from_entries([("bet".to_string(), features)]);
        assert_eq!(lex.headwords().collect::<Vec<_>>(), vec!["bet"]);
    }
}
