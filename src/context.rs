// src/context.rs
// This file is the single source of truth for language configuration in hot paths.
// It is deliberately tiny, Copy, and contains only 'static data.

use crate::lang::{DEFAULT_LANG, Lang, LangEntry};

/// Runtime context passed to every pipeline step.
///
/// Contains:
/// - `lang`: human identifier (for logging, metrics, debugging)
/// - `entry`: the actual language rules used in every hot path (zero-cost)
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub lang: Lang,
    pub entry: &'static LangEntry,
}

impl Default for Context {
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_LANG)
    }
}

impl Context {
    /// Create a context using the canonical static data for a language.
    #[inline(always)]
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            entry: lang.entry(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HEB, TLH};

    #[test]
    fn default_context_is_hebrew() {
        let ctx = Context::default();
        assert_eq!(ctx.lang, HEB);
        assert_eq!(ctx.entry.direction, crate::lang::Direction::Rtl);
    }

    #[test]
    fn context_carries_the_table_entry() {
        let ctx = Context::new(TLH);
        assert_eq!(ctx.entry.segment.prefixes.len(), 18);
        assert_eq!(ctx.entry.segment.suffixes.len(), 9);
    }
}
