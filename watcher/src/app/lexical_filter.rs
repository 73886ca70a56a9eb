//! Local lexical filter
//!
//! First-pass screen that runs before any external call. A post only reaches
//! the assessment service when this filter trips, which keeps classifier
//! usage proportional to suspicious traffic rather than total traffic.
//!
//! Matching is a case-insensitive substring search with no word boundaries:
//! "ass" matches "assignment". False positives of that kind are expected.

/// Words screened for when no wordlist is configured
pub const DEFAULT_FLAGGED_WORDS: &[&str] = &[
    "fuck", "shit", "bitch", "ass", "asshole", "damn", "crap", "bastard", "dick", "piss", "cunt",
    "faggot", "retard",
];

/// Case-insensitive substring filter over a fixed wordlist
#[derive(Debug, Clone)]
pub struct LexicalFilter {
    words: Vec<String>,
}

impl LexicalFilter {
    /// Build a filter from a wordlist. Blank entries are dropped since an
    /// empty needle would match every text.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// True if `text` contains at least one configured word
    pub fn contains_flagged(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.words.iter().any(|w| haystack.contains(w.as_str()))
    }

    /// Every configured word found in `text`, in wordlist order
    pub fn matches(&self, text: &str) -> Vec<&str> {
        let haystack = text.to_lowercase();
        self.words
            .iter()
            .filter(|w| haystack.contains(w.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl Default for LexicalFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FLAGGED_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_configured_word() {
        let filter = LexicalFilter::new(["darn"]);
        assert!(filter.contains_flagged("well darn it"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = LexicalFilter::new(["Darn"]);
        assert!(filter.contains_flagged("DARN IT"));
        assert!(filter.contains_flagged("darn it"));
    }

    #[test]
    fn substring_inside_larger_word_matches() {
        let filter = LexicalFilter::new(["ass"]);
        assert!(filter.contains_flagged("I have an assignment"));
    }

    #[test]
    fn clean_text_passes() {
        let filter = LexicalFilter::default();
        assert!(!filter.contains_flagged("Great game last night, well played everyone."));
    }

    #[test]
    fn empty_wordlist_flags_nothing() {
        let filter = LexicalFilter::new(Vec::<String>::new());
        assert!(!filter.contains_flagged("anything at all"));
    }

    #[test]
    fn blank_entries_are_ignored() {
        let filter = LexicalFilter::new(["", "  ", "heck"]);
        assert_eq!(filter.words(), &["heck".to_string()]);
        assert!(!filter.contains_flagged("clean text"));
    }

    #[test]
    fn matches_lists_every_hit() {
        let filter = LexicalFilter::new(["crap", "damn", "heck"]);
        assert_eq!(filter.matches("Damn, what CRAP"), vec!["crap", "damn"]);
        assert!(filter.matches("fine").is_empty());
    }

    #[test]
    fn default_wordlist_is_loaded() {
        let filter = LexicalFilter::default();
        assert_eq!(filter.words().len(), DEFAULT_FLAGGED_WORDS.len());
        assert!(filter.contains_flagged("what a load of crap"));
    }
}
