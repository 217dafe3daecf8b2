//! "Did you mean?" suggestions and weighted completions.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::trie::{Trie, TrieConfig};

/// A suggested word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The stored word (lower-cased if the trie folds case).
    pub word: String,
    /// Weight stored for the word.
    pub weight: f64,
    /// Edit distance between the word and the input it answers. Always `0`
    /// for completions, which extend their prefix without editing it.
    pub distance: usize,
}

/// Suggests corrections and completions from a [`Trie`].
#[derive(Debug, Clone)]
pub struct Suggester {
    trie: Trie,
    budget: Duration,
}

impl Suggester {
    pub fn new(trie: Trie, budget: Duration) -> Self {
        Self { trie, budget }
    }

    /// Build an empty suggester; the budget comes from `match_budget_ms`.
    pub fn from_config(config: TrieConfig) -> Result<Self> {
        let budget = Duration::from_millis(config.match_budget_ms);
        Ok(Self::new(Trie::with_config(config)?, budget))
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn trie_mut(&mut self) -> &mut Trie {
        &mut self.trie
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Add a word, or replace its weight.
    pub fn add(&mut self, word: &str, weight: f64) {
        self.trie.insert(word, weight);
    }

    /// A correction for `input`.
    ///
    /// Returns `None` when `input` is already a known word, or when no stored
    /// word is closer to it than the empty string.
    pub fn did_you_mean(&self, input: &str) -> Option<Suggestion> {
        if input.is_empty() || self.trie.contains(input) {
            return None;
        }

        let best = self.trie.find_best_match(input, self.budget);
        if best.word.is_empty() {
            debug!("no suggestion for {input:?}");
            return None;
        }

        Some(Suggestion {
            word: best.word,
            weight: best.weight,
            distance: best.distance,
        })
    }

    /// Up to `n` completions of `prefix`, heaviest first.
    pub fn complete(&self, prefix: &str, n: usize) -> Vec<Suggestion> {
        self.trie
            .top_n_weighted(prefix, n)
            .into_iter()
            .map(|(word, weight)| Suggestion {
                word,
                weight,
                distance: 0,
            })
            .collect()
    }
}

impl From<Trie> for Suggester {
    fn from(trie: Trie) -> Self {
        Self::new(trie, Duration::from_millis(crate::trie::DEFAULT_MATCH_BUDGET_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggester() -> Suggester {
        let trie: Trie = [
            ("search", 10.0),
            ("seared", 2.0),
            ("sear", 4.0),
            ("engine", 7.0),
        ]
        .into_iter()
        .collect();
        Suggester::from(trie)
    }

    #[test]
    fn test_did_you_mean_corrects_typo() {
        let suggester = suggester();
        let suggestion = suggester.did_you_mean("serch").unwrap();
        assert_eq!(suggestion.word, "search");
        assert_eq!(suggestion.weight, 10.0);
        assert_eq!(suggestion.distance, 1);
    }

    #[test]
    fn test_did_you_mean_skips_known_words() {
        let suggester = suggester();
        assert!(suggester.did_you_mean("engine").is_none());
        assert!(suggester.did_you_mean("").is_none());
    }

    #[test]
    fn test_did_you_mean_without_candidates() {
        let suggester = Suggester::from(Trie::new(true));
        assert!(suggester.did_you_mean("anything").is_none());
    }

    #[test]
    fn test_complete() {
        let suggester = suggester();
        let completions = suggester.complete("sea", 2);
        assert_eq!(
            completions,
            vec![
                Suggestion {
                    word: "search".into(),
                    weight: 10.0,
                    distance: 0
                },
                Suggestion {
                    word: "sear".into(),
                    weight: 4.0,
                    distance: 0
                },
            ]
        );
        assert!(suggester.complete("xyz", 3).is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = TrieConfig::builder()
            .case_sensitive(false)
            .match_budget_ms(5)
            .build();
        let mut suggester = Suggester::from_config(config).unwrap();
        assert_eq!(suggester.budget(), Duration::from_millis(5));

        suggester.add("Engine", 1.0);
        suggester.trie_mut().insert("Search", 2.0);
        assert_eq!(suggester.trie().len(), 2);
        assert_eq!(suggester.did_you_mean("ENGNE").unwrap().word, "engine");
    }
}
