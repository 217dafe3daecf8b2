//! Frequency-weighted prefix tree.
//!
//! [`Trie`] stores string keys with a weight (a frequency or importance
//! score) and answers three kinds of questions:
//!
//! - [`Trie::weight`]: the weight of an exact key, `0.0` when absent
//! - [`Trie::top_n`]: the heaviest keys under a prefix
//! - [`Trie::best_match`]: the closest key to a possibly misspelled word
//!
//! Every internal node caches the maximum weight of the keys below it, which
//! lets the last two run best-first instead of enumerating the subtree.
//!
//! # Thread safety
//!
//! A `Trie` has no internal locking. Mutation needs `&mut self`, so sharing
//! one across threads requires an external lock such as
//! `std::sync::RwLock<Trie>`.

mod config;
mod node;
mod search;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use config::{DEFAULT_CHECK_INTERVAL, DEFAULT_MATCH_BUDGET_MS, TrieConfig, TrieConfigBuilder};

use crate::error::Result;
use crate::util::levenshtein::{EditDistance, Levenshtein};
use node::{InternalNode, Leaves};
pub(crate) use search::BestMatch;

/// A dynamically growing, frequency-weighted trie.
///
/// ```
/// use saca::Trie;
///
/// let mut trie = Trie::new(true);
/// trie.insert("cat", 5.0);
/// trie.insert("cap", 8.0);
/// trie.insert("car", 3.0);
///
/// assert_eq!(trie.weight("cat"), 5.0);
/// assert_eq!(trie.top_n("ca", 1), vec!["cap"]);
/// assert_eq!(trie.best_match("cst", 100), "cat");
/// ```
pub struct Trie {
    root: InternalNode,
    size: usize,
    distinct: usize,
    case_sensitive: bool,
    check_interval: usize,
    metric: Arc<dyn EditDistance>,
}

impl Trie {
    /// Create an empty trie using Levenshtein distance for matching.
    ///
    /// When `case_sensitive` is `false`, keys and queries are lower-cased.
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            root: InternalNode::default(),
            size: 0,
            distinct: 0,
            case_sensitive,
            check_interval: DEFAULT_CHECK_INTERVAL,
            metric: Arc::new(Levenshtein),
        }
    }

    /// Create an empty trie from a validated configuration.
    pub fn with_config(config: TrieConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            case_sensitive: config.case_sensitive,
            check_interval: config.check_interval,
            metric: config.metric.build(),
            ..Self::new(config.case_sensitive)
        })
    }

    /// Replace the edit distance used by [`Trie::best_match`].
    pub fn with_metric(mut self, metric: Arc<dyn EditDistance>) -> Self {
        self.metric = metric;
        self
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Insert `word`, or overwrite its weight if it is already present.
    ///
    /// Empty words are ignored.
    pub fn insert(&mut self, word: &str, weight: f64) {
        if word.is_empty() {
            return;
        }
        let word = self.normalize(word);
        let chars: Vec<char> = word.chars().collect();
        if self.root.insert(&chars, &word, weight) {
            self.distinct += 1;
        }
        self.size += 1;
    }

    /// Weight stored for `word`, or `0.0` if it was never inserted.
    pub fn weight(&self, word: &str) -> f64 {
        if word.is_empty() {
            return 0.0;
        }
        let chars: Vec<char> = self.normalize(word).chars().collect();
        self.root.lookup(&chars).map_or(0.0, |leaf| leaf.weight)
    }

    /// Whether `word` was inserted, regardless of its weight.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let chars: Vec<char> = self.normalize(word).chars().collect();
        self.root.lookup(&chars).is_some()
    }

    /// Number of [`Trie::insert`] calls that stored something, counting
    /// repeated insertions of the same word.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Up to `n` words starting with `prefix`, heaviest first.
    ///
    /// An empty prefix ranks the whole trie. An unknown prefix yields an
    /// empty list. Words of equal weight come out in no particular order.
    pub fn top_n(&self, prefix: &str, n: usize) -> Vec<String> {
        self.top_leaves(prefix, n)
            .map(|leaves| leaves.into_iter().map(|leaf| leaf.word.clone()).collect())
            .unwrap_or_default()
    }

    /// Like [`Trie::top_n`], paired with each word's weight.
    pub fn top_n_weighted(&self, prefix: &str, n: usize) -> Vec<(String, f64)> {
        self.top_leaves(prefix, n)
            .map(|leaves| {
                leaves
                    .into_iter()
                    .map(|leaf| (leaf.word.clone(), leaf.weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn top_leaves(&self, prefix: &str, n: usize) -> Option<Vec<&node::LeafNode>> {
        let chars: Vec<char> = self.normalize(prefix).chars().collect();
        let start = self.root.descend(&chars)?;
        Some(search::top_n(start, n))
    }

    /// The word closest to `word` by edit distance, preferring heavier
    /// words on ties.
    ///
    /// The search gives up after roughly `max_time_millis` and returns the
    /// best word found so far. If no word beats the empty string, which sits
    /// at distance `len(word)`, the empty string is returned.
    pub fn best_match(&self, word: &str, max_time_millis: u64) -> String {
        self.best_match_within(word, Duration::from_millis(max_time_millis))
    }

    /// [`Trie::best_match`] with a [`Duration`] budget.
    pub fn best_match_within(&self, word: &str, budget: Duration) -> String {
        self.find_best_match(word, budget).word
    }

    pub(crate) fn find_best_match(&self, word: &str, budget: Duration) -> BestMatch {
        let target = self.normalize(word);
        search::best_match(
            &self.root,
            &target,
            self.metric.as_ref(),
            budget,
            self.check_interval,
        )
    }

    /// Every stored `(word, weight)` pair, in no particular order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            leaves: Leaves::new(&self.root),
        }
    }

    fn normalize<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if self.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for Trie {
    fn clone(&self) -> Self {
        let mut root = InternalNode::default();
        for leaf in Leaves::new(&self.root) {
            let chars: Vec<char> = leaf.word.chars().collect();
            root.insert(&chars, &leaf.word, leaf.weight);
        }
        Self {
            root,
            size: self.size,
            distinct: self.distinct,
            case_sensitive: self.case_sensitive,
            check_interval: self.check_interval,
            metric: Arc::clone(&self.metric),
        }
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("size", &self.size)
            .field("len", &self.distinct)
            .field("case_sensitive", &self.case_sensitive)
            .field("check_interval", &self.check_interval)
            .field("metric", &self.metric)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl<S: AsRef<str>> Extend<(S, f64)> for Trie {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (word, weight) in iter {
            self.insert(word.as_ref(), weight);
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Trie {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut trie = Trie::default();
        trie.extend(iter);
        trie
    }
}

/// Iterator over the words of a [`Trie`].
#[derive(Debug)]
pub struct Iter<'a> {
    leaves: Leaves<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.leaves
            .next()
            .map(|leaf| (leaf.word.as_str(), leaf.weight))
    }
}

impl<'a> IntoIterator for &'a Trie {
    type Item = (&'a str, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
