//! Edit distance metrics used by approximate matching.
//!
//! Distances are computed over Unicode scalar values, so `"café"` and
//! `"cafe"` are one substitution apart regardless of UTF-8 byte length.

use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SacaError};

/// A string distance function.
///
/// Implementations must return `0` for identical strings. The trie's
/// best-first matcher also assumes the distance does not jump around
/// wildly as a candidate grows by one character.
pub trait EditDistance: Send + Sync + Debug {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &str, b: &str) -> usize;
}

/// Classic Levenshtein distance (insert, delete, substitute).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        if a.is_empty() {
            return b.len();
        }
        if b.is_empty() {
            return a.len();
        }

        let mut prev: Vec<usize> = (0..=b.len()).collect();
        let mut curr: Vec<usize> = vec![0; b.len() + 1];

        for (i, ca) in a.iter().enumerate() {
            curr[0] = i + 1;
            for (j, cb) in b.iter().enumerate() {
                let cost = if ca == cb { 0 } else { 1 };
                curr[j + 1] = (prev[j + 1] + 1)
                    .min(curr[j] + 1)
                    .min(prev[j] + cost);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[b.len()]
    }
}

/// Damerau-Levenshtein distance in its optimal string alignment form.
///
/// Adjacent transpositions (`"teh"` -> `"the"`) cost a single edit; a
/// substring is never edited twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein;

impl EditDistance for DamerauLevenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        if a.is_empty() {
            return b.len();
        }
        if b.is_empty() {
            return a.len();
        }

        let width = b.len() + 1;
        let mut before_prev: Vec<usize> = vec![0; width];
        let mut prev: Vec<usize> = (0..width).collect();
        let mut curr: Vec<usize> = vec![0; width];

        for i in 1..=a.len() {
            curr[0] = i;
            for j in 1..=b.len() {
                let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
                let mut d = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
                if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                    d = d.min(before_prev[j - 2] + 1);
                }
                curr[j] = d;
            }
            std::mem::swap(&mut before_prev, &mut prev);
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[b.len()]
    }
}

/// Serializable selector for the built-in metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Levenshtein,
    DamerauLevenshtein,
}

impl DistanceMetric {
    /// Instantiate the metric.
    pub fn build(self) -> Arc<dyn EditDistance> {
        match self {
            DistanceMetric::Levenshtein => Arc::new(Levenshtein),
            DistanceMetric::DamerauLevenshtein => Arc::new(DamerauLevenshtein),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Levenshtein => "levenshtein",
            DistanceMetric::DamerauLevenshtein => "damerau_levenshtein",
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = SacaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "levenshtein" => Ok(DistanceMetric::Levenshtein),
            "damerau_levenshtein" | "damerau" => Ok(DistanceMetric::DamerauLevenshtein),
            other => Err(SacaError::invalid_argument(format!(
                "unknown distance metric '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        let lev = Levenshtein;
        assert_eq!(lev.distance("", ""), 0);
        assert_eq!(lev.distance("", "hello"), 5);
        assert_eq!(lev.distance("hello", ""), 5);
        assert_eq!(lev.distance("hello", "hello"), 0);
        assert_eq!(lev.distance("kitten", "sitting"), 3);
        assert_eq!(lev.distance("helo", "hello"), 1);
        assert_eq!(lev.distance("helo", "yellow"), 3);
        assert_eq!(lev.distance("hat", "bat"), 1);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        let lev = Levenshtein;
        assert_eq!(lev.distance("café", "cafe"), 1);
        assert_eq!(lev.distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_transpositions() {
        assert_eq!(Levenshtein.distance("teh", "the"), 2);
        assert_eq!(DamerauLevenshtein.distance("teh", "the"), 1);
        assert_eq!(DamerauLevenshtein.distance("ca", "abc"), 3);
        assert_eq!(DamerauLevenshtein.distance("kitten", "sitting"), 3);
        assert_eq!(DamerauLevenshtein.distance("", "abc"), 3);
    }

    #[test]
    fn test_metric_selector() {
        assert_eq!(
            "levenshtein".parse::<DistanceMetric>().unwrap(),
            DistanceMetric::Levenshtein
        );
        assert_eq!(
            "Damerau-Levenshtein".parse::<DistanceMetric>().unwrap(),
            DistanceMetric::DamerauLevenshtein
        );
        assert!("cosine".parse::<DistanceMetric>().is_err());

        let metric = DistanceMetric::DamerauLevenshtein.build();
        assert_eq!(metric.distance("ab", "ba"), 1);
        assert_eq!(DistanceMetric::default().name(), "levenshtein");
    }
}
