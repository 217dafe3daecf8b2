use serde::{Deserialize, Serialize};

use crate::error::{Result, SacaError};
use crate::util::levenshtein::DistanceMetric;

/// Iterations between wall-clock checks during approximate matching.
pub const DEFAULT_CHECK_INTERVAL: usize = 1000;

/// Default time budget for suggestions, in milliseconds.
pub const DEFAULT_MATCH_BUDGET_MS: u64 = 100;

/// Construction-time settings of a [`Trie`](crate::Trie).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieConfig {
    /// When `false`, every key, prefix and match target is lower-cased.
    pub case_sensitive: bool,
    /// Edit distance used by approximate matching.
    pub metric: DistanceMetric,
    /// How many search iterations run between clock reads.
    pub check_interval: usize,
    /// Budget used by [`Suggester`](crate::Suggester) when none is given.
    pub match_budget_ms: u64,
}

impl TrieConfig {
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
            metric: DistanceMetric::default(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            match_budget_ms: DEFAULT_MATCH_BUDGET_MS,
        }
    }

    pub fn builder() -> TrieConfigBuilder {
        TrieConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrieConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.check_interval == 0 {
            return Err(SacaError::invalid_config(
                "check_interval must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct TrieConfigBuilder {
    case_sensitive: Option<bool>,
    metric: Option<DistanceMetric>,
    check_interval: Option<usize>,
    match_budget_ms: Option<u64>,
}

impl TrieConfigBuilder {
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn check_interval(mut self, check_interval: usize) -> Self {
        self.check_interval = Some(check_interval);
        self
    }

    pub fn match_budget_ms(mut self, match_budget_ms: u64) -> Self {
        self.match_budget_ms = Some(match_budget_ms);
        self
    }

    pub fn build(self) -> TrieConfig {
        let defaults = TrieConfig::default();
        TrieConfig {
            case_sensitive: self.case_sensitive.unwrap_or(defaults.case_sensitive),
            metric: self.metric.unwrap_or(defaults.metric),
            check_interval: self.check_interval.unwrap_or(defaults.check_interval),
            match_budget_ms: self.match_budget_ms.unwrap_or(defaults.match_budget_ms),
        }
    }
}
