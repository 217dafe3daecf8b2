//! Shared utility modules used across Saca components.

pub mod levenshtein;
