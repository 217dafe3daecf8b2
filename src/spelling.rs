//! Spelling suggestions for Saca.
//!
//! This module turns a [`Trie`](crate::Trie) of weighted words into a
//! "Did you mean?" helper and a prefix completer that can be surfaced in
//! search boxes or auto-correct flows.

pub mod suggest;
