//! Best-first traversals over the trie.
//!
//! Both searches pop the most promising node from a [`BinaryHeap`]. The
//! wrappers below only exist to give nodes the ordering each search needs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use log::{debug, trace};

use super::node::{InternalNode, Label, LeafNode, Node, NodeRef};
use crate::util::levenshtein::EditDistance;

/// Heap key for top-N retrieval: heaviest node first.
#[derive(Debug, Clone, Copy)]
struct ByWeight<'a>(NodeRef<'a>);

impl PartialEq for ByWeight<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByWeight<'_> {}

impl PartialOrd for ByWeight<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByWeight<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.weight().total_cmp(&other.0.weight())
    }
}

/// Heap key for approximate matching: closest first, heaviest on ties.
#[derive(Debug, Clone)]
struct MatchCandidate<'a> {
    node: NodeRef<'a>,
    path: String,
    distance: usize,
    is_word: bool,
}

impl PartialEq for MatchCandidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MatchCandidate<'_> {}

impl PartialOrd for MatchCandidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MatchCandidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so the smaller distance must compare greater.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| self.node.weight().total_cmp(&other.node.weight()))
    }
}

/// The result of an approximate match.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BestMatch {
    pub(crate) word: String,
    pub(crate) distance: usize,
    pub(crate) weight: f64,
}

impl BestMatch {
    fn improves_on(&self, other: &BestMatch) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.weight > other.weight)
    }
}

/// Up to `n` leaves under `start`, heaviest first.
///
/// Internal weights bound every leaf below them, so leaves come off the
/// heap in non-increasing weight order without sorting the subtree.
pub(crate) fn top_n(start: &InternalNode, n: usize) -> Vec<&LeafNode> {
    let mut found = Vec::with_capacity(n.min(64));
    if n == 0 {
        return found;
    }

    let mut frontier = BinaryHeap::new();
    frontier.push(ByWeight(NodeRef::Internal(start)));

    while found.len() < n {
        let Some(ByWeight(node)) = frontier.pop() else {
            break;
        };
        match node {
            NodeRef::Leaf(leaf) => found.push(leaf),
            NodeRef::Internal(inner) => {
                frontier.extend(inner.children.values().map(|child| ByWeight(child.as_node_ref())));
            }
        }
    }

    found
}

/// The inserted key closest to `target`, ties going to the heavier key.
///
/// A child is only explored while its edit distance to `target` does not
/// exceed its parent's. Keys that can only be reached by first moving away
/// from the target are therefore missed.
///
/// The clock is read every `check_interval` iterations; once `budget` has
/// elapsed the best word found so far is returned. When nothing better is
/// found the result is the empty string at distance `len(target)`.
pub(crate) fn best_match(
    root: &InternalNode,
    target: &str,
    metric: &dyn EditDistance,
    budget: Duration,
    check_interval: usize,
) -> BestMatch {
    let started = Instant::now();
    let check_interval = check_interval.max(1);

    let seed = MatchCandidate {
        node: NodeRef::Internal(root),
        path: String::new(),
        distance: metric.distance("", target),
        is_word: false,
    };
    let mut best = BestMatch {
        word: String::new(),
        distance: seed.distance,
        weight: root.weight,
    };

    let mut queue = BinaryHeap::new();
    queue.push(seed);
    let mut iterations = 0usize;

    while let Some(current) = queue.pop() {
        if current.is_word {
            let candidate = BestMatch {
                word: current.path.clone(),
                distance: current.distance,
                weight: current.node.weight(),
            };
            if candidate.improves_on(&best) {
                best = candidate;
            }
        }

        if iterations % check_interval == 0 && started.elapsed() > budget {
            debug!(
                "best_match for {target:?} stopped after {iterations} iterations ({:?} budget)",
                budget
            );
            return best;
        }
        iterations += 1;

        let NodeRef::Internal(inner) = current.node else {
            continue;
        };
        for (label, child) in inner.children.iter() {
            let (path, distance) = match label {
                Label::End => (current.path.clone(), current.distance),
                Label::Char(c) => {
                    let mut path = String::with_capacity(current.path.len() + c.len_utf8());
                    path.push_str(&current.path);
                    path.push(*c);
                    let distance = metric.distance(&path, target);
                    (path, distance)
                }
            };

            if distance <= current.distance {
                queue.push(MatchCandidate {
                    node: child.as_node_ref(),
                    path,
                    distance,
                    is_word: matches!(child, Node::Leaf(_)),
                });
            }
        }
    }

    trace!(
        "best_match for {target:?} exhausted the queue after {iterations} iterations: {:?} at distance {}",
        best.word,
        best.distance
    );
    best
}
