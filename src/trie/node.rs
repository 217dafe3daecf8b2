//! Tree nodes of the weighted trie.
//!
//! An [`InternalNode`] stands for a prefix. Its children are keyed by a
//! [`Label`]: either the next character, or [`Label::End`] under which the
//! [`LeafNode`] of a complete word hangs. Because `End` is its own variant it
//! can never collide with a real input character, so a word can be both a
//! complete entry and the prefix of longer ones.
//!
//! Every internal node carries the maximum weight of the leaves below it.
//! The searches in [`super::search`] rely on that bound.

use std::fmt;

use ahash::AHashMap;

/// Edge label from an internal node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Label {
    /// End-of-word marker. Only ever points at a leaf.
    End,
    /// Next character of the key.
    Char(char),
}

/// A trie node: either a prefix or a completed word.
#[derive(Debug)]
pub(crate) enum Node {
    Internal(InternalNode),
    Leaf(LeafNode),
}

impl Node {
    pub(crate) fn weight(&self) -> f64 {
        match self {
            Node::Internal(inner) => inner.weight,
            Node::Leaf(leaf) => leaf.weight,
        }
    }

    pub(crate) fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Internal(inner) => NodeRef::Internal(inner),
            Node::Leaf(leaf) => NodeRef::Leaf(leaf),
        }
    }
}

/// Borrowed view of a node, so the root (an [`InternalNode`] that is not
/// wrapped in a [`Node`]) can sit in the same queues as its descendants.
#[derive(Debug, Clone, Copy)]
pub(crate) enum NodeRef<'a> {
    Internal(&'a InternalNode),
    Leaf(&'a LeafNode),
}

impl NodeRef<'_> {
    pub(crate) fn weight(self) -> f64 {
        match self {
            NodeRef::Internal(inner) => inner.weight,
            NodeRef::Leaf(leaf) => leaf.weight,
        }
    }
}

/// A completed key together with its weight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LeafNode {
    /// The whole key, not just the trailing character.
    pub(crate) word: String,
    pub(crate) weight: f64,
}

/// A shared prefix.
///
/// Insertion, lookup, traversal and drop all walk the tree with loops, so
/// the length of a key is not limited by the call stack.
#[derive(Debug, Default)]
pub(crate) struct InternalNode {
    /// Maximum weight of any leaf in this subtree.
    pub(crate) weight: f64,
    pub(crate) children: AHashMap<Label, Node>,
}

impl InternalNode {
    /// Insert `word`, whose characters are `path`.
    ///
    /// An existing leaf has its weight overwritten. The bound of every node
    /// on the path stays exact, including when an overwrite lowers it.
    ///
    /// Returns `true` when a new leaf was created.
    pub(crate) fn insert(&mut self, path: &[char], word: &str, weight: f64) -> bool {
        match self.lookup(path).map(|leaf| leaf.weight) {
            Some(previous) if weight < previous => {
                self.lower(path, weight);
                false
            }
            previous => {
                self.raise(path, word, weight);
                previous.is_none()
            }
        }
    }

    /// Store a leaf whose weight is not below the one it replaces. Bounds
    /// only grow, so they are updated on the way down.
    fn raise(&mut self, path: &[char], word: &str, weight: f64) {
        let mut node = self;
        for &c in path {
            node.absorb(weight);
            node = node.child_mut(c);
        }
        node.absorb(weight);

        match node.children.get_mut(&Label::End) {
            Some(Node::Leaf(leaf)) => leaf.weight = weight,
            _ => {
                node.children.insert(
                    Label::End,
                    Node::Leaf(LeafNode {
                        word: word.to_string(),
                        weight,
                    }),
                );
            }
        }
    }

    /// Overwrite an existing leaf with a smaller weight.
    ///
    /// The first pass records, for each depth, the heaviest child that is
    /// off the path. Folding those from the leaf upwards gives the new
    /// bounds, which the second pass writes back.
    fn lower(&mut self, path: &[char], weight: f64) {
        let mut off_path = Vec::with_capacity(path.len() + 1);
        let mut node = &mut *self;
        for &c in path {
            off_path.push(node.max_excluding(Label::Char(c)));
            node = node.child_mut(c);
        }
        off_path.push(node.max_excluding(Label::End));
        if let Some(Node::Leaf(leaf)) = node.children.get_mut(&Label::End) {
            leaf.weight = weight;
        }

        let mut bound = weight;
        let mut bounds = vec![weight; off_path.len()];
        for (depth, other) in off_path.iter().enumerate().rev() {
            bound = bound.max(*other);
            bounds[depth] = bound;
        }

        let mut node = self;
        for (depth, &c) in path.iter().enumerate() {
            node.weight = bounds[depth];
            node = node.child_mut(c);
        }
        node.weight = bounds[path.len()];
    }

    fn absorb(&mut self, weight: f64) {
        self.weight = if self.children.is_empty() {
            weight
        } else {
            self.weight.max(weight)
        };
    }

    fn max_excluding(&self, skip: Label) -> f64 {
        self.children
            .iter()
            .filter(|(label, _)| **label != skip)
            .map(|(_, child)| child.weight())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn child_mut(&mut self, c: char) -> &mut InternalNode {
        let child = self
            .children
            .entry(Label::Char(c))
            .or_insert_with(|| Node::Internal(InternalNode::default()));
        match child {
            Node::Internal(inner) => inner,
            Node::Leaf(_) => unreachable!("leaves only hang off the end-of-word label"),
        }
    }

    /// Follow `path` through character edges only.
    pub(crate) fn descend(&self, path: &[char]) -> Option<&InternalNode> {
        let mut node = self;
        for &c in path {
            match node.children.get(&Label::Char(c)) {
                Some(Node::Internal(inner)) => node = inner,
                _ => return None,
            }
        }
        Some(node)
    }

    /// The leaf stored for exactly `path`, if any.
    pub(crate) fn lookup(&self, path: &[char]) -> Option<&LeafNode> {
        match self.descend(path)?.children.get(&Label::End) {
            Some(Node::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    /// Whether every internal node's weight equals its subtree maximum.
    #[cfg(test)]
    pub(crate) fn bound_holds(&self) -> bool {
        fn max_leaf(node: &InternalNode) -> Option<f64> {
            node.children
                .values()
                .filter_map(|child| match child {
                    Node::Leaf(leaf) => Some(leaf.weight),
                    Node::Internal(inner) => max_leaf(inner),
                })
                .reduce(f64::max)
        }

        let exact = match max_leaf(self) {
            Some(max) => self.weight == max,
            None => true,
        };
        exact
            && self.children.values().all(|child| match child {
                Node::Internal(inner) => inner.bound_holds(),
                Node::Leaf(_) => true,
            })
    }
}

impl Drop for InternalNode {
    fn drop(&mut self) {
        let mut pending = vec![std::mem::take(&mut self.children)];
        while let Some(mut children) = pending.pop() {
            for (_, child) in children.drain() {
                if let Node::Internal(mut inner) = child {
                    pending.push(std::mem::take(&mut inner.children));
                }
            }
        }
    }
}

fn push_sorted<'a>(stack: &mut Vec<(usize, Label, &'a Node)>, node: &'a InternalNode, depth: usize) {
    let mut entries: Vec<(usize, Label, &Node)> = node
        .children
        .iter()
        .map(|(label, child)| (depth, *label, child))
        .collect();
    // Popped from the back, so the smallest label goes last.
    entries.sort_by_key(|(_, label, _)| std::cmp::Reverse(*label));
    stack.extend(entries);
}

impl fmt::Display for InternalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "* ({})", self.weight)?;
        let mut stack = Vec::new();
        push_sorted(&mut stack, self, 1);
        while let Some((depth, label, child)) = stack.pop() {
            let indent = depth * 2;
            match (label, child) {
                (_, Node::Leaf(leaf)) => {
                    writeln!(f, "{:indent$}$ {} ({})", "", leaf.word, leaf.weight)?;
                }
                (Label::Char(c), Node::Internal(inner)) => {
                    writeln!(f, "{:indent$}{} ({})", "", c, inner.weight)?;
                    push_sorted(&mut stack, inner, depth + 1);
                }
                (Label::End, Node::Internal(_)) => {}
            }
        }
        Ok(())
    }
}

/// Depth-first walk over every leaf below a node.
pub(crate) struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(root: &'a InternalNode) -> Self {
        Self {
            stack: root.children.values().collect(),
        }
    }
}

impl fmt::Debug for Leaves<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaves")
            .field("pending", &self.stack.len())
            .finish()
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a LeafNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(leaf) => return Some(leaf),
                Node::Internal(inner) => self.stack.extend(inner.children.values()),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn insert(root: &mut InternalNode, word: &str, weight: f64) -> bool {
        root.insert(&chars(word), word, weight)
    }

    #[test]
    fn test_insert_creates_leaf_under_end_label() {
        let mut root = InternalNode::default();
        assert!(insert(&mut root, "ab", 2.0));

        let a = root.descend(&chars("a")).unwrap();
        assert!(a.children.get(&Label::End).is_none());
        let ab = root.descend(&chars("ab")).unwrap();
        match ab.children.get(&Label::End) {
            Some(Node::Leaf(leaf)) => {
                assert_eq!(leaf.word, "ab");
                assert_eq!(leaf.weight, 2.0);
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_word_can_be_prefix_of_another() {
        let mut root = InternalNode::default();
        insert(&mut root, "car", 1.0);
        insert(&mut root, "cart", 4.0);

        assert_eq!(root.lookup(&chars("car")).unwrap().weight, 1.0);
        assert_eq!(root.lookup(&chars("cart")).unwrap().weight, 4.0);
        assert!(root.lookup(&chars("ca")).is_none());
        assert!(root.lookup(&chars("carts")).is_none());
    }

    #[test]
    fn test_overwrite_reports_existing_leaf() {
        let mut root = InternalNode::default();
        assert!(insert(&mut root, "cat", 5.0));
        assert!(!insert(&mut root, "cat", 2.0));
        assert_eq!(root.lookup(&chars("cat")).unwrap().weight, 2.0);
    }

    #[test]
    fn test_bound_tracks_subtree_maximum() {
        let mut root = InternalNode::default();
        insert(&mut root, "cat", 5.0);
        insert(&mut root, "cap", 8.0);
        insert(&mut root, "dog", 1.0);
        assert_eq!(root.weight, 8.0);
        assert_eq!(root.descend(&chars("d")).unwrap().weight, 1.0);
        assert!(root.bound_holds());

        // Lowering the heaviest word lowers every bound on its path.
        insert(&mut root, "cap", 0.5);
        assert_eq!(root.weight, 5.0);
        assert_eq!(root.descend(&chars("cap")).unwrap().weight, 0.5);
        assert!(root.bound_holds());
    }

    #[test]
    fn test_negative_weights_keep_exact_bound() {
        let mut root = InternalNode::default();
        insert(&mut root, "a", -3.0);
        insert(&mut root, "ab", -1.0);
        assert_eq!(root.weight, -1.0);
        assert!(root.bound_holds());
    }

    #[test]
    fn test_leaves_walks_every_word() {
        let mut root = InternalNode::default();
        for word in ["a", "ab", "abc", "b"] {
            insert(&mut root, word, 1.0);
        }
        let mut words: Vec<&str> = Leaves::new(&root).map(|leaf| leaf.word.as_str()).collect();
        words.sort();
        assert_eq!(words, vec!["a", "ab", "abc", "b"]);
    }

    #[test]
    fn test_lowering_inside_shared_prefix() {
        let mut root = InternalNode::default();
        insert(&mut root, "ab", 9.0);
        insert(&mut root, "abc", 4.0);
        insert(&mut root, "abd", 6.0);
        insert(&mut root, "x", 3.0);

        insert(&mut root, "ab", 1.0);
        assert_eq!(root.weight, 6.0);
        assert_eq!(root.descend(&chars("ab")).unwrap().weight, 6.0);
        assert!(root.bound_holds());

        insert(&mut root, "abd", 2.0);
        assert_eq!(root.weight, 4.0);
        insert(&mut root, "abc", -1.0);
        assert_eq!(root.weight, 3.0);
        assert_eq!(root.descend(&chars("a")).unwrap().weight, 2.0);
        assert!(root.bound_holds());
    }

    #[test]
    fn test_long_chain_inserts_and_drops() {
        let word = "z".repeat(200_000);
        let mut root = InternalNode::default();
        assert!(insert(&mut root, &word, 2.0));
        assert!(!insert(&mut root, &word, 1.0));
        assert_eq!(root.lookup(&chars(&word)).unwrap().weight, 1.0);
        assert_eq!(root.weight, 1.0);
        drop(root);
    }

    #[test]
    fn test_outline_is_sorted() {
        let mut root = InternalNode::default();
        insert(&mut root, "b", 1.0);
        insert(&mut root, "a", 2.0);
        let outline = root.to_string();
        assert_eq!(outline, "* (2)\n  a (2)\n    $ a (2)\n  b (1)\n    $ b (1)\n");
    }
}
