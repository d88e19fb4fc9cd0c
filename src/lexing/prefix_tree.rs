//! Prefix tree for literal tokens.
//!
//! Literals are matched greedily: the scanner descends the tree as far as
//! the input allows, then unwinds to the deepest node that both holds an
//! accepted literal and whose terminator (when configured) matches the
//! input following it. This gives longest-match semantics with fallback to
//! shorter literals when a longer candidate's terminator fails.

use crate::error::{Error, Result};
use crate::lexing::config::AnchoredPattern;

/// One entry accepted by the tree: the stored value plus an optional
/// terminator pattern that must match the input immediately after the
/// literal.
#[derive(Debug)]
struct Entry<V> {
    value: V,
    terminator: Option<AnchoredPattern>,
}

#[derive(Debug)]
struct PtNode<V> {
    code: char,
    entry: Option<Entry<V>>,
    children: Vec<PtNode<V>>,
}

impl<V> PtNode<V> {
    fn new(code: char) -> Self {
        Self {
            code,
            entry: None,
            children: Vec::new(),
        }
    }
}

/// Longest-match literal matcher keyed by Unicode scalar values.
#[derive(Debug)]
pub struct PrefixTree<V> {
    root: PtNode<V>,
}

impl<V> Default for PrefixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixTree<V> {
    pub fn new() -> Self {
        Self {
            // The root's code is never compared against input.
            root: PtNode::new('\0'),
        }
    }

    /// Insert a literal, creating intermediate nodes on demand.
    ///
    /// Inserting the empty literal or the same literal twice is a
    /// build-time error.
    pub fn add(
        &mut self,
        literal: &str,
        value: V,
        terminator: Option<AnchoredPattern>,
    ) -> Result<()> {
        if literal.is_empty() {
            return Err(Error::EmptyLiteral);
        }

        let mut node = &mut self.root;
        for ch in literal.chars() {
            let idx = match node.children.iter().position(|c| c.code == ch) {
                Some(idx) => idx,
                None => {
                    node.children.push(PtNode::new(ch));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
        }

        if node.entry.is_some() {
            return Err(Error::DuplicateLiteral(literal.to_string()));
        }
        node.entry = Some(Entry { value, terminator });
        Ok(())
    }
}

impl<V: Copy> PrefixTree<V> {
    /// Match the longest satisfiable literal at the head of `tail`.
    ///
    /// Returns the stored value and the byte length consumed. A literal is
    /// satisfiable when it has no terminator, or its terminator matches the
    /// input that follows it.
    pub fn try_match(&self, tail: &str) -> Option<(V, usize)> {
        Self::descend(&self.root, tail, 0)
    }

    fn descend(node: &PtNode<V>, tail: &str, pos: usize) -> Option<(V, usize)> {
        if let Some(next) = tail[pos..].chars().next() {
            if let Some(child) = node.children.iter().find(|c| c.code == next) {
                if let Some(found) = Self::descend(child, tail, pos + next.len_utf8()) {
                    return Some(found);
                }
            }
        }

        // No deeper match: accept here if this node terminates a literal
        // and its terminator is satisfied by the remaining input.
        match &node.entry {
            Some(entry)
                if entry
                    .terminator
                    .as_ref()
                    .map_or(true, |t| t.matches_start(&tail[pos..])) =>
            {
                Some((entry.value, pos))
            }
            _ => None,
        }
    }
}
