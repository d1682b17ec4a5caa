//! Character-keyed prefix tree stored as an arena of nodes.
//!
//! Node 0 is the root. Children are addressed by index and every child is created
//! after its parent, so a child's index is always greater than its parent's.
//! Traversals use explicit stacks, keeping depth independent of text length.

use crate::index::{push_unique, SearchResult};
use crate::ranking::{cmp_score_desc, PrefixRanking};
use crate::tokenizer::normalize;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub type NodeId = usize;
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrieNode {
    #[serde(default)]
    pub children: BTreeMap<char, NodeId>,
    #[serde(rename = "is_end_of_word", default)]
    pub terminal: bool,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Number of inserts that ended at this node, duplicates included.
    #[serde(default)]
    pub frequency: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self { nodes: vec![TrieNode::default()] }
    }
}

/// Node counts from a full traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrieCounts {
    pub total_nodes: usize,
    pub terminal_nodes: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a trie from its arena, rejecting node lists that are not a single
    /// tree rooted at node 0.
    pub fn from_nodes(nodes: Vec<TrieNode>) -> Result<Self, String> {
        if nodes.is_empty() {
            return Err("trie has no root node".into());
        }
        let mut referenced = vec![false; nodes.len()];
        for (parent, node) in nodes.iter().enumerate() {
            for &child in node.children.values() {
                if child <= parent || child >= nodes.len() {
                    return Err(format!("node {parent} has out-of-order child {child}"));
                }
                if std::mem::replace(&mut referenced[child], true) {
                    return Err(format!("node {child} has more than one parent"));
                }
            }
        }
        if let Some(orphan) = referenced.iter().skip(1).position(|r| !r) {
            return Err(format!("node {} is unreachable", orphan + 1));
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[TrieNode] {
        &self.nodes
    }

    pub fn insert(&mut self, text: &str, result: SearchResult) {
        let mut id = ROOT;
        for ch in normalize(text).chars() {
            id = match self.nodes[id].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[id].children.insert(ch, child);
                    child
                }
            };
        }
        let node = &mut self.nodes[id];
        node.terminal = true;
        node.frequency += 1;
        push_unique(&mut node.results, result);
    }

    fn find(&self, prefix: &str) -> Option<NodeId> {
        let mut id = ROOT;
        for ch in normalize(prefix).chars() {
            id = *self.nodes[id].children.get(&ch)?;
        }
        Some(id)
    }

    /// Node reached by walking the normalized `prefix`, if every character exists.
    pub fn node(&self, prefix: &str) -> Option<&TrieNode> {
        self.find(prefix).map(|id| &self.nodes[id])
    }

    pub fn search(&self, prefix: &str, limit: usize) -> Vec<SearchResult> {
        self.search_ranked(prefix, limit, PrefixRanking::QueriedNode)
    }

    pub fn search_ranked(&self, prefix: &str, limit: usize, ranking: PrefixRanking) -> Vec<SearchResult> {
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };

        let mut collected = self.collect(start, limit);
        collected.sort_by(|a, b| {
            cmp_score_desc(a.0.score, b.0.score).then_with(|| match ranking {
                // the frequency term is the queried node's, so it never separates results
                PrefixRanking::QueriedNode => Ordering::Equal,
                PrefixRanking::ResultNode => b.1.cmp(&a.1),
            })
        });
        collected.into_iter().take(limit).map(|(r, _)| r.clone()).collect()
    }

    /// Pre-order walk: results at a node first, then each child subtree in key
    /// order, stopping once `limit` results are gathered.
    fn collect(&self, start: NodeId, limit: usize) -> Vec<(&SearchResult, u64)> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.terminal {
                out.extend(node.results.iter().map(|r| (r, node.frequency)));
            }
            if out.len() >= limit {
                break;
            }
            stack.extend(node.children.values().rev());
        }
        out
    }

    pub fn counts(&self) -> TrieCounts {
        let mut counts = TrieCounts::default();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            counts.total_nodes += 1;
            if node.terminal {
                counts.terminal_nodes += 1;
            }
            stack.extend(node.children.values());
        }
        counts
    }
}
