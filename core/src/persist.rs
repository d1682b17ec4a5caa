//! Snapshot wire format.
//!
//! Current documents are a JSON container tagged with `format_version`. The trie is
//! written as its node arena, each node listing its children by index:
//!
//! ```json
//! {"format_version": 3,
//!  "trie": {"nodes": [{"is_end_of_word": false, "frequency": 0, "results": [], "children": {"t": 1}}, ..]},
//!  "tokens": {"tee": [..]}, "texts": {"white tee": [..]}}
//! ```
//!
//! Older documents nest child nodes inside their parents: version 2 carries the
//! token and text indexes next to the nested trie, version 1 and untagged
//! documents hold only the trie. Untagged documents are a bare root node
//! `{"is_end_of_word", "frequency", "results", "children"}` and decode with empty
//! token and text indexes. Nested documents are parsed under serde_json's default
//! depth limit, so one that nests too deep is rejected rather than overflowing the
//! stack.

use crate::error::SerializationError;
use crate::index::SearchResult;
use crate::snapshot::Snapshot;
use crate::text_index::{TextIndex, TokenIndex};
use crate::trie::{Trie, TrieNode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const FORMAT_VERSION: u64 = 3;
const VERSION_TAG: &str = "format_version";

#[derive(Serialize)]
struct EncodedRef<'a> {
    format_version: u64,
    trie: &'a Trie,
    tokens: &'a TokenIndex,
    texts: &'a TextIndex,
}

#[derive(Deserialize)]
struct FlatTrie {
    nodes: Vec<TrieNode>,
}

#[derive(Deserialize)]
struct Current {
    trie: FlatTrie,
    #[serde(default)]
    tokens: TokenIndex,
    #[serde(default)]
    texts: TextIndex,
}

#[derive(Deserialize)]
struct NestedNode {
    #[serde(default)]
    children: BTreeMap<char, NestedNode>,
    #[serde(rename = "is_end_of_word", default)]
    terminal: bool,
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default)]
    frequency: u64,
}

#[derive(Deserialize)]
struct NestedDoc {
    trie: NestedNode,
    #[serde(default)]
    tokens: TokenIndex,
    #[serde(default)]
    texts: TextIndex,
}

/// Which decode path a document took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Legacy,
    Versioned(u64),
}

pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SerializationError> {
    let doc = EncodedRef {
        format_version: FORMAT_VERSION,
        trie: snapshot.trie(),
        tokens: snapshot.tokens(),
        texts: snapshot.texts(),
    };
    Ok(serde_json::to_vec(&doc)?)
}

pub fn decode(data: &[u8]) -> Result<Snapshot, SerializationError> {
    decode_with_format(data).map(|(snapshot, _)| snapshot)
}

pub fn decode_with_format(data: &[u8]) -> Result<(Snapshot, Format), SerializationError> {
    let value: Value = serde_json::from_slice(data)?;

    let version = match value.get(VERSION_TAG) {
        None => None,
        Some(tag) => Some(tag.as_u64().ok_or(SerializationError::InvalidVersionTag)?),
    };

    match version {
        None => {
            let root = NestedNode::deserialize(value)?;
            Ok((Snapshot::from_parts(flatten(root)?, TokenIndex::new(), TextIndex::new()), Format::Legacy))
        }
        Some(1) => {
            let doc = NestedDoc::deserialize(value)?;
            Ok((Snapshot::from_parts(flatten(doc.trie)?, TokenIndex::new(), TextIndex::new()), Format::Versioned(1)))
        }
        Some(2) => {
            let doc = NestedDoc::deserialize(value)?;
            Ok((Snapshot::from_parts(flatten(doc.trie)?, doc.tokens, doc.texts), Format::Versioned(2)))
        }
        Some(v) if v == FORMAT_VERSION => {
            let doc = Current::deserialize(value)?;
            let trie = Trie::from_nodes(doc.trie.nodes).map_err(SerializationError::CorruptTrie)?;
            Ok((Snapshot::from_parts(trie, doc.tokens, doc.texts), Format::Versioned(v)))
        }
        Some(found) => Err(SerializationError::UnsupportedVersion { found, supported: FORMAT_VERSION }),
    }
}

/// Move a nested trie into arena form, parents before children.
fn flatten(root: NestedNode) -> Result<Trie, SerializationError> {
    let mut nodes: Vec<TrieNode> = Vec::new();
    let mut pending: Vec<(NestedNode, Option<(usize, char)>)> = vec![(root, None)];
    while let Some((node, link)) = pending.pop() {
        let id = nodes.len();
        if let Some((parent, ch)) = link {
            nodes[parent].children.insert(ch, id);
        }
        nodes.push(TrieNode {
            children: BTreeMap::new(),
            terminal: node.terminal,
            results: node.results,
            frequency: node.frequency,
        });
        pending.extend(node.children.into_iter().map(|(ch, child)| (child, Some((id, ch)))));
    }
    Trie::from_nodes(nodes).map_err(SerializationError::CorruptTrie)
}
