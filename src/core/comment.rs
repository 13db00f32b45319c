//! Layer 2: Comment records and thread building
//!
//! The backend delivers comments flat; relationships exist only through
//! `parent_id`. `build_thread` reconstructs the reply tree fresh on every
//! call - nodes are never mutated in place across inputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::identity::{BlogId, CommentId, UserId};
use super::time::Timestamp;

/// A comment row as delivered by the backend. Flat and order-independent;
/// callers pre-sort chronologically when sibling order matters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: CommentId,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    pub blog_id: BlogId,
    pub author: UserId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment plus its direct replies, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    pub record: CommentRecord,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(record: CommentRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    /// Nodes in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CommentNode::count).sum::<usize>()
    }
}

/// Reconstruct the reply tree from a flat comment list.
///
/// Two passes: first index every record by id, then attach each record to
/// its parent's child list. A record whose `parent_id` is absent from the
/// input set is promoted to top level rather than dropped, so a reply never
/// disappears just because its parent was deleted out from under it.
///
/// Deterministic: sibling order preserves input order at every depth.
/// Empty input yields an empty list - "no comments" is decided here,
/// "still loading" a layer above.
pub fn build_thread(records: &[CommentRecord]) -> Vec<CommentNode> {
    // Index of id -> position in the input, for parent lookups.
    let mut by_id: HashMap<CommentId, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        by_id.insert(record.id, idx);
    }

    // children[i] holds the input positions of record i's direct replies.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        // A row naming itself as parent would otherwise vanish from the
        // tree entirely (it has a "parent", but no path from any root).
        let parent = record.parent_id.filter(|pid| *pid != record.id);
        match parent.and_then(|pid| by_id.get(&pid).copied()) {
            Some(parent_idx) => children[parent_idx].push(idx),
            // No parent_id, or parent missing from the set: top level.
            None => roots.push(idx),
        }
    }

    roots
        .iter()
        .map(|&idx| assemble(records, &children, idx))
        .collect()
}

fn assemble(records: &[CommentRecord], children: &[Vec<usize>], idx: usize) -> CommentNode {
    let mut node = CommentNode::leaf(records[idx].clone());
    node.children = children[idx]
        .iter()
        .map(|&child| assemble(records, children, child))
        .collect();
    node
}
