#![allow(dead_code)]

use inkstream::{BlogId, CommentId, CommentRecord, Timestamp, UserId};
use uuid::Uuid;

pub fn user_id(seed: u8) -> UserId {
    UserId::new(Uuid::from_bytes([seed; 16]))
}

pub fn blog_id(seed: u8) -> BlogId {
    BlogId::new(Uuid::from_bytes([seed; 16]))
}

pub fn comment_id(seed: u8) -> CommentId {
    CommentId::new(Uuid::from_bytes([seed; 16]))
}

/// A comment record with `created_at` derived from its seed, so input
/// order and chronology coincide when seeds ascend.
pub fn comment(seed: u8, parent: Option<u8>) -> CommentRecord {
    CommentRecord {
        id: comment_id(seed),
        parent_id: parent.map(comment_id),
        blog_id: blog_id(0xaa),
        author: user_id(0xbb),
        content: format!("comment {seed}"),
        created_at: Timestamp(seed as u64 * 60_000),
        updated_at: Timestamp(seed as u64 * 60_000),
    }
}
