#![allow(dead_code)]

use std::collections::VecDeque;

use inkstream::core::DraftFields;
use inkstream::remote::{
    DraftReceipt, DraftRemote, PageFetcher, RemoteError, ToggleAck, ToggleRemote,
};
use inkstream::{BlogId, Slug};

/// Toggle backend replaying a script of responses in order.
///
/// Panics if invoked more often than scripted - that is a test bug, not a
/// runtime condition.
pub struct ScriptedToggle {
    script: VecDeque<Result<ToggleAck, RemoteError>>,
    pub calls: usize,
}

impl ScriptedToggle {
    pub fn new(script: impl IntoIterator<Item = Result<ToggleAck, RemoteError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: 0,
        }
    }

    /// A backend that faithfully confirms every flip, starting from
    /// `initial_active`.
    pub fn honest(initial_active: bool, len: usize) -> Self {
        let mut active = initial_active;
        let script: Vec<_> = (0..len)
            .map(|_| {
                active = !active;
                Ok(ToggleAck { active })
            })
            .collect();
        Self::new(script)
    }
}

impl ToggleRemote for ScriptedToggle {
    fn toggle(&mut self) -> Result<ToggleAck, RemoteError> {
        self.calls += 1;
        self.script.pop_front().expect("toggle script exhausted")
    }
}

/// Draft backend recording every persisted snapshot.
pub struct RecordingDraftRemote {
    pub persisted: Vec<(BlogId, DraftFields)>,
    pub fail_next: Option<RemoteError>,
}

impl RecordingDraftRemote {
    pub fn new() -> Self {
        Self {
            persisted: Vec::new(),
            fail_next: None,
        }
    }
}

impl DraftRemote for RecordingDraftRemote {
    fn persist(&mut self, id: BlogId, fields: &DraftFields) -> Result<DraftReceipt, RemoteError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.persisted.push((id, fields.clone()));
        Ok(DraftReceipt {
            id,
            slug: Slug::parse("draft-abc123").expect("fixture slug"),
        })
    }
}

/// Page source over a fixed item list, with optional one-shot failures.
pub struct ScriptedPages {
    items: Vec<&'static str>,
    pub fail_next: Option<RemoteError>,
    pub fetched_pages: Vec<u32>,
}

impl ScriptedPages {
    pub fn new(items: Vec<&'static str>) -> Self {
        Self {
            items,
            fail_next: None,
            fetched_pages: Vec::new(),
        }
    }
}

impl PageFetcher for ScriptedPages {
    type Item = &'static str;

    fn fetch_page(&mut self, page: u32, page_size: usize) -> Result<Vec<&'static str>, RemoteError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.fetched_pages.push(page);
        let offset = (page as usize - 1) * page_size;
        Ok(self
            .items
            .iter()
            .skip(offset)
            .take(page_size)
            .copied()
            .collect())
    }
}
