//! Infinite-scroll accumulator for discovery and search feeds.
//!
//! A growing, append-only item list fetched page by page, triggered by a
//! "sentinel element is visible" signal. Exhaustion is a heuristic: the
//! first page strictly shorter than `page_size` latches `has_more` false.
//! The remote contract backing that heuristic lives on
//! [`crate::remote::PageFetcher`].

use tracing::warn;

use crate::remote::{PageFetcher, RemoteError};

pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Request for the next page, handed to whoever drives the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number to fetch.
    pub page: u32,
    pub page_size: usize,
}

/// The accumulator state machine.
///
/// Items only grow and never reorder within a session; `reset` is the one
/// full-replacement operation (used when the active filter changes).
#[derive(Debug, Clone)]
pub struct FeedAccumulator<T> {
    items: Vec<T>,
    /// Last successfully fetched page, 1-based. Page 1 is the initial
    /// server-rendered batch.
    page: u32,
    page_size: usize,
    in_flight: bool,
    has_more: bool,
}

impl<T> FeedAccumulator<T> {
    pub fn new(initial: Vec<T>, page_size: usize) -> Self {
        Self {
            items: initial,
            page: 1,
            page_size,
            in_flight: false,
            has_more: true,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The sentinel became visible. Returns the page to fetch, or `None`
    /// when a load is already in flight or the feed is exhausted -
    /// visibility events in those states are no-ops, not queued.
    pub fn on_visible(&mut self) -> Option<PageRequest> {
        if self.in_flight || !self.has_more {
            return None;
        }
        self.in_flight = true;
        Some(PageRequest {
            page: self.page + 1,
            page_size: self.page_size,
        })
    }

    /// A fetch succeeded: append in arrival order, advance the page counter
    /// by exactly one, and latch exhaustion on a short page.
    pub fn complete_success(&mut self, new_items: Vec<T>) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        if new_items.len() < self.page_size {
            self.has_more = false;
        }
        if !new_items.is_empty() {
            self.items.extend(new_items);
            self.page += 1;
        }
    }

    /// A fetch failed: the list, page counter, and `has_more` stay intact
    /// so the next visibility trigger retries the same page.
    pub fn complete_failure(&mut self, err: &RemoteError) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        warn!(error = %err, page = self.page + 1, "page fetch failed; keeping accumulated items");
    }

    /// Replace the accumulated state wholesale (filter change), returning
    /// to page 1 with exhaustion cleared.
    pub fn reset(&mut self, new_items: Vec<T>) {
        self.items = new_items;
        self.page = 1;
        self.in_flight = false;
        self.has_more = true;
    }
}

/// Accumulator plus fetcher: one call per sentinel-visibility event.
pub struct Feed<F: PageFetcher> {
    accumulator: FeedAccumulator<F::Item>,
    fetcher: F,
}

impl<F: PageFetcher> Feed<F> {
    pub fn new(initial: Vec<F::Item>, page_size: usize, fetcher: F) -> Self {
        Self {
            accumulator: FeedAccumulator::new(initial, page_size),
            fetcher,
        }
    }

    pub fn items(&self) -> &[F::Item] {
        self.accumulator.items()
    }

    pub fn has_more(&self) -> bool {
        self.accumulator.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.accumulator.is_loading()
    }

    /// Drive one visibility event to completion. Returns the number of
    /// items appended; a failure leaves state retryable and surfaces the
    /// error.
    pub fn on_visible(&mut self) -> Result<usize, RemoteError> {
        let Some(request) = self.accumulator.on_visible() else {
            return Ok(0);
        };
        match self.fetcher.fetch_page(request.page, request.page_size) {
            Ok(new_items) => {
                let appended = new_items.len();
                self.accumulator.complete_success(new_items);
                Ok(appended)
            }
            Err(err) => {
                self.accumulator.complete_failure(&err);
                Err(err)
            }
        }
    }

    pub fn reset(&mut self, new_items: Vec<F::Item>) {
        self.accumulator.reset(new_items);
    }
}
