//! Frontier and visited-set management
//!
//! The frontier owns the queue of pending URLs and the set of URLs that
//! have already been handed out for processing. Every URL moves through
//! the state machine `Unseen -> Queued -> Visited`, never backwards, which
//! is what keeps a crawl over a cyclic link graph finite.

use std::collections::{HashMap, VecDeque};
use url::Url;

/// Where a URL stands in the crawl lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Never offered to the frontier
    Unseen,

    /// Waiting in the queue to be processed
    Queued,

    /// Dequeued and processed (successfully or not); final
    Visited,
}

/// FIFO queue of pending URLs plus the visited set
///
/// Insertion order determines visit order, so a crawl seeded with one URL
/// proceeds breadth-first through the link graph. The frontier is owned
/// exclusively by the orchestrator for the duration of a run; under a
/// concurrent-fetch extension, `enqueue` and `mark_visited` are the
/// transitions that would need to become atomic.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    states: HashMap<Url, UrlState>,
    visited: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a URL to the frontier
    ///
    /// Transitions `Unseen -> Queued`. A URL that is already queued or
    /// visited is left untouched, so repeated calls with the same URL are
    /// idempotent. Returns true iff the URL was admitted to the queue.
    pub fn enqueue(&mut self, url: Url) -> bool {
        match self.state(&url) {
            UrlState::Unseen => {
                self.states.insert(url.clone(), UrlState::Queued);
                self.queue.push_back(url);
                true
            }
            UrlState::Queued | UrlState::Visited => false,
        }
    }

    /// Removes and returns the earliest-queued URL
    ///
    /// Returns `None` when the queue is exhausted, which is the crawl
    /// loop's sole termination signal.
    pub fn dequeue(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Transitions a URL `Queued -> Visited` once processing completes
    ///
    /// Applies on success and on handled failure alike; either way the URL
    /// can never be re-enqueued, even if discovered again later.
    pub fn mark_visited(&mut self, url: &Url) {
        let previous = self.states.insert(url.clone(), UrlState::Visited);
        if previous != Some(UrlState::Visited) {
            self.visited += 1;
        }
    }

    /// Returns the state of a URL
    pub fn state(&self, url: &Url) -> UrlState {
        self.states.get(url).copied().unwrap_or(UrlState::Unseen)
    }

    /// Number of URLs waiting in the queue
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs visited so far; non-decreasing over a run
    pub fn visited_len(&self) -> usize {
        self.visited
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
