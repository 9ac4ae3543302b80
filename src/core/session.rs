use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::models::{Restaurant, SwipeAction};

/// Where a client swipe session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a filtered restaurant list to arrive.
    Loading,
    /// Presenting the card at this index of the shuffled deck.
    Presenting(usize),
    /// The deck ran out.
    Exhausted,
    /// The fetch failed; a retry may re-enter Loading.
    Error,
}

/// Remote-confirmation status of a session-local like.
///
/// Entries are appended optimistically before the remote recording
/// completes; a failed recording leaves the entry Pending rather than
/// silently dropping or retracting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    Pending,
    Confirmed,
}

/// One entry of the session-local liked list.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLike {
    pub restaurant_id: String,
    pub status: LikeStatus,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("a swipe decision is already in flight")]
    DecisionInFlight,
    #[error("no card is currently presented")]
    NoCurrentCard,
}

#[derive(Debug, Clone)]
struct PendingDecision {
    restaurant_id: String,
    action: SwipeAction,
}

/// Client-side swipe session.
///
/// Holds the shuffled, not-yet-seen deck, the card position, and the
/// session-local liked list displayed immediately regardless of remote
/// confirmation latency. Single-threaded by construction: at most one
/// decision may be in flight, enforced by [`SwipeSession::begin_decision`].
#[derive(Debug)]
pub struct SwipeSession {
    state: SessionState,
    deck: Vec<Restaurant>,
    liked: Vec<SessionLike>,
    pending: Option<PendingDecision>,
}

impl SwipeSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
            deck: Vec::new(),
            liked: Vec::new(),
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The card currently facing the user, if any.
    pub fn current(&self) -> Option<&Restaurant> {
        match self.state {
            SessionState::Presenting(index) => self.deck.get(index),
            _ => None,
        }
    }

    /// Session-local liked list, cumulative for the session's lifetime.
    pub fn session_likes(&self) -> &[SessionLike] {
        &self.liked
    }

    pub fn decision_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// A fetched restaurant list arrived. The deck is re-shuffled with a
    /// full Fisher-Yates permutation so repeated loads of the same
    /// server-ordered list present different sequences.
    pub fn feed_loaded<R: Rng>(&mut self, mut restaurants: Vec<Restaurant>, rng: &mut R) {
        if self.state != SessionState::Loading {
            return;
        }
        restaurants.shuffle(rng);
        self.deck = restaurants;
        self.state = if self.deck.is_empty() {
            SessionState::Exhausted
        } else {
            SessionState::Presenting(0)
        };
    }

    /// The fetch failed. The error state still allows a retry.
    pub fn feed_failed(&mut self) {
        if self.state == SessionState::Loading {
            self.state = SessionState::Error;
        }
    }

    /// Retry a failed fetch.
    pub fn retry(&mut self) {
        if self.state == SessionState::Error {
            self.state = SessionState::Loading;
        }
    }

    /// Explicit reload from the exhausted state: discards the deck and
    /// position but keeps the session-local liked list.
    pub fn reload(&mut self) {
        if self.state == SessionState::Exhausted {
            self.deck.clear();
            self.state = SessionState::Loading;
        }
    }

    /// Start a decision on the presented card.
    ///
    /// Rejected while a prior decision's remote recording is still in
    /// flight. On a like, the restaurant id is appended to the
    /// session-local liked list immediately, marked Pending. Returns the
    /// restaurant id to submit to the swipe recorder.
    pub fn begin_decision(&mut self, action: SwipeAction) -> Result<String, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::DecisionInFlight);
        }
        let restaurant_id = self
            .current()
            .map(|r| r.id.clone())
            .ok_or(SessionError::NoCurrentCard)?;

        if action == SwipeAction::Like {
            self.liked.push(SessionLike {
                restaurant_id: restaurant_id.clone(),
                status: LikeStatus::Pending,
            });
        }
        self.pending = Some(PendingDecision {
            restaurant_id: restaurant_id.clone(),
            action,
        });
        Ok(restaurant_id)
    }

    /// The remote recording for the in-flight decision finished.
    ///
    /// The card index advances either way: a failed remote record does
    /// not block local navigation. A recorded like promotes its entry to
    /// Confirmed; a failed one stays Pending and is never rolled back.
    pub fn complete_decision(&mut self, recorded: bool) {
        let Some(decision) = self.pending.take() else {
            return;
        };

        if recorded && decision.action == SwipeAction::Like {
            if let Some(entry) = self
                .liked
                .iter_mut()
                .rev()
                .find(|entry| entry.restaurant_id == decision.restaurant_id)
            {
                entry.status = LikeStatus::Confirmed;
            }
        }

        if let SessionState::Presenting(index) = self.state {
            let next = index + 1;
            self.state = if next >= self.deck.len() {
                SessionState::Exhausted
            } else {
                SessionState::Presenting(next)
            };
        }
    }
}

impl Default for SwipeSession {
    fn default() -> Self {
        Self::new()
    }
}
