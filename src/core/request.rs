//! Single-slot in-flight request tracking.
//!
//! `Idle -> Pending -> Settled(outcome) -> Idle`. A trigger is only accepted
//! from `Idle`; while a request is pending further triggers are ignored, not
//! queued.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Settled(Outcome),
}

/// Proof that a trigger was accepted. Only the slot hands these out, and
/// settling consumes it, so a request settles at most once.
#[derive(Debug)]
#[must_use = "a pending request must be settled with its ticket"]
pub struct RequestTicket {
    _private: (),
}

#[derive(Debug, Default)]
pub struct RequestSlot {
    state: RequestState,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == RequestState::Pending
    }

    pub fn trigger(&mut self) -> Option<RequestTicket> {
        match self.state {
            RequestState::Idle => {
                self.state = RequestState::Pending;
                Some(RequestTicket { _private: () })
            }
            state => {
                tracing::debug!("Trigger ignored, request slot is {:?}", state);
                None
            }
        }
    }

    pub fn settle(&mut self, ticket: RequestTicket, outcome: Outcome) {
        drop(ticket);
        self.state = RequestState::Settled(outcome);
    }

    /// Hand the settled outcome to the caller and return to `Idle`.
    pub fn consume(&mut self) -> Option<Outcome> {
        match self.state {
            RequestState::Settled(outcome) => {
                self.state = RequestState::Idle;
                Some(outcome)
            }
            _ => None,
        }
    }
}
