//! Session state and its pure reducer.
//!
//! Pure decision logic - no IO, only state transitions. The orchestrator
//! performs the network calls and folds their outcomes into the state by
//! applying events; the reducer is the single place state changes happen,
//! which keeps the loading/error/refresh machine testable without any
//! rendering or transport.
//!
//! Every fact produced inside a resolution cycle carries that cycle's
//! generation number. `apply` discards facts from a superseded cycle, so a
//! slow earlier cycle can never overwrite the results of a later one.

use std::fmt;

use chrono::{DateTime, Utc};
use directory_client::Customer;

use crate::draft::Tone;
use crate::ticket::Ticket;

/// Resolution status, derived from the last applied events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No resolution cycle has started yet.
    Idle,
    /// First resolution cycle in flight.
    Loading,
    /// Customer resolved for the current ticket.
    Ready,
    /// A non-initial cycle in flight.
    Refreshing,
    /// The last network operation failed and was not superseded by a success.
    Error(String),
    /// The directory lookup succeeded but matched zero records.
    NotFound,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Loading => write!(f, "loading"),
            Status::Ready => write!(f, "ready"),
            Status::Refreshing => write!(f, "refreshing"),
            Status::Error(message) => write!(f, "error: {message}"),
            Status::NotFound => write!(f, "not found"),
        }
    }
}

/// Which lookup a failure belongs to.
///
/// A posts failure after a successful customer resolution degrades
/// gracefully: the customer stays, only the posts list is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Customer,
    Posts,
}

/// Facts about one resolution cycle, plus user-driven edits.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    CycleStarted { cycle: u64, refresh: bool },
    TicketResolved { cycle: u64, ticket: Ticket },
    CustomerResolved { cycle: u64, customer: Customer },
    CustomerMissing { cycle: u64 },
    PostsLoaded { cycle: u64, titles: Vec<String> },
    LookupFailed { cycle: u64, phase: LookupPhase, message: String },
    CycleFinished { cycle: u64, at: DateTime<Utc> },
    ToneChanged { tone: Tone },
    DraftGenerated { text: String },
    DraftEdited { text: String },
}

impl SessionEvent {
    /// Generation number of the cycle this event belongs to, if any.
    /// Tone and draft events are user-driven and apply regardless of cycle.
    fn cycle(&self) -> Option<u64> {
        match self {
            SessionEvent::CycleStarted { cycle, .. }
            | SessionEvent::TicketResolved { cycle, .. }
            | SessionEvent::CustomerResolved { cycle, .. }
            | SessionEvent::CustomerMissing { cycle }
            | SessionEvent::PostsLoaded { cycle, .. }
            | SessionEvent::LookupFailed { cycle, .. }
            | SessionEvent::CycleFinished { cycle, .. } => Some(*cycle),
            SessionEvent::ToneChanged { .. }
            | SessionEvent::DraftGenerated { .. }
            | SessionEvent::DraftEdited { .. } => None,
        }
    }
}

/// The whole widget view in one immutable value.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Generation number of the current resolution cycle.
    pub cycle: u64,
    pub ticket: Option<Ticket>,
    pub customer: Option<Customer>,
    /// Recent post titles, most recent first, at most three.
    pub posts: Vec<String>,
    pub tone: Tone,
    pub draft: String,
    pub status: Status,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            cycle: 0,
            ticket: None,
            customer: None,
            posts: Vec::new(),
            tone: Tone::default(),
            draft: String::new(),
            status: Status::Idle,
            last_updated_at: None,
        }
    }
}

impl SessionState {
    /// Pure transition function: current state + event -> next state.
    ///
    /// Events from a superseded cycle are discarded unchanged. That is the
    /// staleness guard: a later cycle bumps `self.cycle` via `CycleStarted`,
    /// after which completions of earlier cycles no longer apply.
    pub fn apply(&self, event: &SessionEvent) -> SessionState {
        if let Some(cycle) = event.cycle() {
            if cycle < self.cycle {
                tracing::debug!(stale = cycle, current = self.cycle, "Discarding stale cycle event");
                return self.clone();
            }
        }

        let mut next = self.clone();
        match event {
            SessionEvent::CycleStarted { cycle, refresh } => {
                next.cycle = *cycle;
                next.customer = None;
                next.posts.clear();
                next.status = if *refresh {
                    Status::Refreshing
                } else {
                    Status::Loading
                };
            }
            SessionEvent::TicketResolved { ticket, .. } => {
                next.ticket = Some(ticket.clone());
            }
            SessionEvent::CustomerResolved { customer, .. } => {
                next.customer = Some(customer.clone());
                next.status = Status::Ready;
            }
            SessionEvent::CustomerMissing { .. } => {
                next.customer = None;
                next.posts.clear();
                next.status = Status::NotFound;
            }
            SessionEvent::PostsLoaded { titles, .. } => {
                next.posts = titles.clone();
            }
            SessionEvent::LookupFailed { phase, message, .. } => {
                // A posts failure keeps the already-resolved customer.
                if *phase == LookupPhase::Customer {
                    next.customer = None;
                }
                next.posts.clear();
                next.status = Status::Error(message.clone());
            }
            SessionEvent::CycleFinished { at, .. } => {
                next.last_updated_at = Some(*at);
            }
            SessionEvent::ToneChanged { tone } => {
                next.tone = *tone;
            }
            SessionEvent::DraftGenerated { text } | SessionEvent::DraftEdited { text } => {
                next.draft = text.clone();
            }
        }
        next
    }

    /// True once a ticket with a requester email exists. Draft generation is
    /// withheld until then.
    pub fn has_ticket(&self) -> bool {
        self.ticket.as_ref().is_some_and(|t| !t.email.is_empty())
    }
}
