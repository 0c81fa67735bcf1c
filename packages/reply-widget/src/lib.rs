//! # Reply Widget Core
//!
//! Data-resolution and draft-generation pipeline for the support reply
//! widget. Given an inbound ticket, the core resolves the requester against
//! the customer directory, surfaces their recent posts, and synthesizes an
//! editable reply draft.
//!
//! ## Architecture
//!
//! ```text
//! Ticket Source Resolver ──► Resolution Orchestrator ──► Directory Client
//!         │                          │                         │
//!         │                          ▼                         │
//!         └──────────────────► Session State ◄────────────────┘
//!                                    │
//!                                    ▼
//!                             Draft Generator ──► Session State (draft)
//! ```
//!
//! The session state is a single immutable value replaced through a pure
//! reducer; the orchestrator performs the IO and applies events tagged with
//! a per-cycle generation number, so a slow stale cycle can never overwrite
//! a newer one. Rendering, clipboard, and notifications are host seams the
//! core calls but does not implement.

pub mod config;
pub mod draft;
pub mod host;
pub mod orchestrator;
pub mod session;
pub mod text;
pub mod ticket;


pub use config::WidgetConfig;
pub use draft::{build_reply_draft, DraftContext, PhrasePicker, RandomPicker, Tone};
pub use host::{Clipboard, NotificationSink};
pub use orchestrator::{CustomerDirectory, Widget};
pub use session::{LookupPhase, SessionEvent, SessionState, Status};
pub use text::{format_clock_time, trim_text};
pub use ticket::{
    resolve_ticket, ResolvedTicket, Ticket, TicketContextProvider, TicketSource,
};
