//! Resolution orchestrator.
//!
//! Sequences ticket resolution, customer lookup, and posts lookup for one
//! cycle, strictly in that order, and folds every outcome into the session
//! state. No failure escapes the public entry points; transport errors and
//! zero-match results land in `Status::Error` and `Status::NotFound`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use directory_client::{Customer, DirectoryClient, DirectoryError};

use crate::draft::{build_reply_draft, DraftContext, PhrasePicker, Tone};
use crate::host::{Clipboard, NotificationSink};
use crate::session::{LookupPhase, SessionEvent, SessionState, Status};
use crate::ticket::{resolve_ticket, Ticket, TicketContextProvider, TicketSource};

/// Fallbacks substituted for missing customer fields before generation.
const FALLBACK_NAME: &str = "there";
const FALLBACK_COMPANY: &str = "your company";
const FALLBACK_CITY: &str = "your city";
const FALLBACK_SUBJECT: &str = "your request";

/// Read seam over the directory service, so the orchestrator can run against
/// in-memory fakes in tests.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DirectoryError>;
    async fn list_recent_posts(&self, customer_id: i64) -> Result<Vec<String>, DirectoryError>;
}

#[async_trait]
impl CustomerDirectory for DirectoryClient {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DirectoryError> {
        DirectoryClient::find_by_email(self, email).await
    }

    async fn list_recent_posts(&self, customer_id: i64) -> Result<Vec<String>, DirectoryError> {
        DirectoryClient::list_recent_posts(self, customer_id).await
    }
}

/// The widget core: owns the session state and drives resolution cycles.
pub struct Widget<D, P> {
    state: SessionState,
    directory: D,
    picker: P,
    provider: Option<Arc<dyn TicketContextProvider>>,
    location: Option<String>,
    /// Host handle retained after a successful provider probe, for host UI
    /// collaborators outside the core.
    host_handle: Option<Arc<dyn TicketContextProvider>>,
    next_cycle: u64,
    in_flight: bool,
}

impl<D: CustomerDirectory, P: PhrasePicker> Widget<D, P> {
    pub fn new(directory: D, picker: P) -> Self {
        Self {
            state: SessionState::default(),
            directory,
            picker,
            provider: None,
            location: None,
            host_handle: None,
            next_cycle: 0,
            in_flight: false,
        }
    }

    /// Use a host context provider as the primary ticket source.
    pub fn with_provider(mut self, provider: Arc<dyn TicketContextProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Location URL whose query parameters feed the ticket fallback.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current draft text, for the host to copy or display.
    pub fn draft(&self) -> &str {
        &self.state.draft
    }

    /// Host provider handle retained by the last successful probe.
    pub fn host_handle(&self) -> Option<&Arc<dyn TicketContextProvider>> {
        self.host_handle.as_ref()
    }

    /// Run the first resolution cycle.
    pub async fn initialize(&mut self) {
        self.run_cycle(false).await;
    }

    /// Re-run the whole resolution sequence from scratch, discarding prior
    /// customer and posts state. A no-op while another cycle is in flight.
    pub async fn refresh(&mut self) {
        self.run_cycle(true).await;
    }

    async fn run_cycle(&mut self, refresh: bool) {
        if self.in_flight {
            tracing::debug!("Resolution cycle already in flight, ignoring request");
            return;
        }
        self.in_flight = true;

        self.next_cycle += 1;
        let cycle = self.next_cycle;
        tracing::info!(cycle, refresh, "Starting resolution cycle");
        self.apply(SessionEvent::CycleStarted { cycle, refresh });

        let resolved = resolve_ticket(self.provider.clone(), self.location.as_deref()).await;
        if let TicketSource::HostProvider(handle) = &resolved.source {
            self.host_handle = Some(handle.clone());
        }
        let ticket = resolved.ticket;
        self.apply(SessionEvent::TicketResolved {
            cycle,
            ticket: ticket.clone(),
        });

        self.lookup(cycle, &ticket).await;

        self.apply(SessionEvent::CycleFinished { cycle, at: Utc::now() });
        self.regenerate_draft();
        self.in_flight = false;
        tracing::info!(cycle, status = %self.state.status, "Resolution cycle finished");
    }

    /// Customer lookup followed by posts lookup, strictly sequential: posts
    /// need the resolved customer id.
    async fn lookup(&mut self, cycle: u64, ticket: &Ticket) {
        match self.directory.find_by_email(&ticket.email).await {
            Ok(Some(customer)) => {
                tracing::info!(cycle, customer_id = customer.id, "Customer resolved");
                let customer_id = customer.id;
                self.apply(SessionEvent::CustomerResolved { cycle, customer });

                match self.directory.list_recent_posts(customer_id).await {
                    Ok(titles) => {
                        self.apply(SessionEvent::PostsLoaded { cycle, titles });
                    }
                    Err(err) => {
                        tracing::warn!(cycle, error = %err, "Posts lookup failed");
                        self.apply(SessionEvent::LookupFailed {
                            cycle,
                            phase: LookupPhase::Posts,
                            message: err.to_string(),
                        });
                    }
                }
            }
            Ok(None) => {
                tracing::info!(cycle, email = %ticket.email, "No customer matched requester email");
                self.apply(SessionEvent::CustomerMissing { cycle });
            }
            Err(err) => {
                tracing::warn!(cycle, error = %err, "Customer lookup failed");
                self.apply(SessionEvent::LookupFailed {
                    cycle,
                    phase: LookupPhase::Customer,
                    message: err.to_string(),
                });
            }
        }
    }

    /// Re-run only the directory lookup with the currently held ticket,
    /// without re-resolving the ticket source. A no-op unless the session is
    /// in the error state.
    pub async fn retry_lookup(&mut self) {
        if !matches!(self.state.status, Status::Error(_)) {
            tracing::debug!(status = %self.state.status, "Retry requested outside error state, ignoring");
            return;
        }
        let Some(ticket) = self.state.ticket.clone() else {
            return;
        };
        if self.in_flight {
            return;
        }
        self.in_flight = true;

        let cycle = self.state.cycle;
        tracing::info!(cycle, "Retrying directory lookup");
        self.lookup(cycle, &ticket).await;
        self.apply(SessionEvent::CycleFinished { cycle, at: Utc::now() });
        self.regenerate_draft();
        self.in_flight = false;
    }

    /// Switch the draft tone. Regenerates the draft, never re-fetches.
    pub fn set_tone(&mut self, tone: Tone) {
        if self.state.tone == tone {
            return;
        }
        self.apply(SessionEvent::ToneChanged { tone });
        self.regenerate_draft();
    }

    /// Manual user edit. Persists until the next regeneration trigger.
    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.apply(SessionEvent::DraftEdited { text: text.into() });
    }

    /// Explicit regenerate action.
    pub fn regenerate(&mut self) {
        self.regenerate_draft();
    }

    /// Copy the current draft through the host clipboard seam and notify on
    /// success. The copy and toast mechanisms live outside the core.
    pub async fn copy_draft<C: Clipboard, N: NotificationSink>(&self, clipboard: &C, notify: &N) {
        match clipboard.write(&self.state.draft).await {
            Ok(()) => notify.notify("Copied to clipboard"),
            Err(err) => tracing::warn!(error = %err, "Clipboard write failed"),
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        self.state = self.state.apply(&event);
    }

    #[cfg(test)]
    pub(crate) fn directory(&self) -> &D {
        &self.directory
    }

    #[cfg(test)]
    pub(crate) fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    fn regenerate_draft(&mut self) {
        // The generator is never invoked without a ticket identity.
        let Some(ticket) = self.state.ticket.clone().filter(|t| !t.email.is_empty()) else {
            return;
        };

        let ctx = draft_context(&ticket, self.state.customer.as_ref());
        let text = build_reply_draft(&ctx, self.state.tone, &mut self.picker);
        self.apply(SessionEvent::DraftGenerated { text });
    }
}

/// Fold ticket and customer fields into generator inputs, substituting
/// fallbacks for missing optional fields. The generator itself never does.
fn draft_context(ticket: &Ticket, customer: Option<&Customer>) -> DraftContext {
    DraftContext {
        customer_name: customer
            .map(|c| c.name.clone())
            .unwrap_or_else(|| FALLBACK_NAME.to_string()),
        company_name: customer
            .and_then(|c| c.company.as_ref())
            .map(|c| c.name.clone())
            .unwrap_or_else(|| FALLBACK_COMPANY.to_string()),
        city: customer
            .and_then(|c| c.address.as_ref())
            .map(|a| a.city.clone())
            .unwrap_or_else(|| FALLBACK_CITY.to_string()),
        subject: if ticket.subject.is_empty() {
            FALLBACK_SUBJECT.to_string()
        } else {
            ticket.subject.clone()
        },
        description: ticket.description.clone(),
    }
}
