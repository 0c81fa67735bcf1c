//! Ticket acquisition: host context provider first, query-parameter fallback second.
//!
//! Resolution never fails. The host provider is probed explicitly; if it is
//! absent or reports an error, the three named query parameters of the
//! widget's location are read, with fixed defaults for each when missing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

/// Field names requested from the host context provider.
pub const FIELD_EMAIL: &str = "ticket.requester.email";
pub const FIELD_SUBJECT: &str = "ticket.subject";
pub const FIELD_DESCRIPTION: &str = "ticket.description";

const DEFAULT_EMAIL: &str = "Sincere@april.biz";
const DEFAULT_SUBJECT: &str = "Sample subject about billing";
const DEFAULT_DESCRIPTION: &str =
    "Customer reports an issue with their billing cycle and needs assistance.";

/// The inbound support request context.
///
/// Immutable once set for a resolution cycle; replaced wholesale on refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ticket {
    pub email: String,
    pub subject: String,
    pub description: String,
}

/// Host-runtime collaborator that can supply ticket fields.
///
/// The widget only calls `get`; everything else the host handle can do
/// belongs to the presentation layer.
#[async_trait]
pub trait TicketContextProvider: Send + Sync {
    async fn get(&self, fields: &[&str]) -> anyhow::Result<HashMap<String, String>>;
}

/// Which source produced the ticket for the current cycle.
#[derive(Clone)]
pub enum TicketSource {
    /// Host provider answered; the handle is retained for host UI use.
    HostProvider(Arc<dyn TicketContextProvider>),
    /// No usable provider; ticket came from location query parameters.
    QueryFallback,
}

pub struct ResolvedTicket {
    pub ticket: Ticket,
    pub source: TicketSource,
}

/// Resolve the ticket for one cycle. Never fails: the query fallback's
/// defaults guarantee a fully populated ticket.
pub async fn resolve_ticket(
    provider: Option<Arc<dyn TicketContextProvider>>,
    location: Option<&str>,
) -> ResolvedTicket {
    if let Some(provider) = provider {
        match provider
            .get(&[FIELD_EMAIL, FIELD_SUBJECT, FIELD_DESCRIPTION])
            .await
        {
            Ok(mut fields) => {
                let mut take = |name: &str| fields.remove(name).unwrap_or_default();
                let ticket = Ticket {
                    email: take(FIELD_EMAIL),
                    subject: take(FIELD_SUBJECT),
                    description: take(FIELD_DESCRIPTION),
                };
                tracing::debug!(email = %ticket.email, "Ticket read from host provider");
                return ResolvedTicket {
                    ticket,
                    source: TicketSource::HostProvider(provider),
                };
            }
            Err(err) => {
                tracing::warn!(error = %err, "Host provider failed, using query fallback");
            }
        }
    }

    ResolvedTicket {
        ticket: ticket_from_query(location),
        source: TicketSource::QueryFallback,
    }
}

fn ticket_from_query(location: Option<&str>) -> Ticket {
    let parsed = location.and_then(|l| Url::parse(l).ok());
    let param = |name: &str, default: &str| -> String {
        parsed
            .as_ref()
            .and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.into_owned())
            })
            .unwrap_or_else(|| default.to_string())
    };

    Ticket {
        email: param("email", DEFAULT_EMAIL),
        subject: param("subject", DEFAULT_SUBJECT),
        description: param("description", DEFAULT_DESCRIPTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider {
        fields: HashMap<String, String>,
    }

    #[async_trait]
    impl TicketContextProvider for StaticProvider {
        async fn get(&self, fields: &[&str]) -> anyhow::Result<HashMap<String, String>> {
            Ok(fields
                .iter()
                .filter_map(|name| {
                    self.fields
                        .get(*name)
                        .map(|value| (name.to_string(), value.clone()))
                })
                .collect())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl TicketContextProvider for FailingProvider {
        async fn get(&self, _fields: &[&str]) -> anyhow::Result<HashMap<String, String>> {
            anyhow::bail!("host runtime unavailable")
        }
    }

    #[tokio::test]
    async fn no_provider_and_no_location_yields_defaults() {
        let resolved = resolve_ticket(None, None).await;
        assert_eq!(resolved.ticket.email, "Sincere@april.biz");
        assert_eq!(resolved.ticket.subject, "Sample subject about billing");
        assert!(resolved.ticket.description.contains("billing cycle"));
        assert!(matches!(resolved.source, TicketSource::QueryFallback));
    }

    #[tokio::test]
    async fn query_parameters_override_defaults() {
        let location = "https://widget.local/?email=jo%40example.com&subject=Login+help";
        let resolved = resolve_ticket(None, Some(location)).await;
        assert_eq!(resolved.ticket.email, "jo@example.com");
        assert_eq!(resolved.ticket.subject, "Login help");
        // Absent parameter still falls back to its default.
        assert!(resolved.ticket.description.contains("billing cycle"));
    }

    #[tokio::test]
    async fn provider_success_retains_handle() {
        let mut fields = HashMap::new();
        fields.insert(FIELD_EMAIL.to_string(), "ana@example.com".to_string());
        fields.insert(FIELD_SUBJECT.to_string(), "Refund".to_string());
        fields.insert(FIELD_DESCRIPTION.to_string(), "Wants a refund".to_string());

        let provider: Arc<dyn TicketContextProvider> = Arc::new(StaticProvider { fields });
        let resolved = resolve_ticket(Some(provider), None).await;

        assert_eq!(resolved.ticket.email, "ana@example.com");
        assert!(matches!(resolved.source, TicketSource::HostProvider(_)));
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_query() {
        let provider: Arc<dyn TicketContextProvider> = Arc::new(FailingProvider);
        let location = "https://widget.local/?email=fallback%40example.com";
        let resolved = resolve_ticket(Some(provider), Some(location)).await;

        assert_eq!(resolved.ticket.email, "fallback@example.com");
        assert!(matches!(resolved.source, TicketSource::QueryFallback));
    }

    #[tokio::test]
    async fn unparseable_location_yields_defaults() {
        let resolved = resolve_ticket(None, Some("not a url")).await;
        assert_eq!(resolved.ticket.email, "Sincere@april.biz");
    }
}
