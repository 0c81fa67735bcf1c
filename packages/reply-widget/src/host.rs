//! Seams to host-side collaborators the core calls but does not implement.

use async_trait::async_trait;

/// Clipboard access supplied by the host.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write(&self, text: &str) -> anyhow::Result<()>;
}

/// Toast-style notifications supplied by the host.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}
