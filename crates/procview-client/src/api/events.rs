//! Events API.

use crate::client::AuthenticatedClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::types::{Event, EventScope};

/// Events API client.
pub struct EventsApi {
    client: AuthenticatedClient,
}

impl EventsApi {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// List events of a process instance or task.
    ///
    /// A non-empty `filter` is sent as `filter_text` and also applied to the
    /// result, so engines that ignore the parameter still get filtered.
    pub async fn list(
        &self,
        scope: EventScope,
        id: &str,
        filter: Option<&str>,
    ) -> Result<Vec<Event>> {
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());

        let url = self.client.resource_url(&[scope.as_path(), id, "events"])?;
        let mut spec = RequestSpec::get(url);
        if let Some(text) = filter {
            spec = spec.query("filter_text", text);
        }

        let events: Vec<Event> = super::fetch_list(&self.client, spec, "events").await?;
        Ok(match filter {
            Some(text) => events.into_iter().filter(|e| e.matches(text)).collect(),
            None => events,
        })
    }
}
