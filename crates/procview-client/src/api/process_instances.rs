//! Process instances API.

use crate::client::AuthenticatedClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::types::ProcessInstance;

/// Process instances API client.
pub struct ProcessInstancesApi {
    client: AuthenticatedClient,
}

impl ProcessInstancesApi {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Get a process instance by ID. `None` when the engine has no such
    /// instance or answers with something unreadable.
    pub async fn get(&self, id: &str) -> Result<Option<ProcessInstance>> {
        let spec = RequestSpec::get(self.client.resource_url(&["process-instances", id])?);
        super::fetch_lenient(&self.client, spec, "process_instance").await
    }
}
