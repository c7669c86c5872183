//! Variables API.

use crate::client::AuthenticatedClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::types::Variable;

/// Variables API client.
pub struct VariablesApi {
    client: AuthenticatedClient,
}

impl VariablesApi {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Variables of a process instance.
    pub async fn for_process(&self, process_id: &str) -> Result<Vec<Variable>> {
        let url = self
            .client
            .resource_url(&["process-instances", process_id, "variables"])?;
        let spec = RequestSpec::get(url);
        super::fetch_list(&self.client, spec, "process_variables").await
    }

    /// Variables local to a user task.
    pub async fn for_task(&self, task_id: &str) -> Result<Vec<Variable>> {
        let spec = RequestSpec::get(self.client.resource_url(&["tasks", task_id, "variables"])?);
        super::fetch_list(&self.client, spec, "task_variables").await
    }
}
