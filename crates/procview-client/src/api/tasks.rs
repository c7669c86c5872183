//! User tasks API.

use crate::client::AuthenticatedClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::types::UserTask;

/// User tasks API client.
pub struct TasksApi {
    client: AuthenticatedClient,
}

impl TasksApi {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// User tasks of a process instance.
    pub async fn for_process(&self, process_id: &str) -> Result<Vec<UserTask>> {
        let url = self
            .client
            .resource_url(&["process-instances", process_id, "tasks"])?;
        let spec = RequestSpec::get(url);
        super::fetch_list(&self.client, spec, "user_tasks").await
    }
}
