//! Subprocesses API.

use crate::client::AuthenticatedClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::types::Subprocess;

pub struct SubprocessesApi {
    client: AuthenticatedClient,
}

impl SubprocessesApi {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    pub async fn for_process(&self, process_id: &str) -> Result<Vec<Subprocess>> {
        let url = self
            .client
            .resource_url(&["process-instances", process_id, "subprocesses"])?;
        let spec = RequestSpec::get(url);
        super::fetch_list(&self.client, spec, "subprocesses").await
    }
}
