//! Workflow engine resource accessors.
//!
//! Accessors own the data-layer policy: a non-2xx status or a payload that
//! does not decode is logged and turned into an absent result. Only
//! authentication and transport failures surface as errors.

mod events;
mod process_instances;
mod subprocesses;
mod tasks;
mod variables;

pub use events::EventsApi;
pub use process_instances::ProcessInstancesApi;
pub use subprocesses::SubprocessesApi;
pub use tasks::TasksApi;
pub use variables::VariablesApi;

use serde::de::DeserializeOwned;

use crate::client::AuthenticatedClient;
use crate::error::Result;
use crate::request::RequestSpec;

/// Execute `spec` and decode the body, or `None` if the engine said no.
pub(crate) async fn fetch_lenient<T: DeserializeOwned>(
    client: &AuthenticatedClient,
    spec: RequestSpec,
    resource: &str,
) -> Result<Option<T>> {
    let endpoint = spec.endpoint().to_string();
    let response = client.execute(spec).await?;

    if !response.is_success() {
        tracing::warn!(
            resource,
            endpoint = %endpoint,
            status = response.status().as_u16(),
            "Engine returned an error status, treating as absent"
        );
        return Ok(None);
    }

    match response.json::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(
                resource,
                endpoint = %endpoint,
                error = %e,
                "Engine returned an undecodable payload, treating as absent"
            );
            Ok(None)
        }
    }
}

/// Same as [`fetch_lenient`] for list resources: absent becomes empty.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &AuthenticatedClient,
    spec: RequestSpec,
    resource: &str,
) -> Result<Vec<T>> {
    Ok(fetch_lenient::<Vec<T>>(client, spec, resource)
        .await?
        .unwrap_or_default())
}
