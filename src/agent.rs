use crate::client::BacalhauClient;
use crate::errors::Result;
use crate::models::agent::{
    GetAgentDebugResponse, GetAgentNodeResponse, GetVersionResponse, IsAliveResponse,
};

/// Checks whether the agent answers.
///
/// # Performed API Request
///
/// ```text
/// GET {base_url}/api/v1/agent/alive
/// ```
pub async fn is_alive(client: &BacalhauClient) -> Result<IsAliveResponse> {
    let url = client.url("/api/v1/agent/alive", &[])?;
    client.get_json(url, None).await
}

/// Returns the build version running on the server.
///
/// # Performed API Request
///
/// ```text
/// GET {base_url}/api/v1/agent/version
/// ```
pub async fn get_version(client: &BacalhauClient) -> Result<GetVersionResponse> {
    let url = client.url("/api/v1/agent/version", &[])?;
    client.get_json(url, None).await
}

/// Returns the state of the node the client is connected to.
///
/// # Performed API Request
///
/// ```text
/// GET {base_url}/api/v1/agent/node
/// ```
pub async fn get_node(client: &BacalhauClient) -> Result<GetAgentNodeResponse> {
    let url = client.url("/api/v1/agent/node", &[])?;
    client.get_json(url, None).await
}

/// Returns what the components of the node are currently doing.
///
/// # Performed API Request
///
/// ```text
/// GET {base_url}/api/v1/agent/debug
/// ```
pub async fn get_debug(client: &BacalhauClient) -> Result<GetAgentDebugResponse> {
    let url = client.url("/api/v1/agent/debug", &[])?;
    client.get_json(url, None).await
}
