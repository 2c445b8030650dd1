use super::{fmt_model, ApiModel};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Struct that holds the response when requesting /api/v1/agent/alive
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IsAliveResponse {
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl IsAliveResponse {
    pub fn is_ready(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }
}

/// Build information of the server
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildVersionInfo {
    #[serde(rename = "Major", skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(rename = "Minor", skip_serializing_if = "Option::is_none")]
    pub minor: Option<String>,
    #[serde(rename = "GitVersion", skip_serializing_if = "Option::is_none")]
    pub git_version: Option<String>,
    #[serde(rename = "GitCommit", skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    #[serde(rename = "BuildDate", skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,
    #[serde(rename = "GOOS", skip_serializing_if = "Option::is_none")]
    pub goos: Option<String>,
    #[serde(rename = "GOARCH", skip_serializing_if = "Option::is_none")]
    pub goarch: Option<String>,
}

/// Struct that holds the response when requesting /api/v1/agent/version
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetVersionResponse {
    #[serde(rename = "BuildVersionInfo", skip_serializing_if = "Option::is_none")]
    pub build_version_info: Option<BuildVersionInfo>,
}

/// Struct that holds the response when requesting /api/v1/agent/node.
///
/// The node state is kept as plain JSON.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GetAgentNodeResponse {
    #[serde(flatten)]
    pub node_state: Map<String, Value>,
}

/// Struct that holds the response when requesting /api/v1/agent/debug.
///
/// Every key is the name of a node component, its value is whatever that component reports.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GetAgentDebugResponse {
    #[serde(flatten)]
    pub components: Map<String, Value>,
}

impl GetAgentDebugResponse {
    /// Debug information reported by a single component
    pub fn component(&self, name: &str) -> Option<&Value> {
        self.components.get(name)
    }
}

impl ApiModel for IsAliveResponse {
    const MODEL_NAME: &'static str = "ApiIsAliveResponse";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[("status", "Status")];
}

impl ApiModel for GetVersionResponse {
    const MODEL_NAME: &'static str = "ApiGetVersionResponse";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] =
        &[("build_version_info", "BuildVersionInfo")];
}

impl ApiModel for GetAgentNodeResponse {
    const MODEL_NAME: &'static str = "ApiGetAgentNodeResponse";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[];
}

impl ApiModel for GetAgentDebugResponse {
    const MODEL_NAME: &'static str = "ApiGetAgentDebugResponse";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[];
}

impl fmt::Display for IsAliveResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

impl fmt::Display for GetVersionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

impl fmt::Display for GetAgentNodeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

impl fmt::Display for GetAgentDebugResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::read_json_from_file;
    use serde_json::json;

    #[test]
    fn deserialize_version_response() {
        let response: GetVersionResponse =
            read_json_from_file("test/test_version_response.json").unwrap();
        let info = response.build_version_info.unwrap();

        assert_eq!(info.git_version.as_deref(), Some("v1.5.0"));
        assert_eq!(info.goos.as_deref(), Some("linux"));
    }

    #[test]
    fn alive_status() {
        let alive: IsAliveResponse = serde_json::from_value(json!({ "Status": "OK" })).unwrap();

        assert!(alive.is_ready());
        assert!(!IsAliveResponse::default().is_ready());
    }

    #[test]
    fn node_state_is_kept_verbatim() {
        let raw = json!({
            "Info": { "NodeID": "n-1", "NodeType": "Requester" },
            "Membership": 2,
            "Connection": 1
        });
        let node: GetAgentNodeResponse = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(Value::Object(node.to_map().unwrap()), raw);
    }

    #[test]
    fn debug_info_is_keyed_by_component() {
        let response: GetAgentDebugResponse =
            read_json_from_file("test/test_debug_response.json").unwrap();

        assert_eq!(response.components.len(), 2);
        assert_eq!(
            response
                .component("ExecutionBuffer")
                .and_then(|info| info.get("RunningExecutions")),
            Some(&json!(1))
        );
        assert_eq!(response.component("Scheduler"), None);

        let map = response.to_map().unwrap();
        assert_eq!(GetAgentDebugResponse::from_map(map).unwrap(), response);
    }

    #[test]
    fn empty_debug_info() {
        let response: GetAgentDebugResponse = serde_json::from_value(json!({})).unwrap();

        assert_eq!(response, GetAgentDebugResponse::default());
        assert_eq!(response.to_string(), "{}");
    }
}
