use super::state::{ExecutionDesiredState, ExecutionStateRecord};
use super::{fmt_model, ApiModel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Model for an execution of a job on a single compute node
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Execution {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Namespace", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(rename = "EvalID", skip_serializing_if = "Option::is_none")]
    pub eval_id: Option<String>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "NodeID", skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(rename = "JobID", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(rename = "AllocatedResources", skip_serializing_if = "Option::is_none")]
    pub allocated_resources: Option<Value>,
    #[serde(rename = "DesiredState", skip_serializing_if = "Option::is_none")]
    pub desired_state: Option<ExecutionDesiredState>,
    #[serde(rename = "ComputeState", skip_serializing_if = "Option::is_none")]
    pub compute_state: Option<ExecutionStateRecord>,
    #[serde(rename = "PublishedResult", skip_serializing_if = "Option::is_none")]
    pub published_result: Option<Value>,
    #[serde(rename = "RunOutput", skip_serializing_if = "Option::is_none")]
    pub run_output: Option<RunCommandResult>,
    #[serde(rename = "PreviousExecution", skip_serializing_if = "Option::is_none")]
    pub previous_execution: Option<String>,
    #[serde(rename = "NextExecution", skip_serializing_if = "Option::is_none")]
    pub next_execution: Option<String>,
    #[serde(rename = "FollowupEvalID", skip_serializing_if = "Option::is_none")]
    pub followup_eval_id: Option<String>,
    #[serde(rename = "Revision", skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(rename = "CreateTime", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(rename = "ModifyTime", skip_serializing_if = "Option::is_none")]
    pub modify_time: Option<i64>,
    /// Keys this client does not model, kept so an execution survives a round trip
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Execution {
    /// Creation time, decoded from Unix nanoseconds
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time.map(DateTime::<Utc>::from_timestamp_nanos)
    }

    /// Time of the last update, decoded from Unix nanoseconds
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modify_time.map(DateTime::<Utc>::from_timestamp_nanos)
    }

    /// Returns true if the compute state is set and terminal.
    pub fn is_terminal(&self) -> bool {
        self.compute_state
            .as_ref()
            .and_then(|state| state.state_type())
            .map_or(false, |state_type| state_type.is_terminal())
    }
}

impl ApiModel for Execution {
    const MODEL_NAME: &'static str = "Execution";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("id", "ID"),
        ("namespace", "Namespace"),
        ("eval_id", "EvalID"),
        ("name", "Name"),
        ("node_id", "NodeID"),
        ("job_id", "JobID"),
        ("allocated_resources", "AllocatedResources"),
        ("desired_state", "DesiredState"),
        ("compute_state", "ComputeState"),
        ("published_result", "PublishedResult"),
        ("run_output", "RunOutput"),
        ("previous_execution", "PreviousExecution"),
        ("next_execution", "NextExecution"),
        ("followup_eval_id", "FollowupEvalID"),
        ("revision", "Revision"),
        ("create_time", "CreateTime"),
        ("modify_time", "ModifyTime"),
    ];
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

/// Output of the command an execution ran
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunCommandResult {
    #[serde(rename = "stdout", skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(rename = "stdouttruncated", skip_serializing_if = "Option::is_none")]
    pub stdout_truncated: Option<bool>,
    #[serde(rename = "stderr", skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(rename = "stderrtruncated", skip_serializing_if = "Option::is_none")]
    pub stderr_truncated: Option<bool>,
    #[serde(rename = "exitCode", skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(rename = "runnerError", skip_serializing_if = "Option::is_none")]
    pub runner_error: Option<String>,
}

impl ApiModel for RunCommandResult {
    const MODEL_NAME: &'static str = "RunCommandResult";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("stdout", "stdout"),
        ("stdout_truncated", "stdouttruncated"),
        ("stderr", "stderr"),
        ("stderr_truncated", "stderrtruncated"),
        ("exit_code", "exitCode"),
        ("runner_error", "runnerError"),
    ];
}

impl fmt::Display for RunCommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::state::{ExecutionDesiredStateType, ExecutionStateType};
    use crate::models::tests::read_json_from_file;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn deserialize_execution() {
        let execution: Execution = read_json_from_file("test/test_execution.json").unwrap();

        assert_eq!(execution.id.as_deref(), Some("e-2b4f8a17-5b1e-4c35-9f0e-9d2b8a8f1c11"));
        assert_eq!(execution.job_id.as_deref(), Some("j-7d1e2c4a-3f6b-4b8e-a1d9-5c0f2e6b9a3d"));
        assert_eq!(
            execution.compute_state.as_ref().and_then(|s| s.state_type()),
            Some(ExecutionStateType::Completed)
        );
        assert_eq!(
            execution.desired_state.as_ref().and_then(|s| s.state_type()),
            Some(ExecutionDesiredStateType::Stopped)
        );
        assert_eq!(
            execution.run_output.as_ref().and_then(|r| r.exit_code),
            Some(0)
        );
        assert!(execution.is_terminal());
        // Job is not modelled and must be carried along untouched
        assert!(execution.other.contains_key("Job"));
    }

    #[test]
    fn execution_round_trips_with_unknown_keys() {
        let execution: Execution = read_json_from_file("test/test_execution.json").unwrap();
        let map = execution.to_map().unwrap();

        assert_eq!(map.get("Job").and_then(|job| job.get("Name")), Some(&json!("hello-world")));
        assert_eq!(Execution::from_map(map).unwrap(), execution);
    }

    #[test]
    fn nested_states_are_converted() {
        let execution = Execution {
            id: Some("e-1".to_owned()),
            compute_state: Some(
                ExecutionStateRecord::new(ExecutionStateType::Failed).with_message("boom"),
            ),
            ..Default::default()
        };

        assert_eq!(
            Value::Object(execution.to_map().unwrap()),
            json!({
                "ID": "e-1",
                "ComputeState": { "Message": "boom", "StateType": 8 }
            })
        );
    }

    #[test]
    fn timestamps_decode_from_nanoseconds() {
        let execution = Execution {
            create_time: Some(1_700_000_000_123_456_789),
            ..Default::default()
        };
        let created = execution.created_at().unwrap();

        assert_eq!(created.year(), 2023);
        assert_eq!(created.nanosecond(), 123_456_789);
        assert_eq!(execution.modified_at(), None);
    }

    #[test]
    fn execution_without_state_is_not_terminal() {
        assert!(!Execution::default().is_terminal());
    }

    #[test]
    fn run_output_uses_lower_case_keys() {
        let output = RunCommandResult {
            stdout: Some("hello\n".to_owned()),
            exit_code: Some(0),
            ..Default::default()
        };

        assert_eq!(
            Value::Object(output.to_map().unwrap()),
            json!({ "stdout": "hello\n", "exitCode": 0 })
        );
        assert_eq!(RunCommandResult::wire_key("exit_code"), Some("exitCode"));
    }
}
