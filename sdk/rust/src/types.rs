//! Wire DTOs and domain models for the execd-facing adapters (components
//! H/I/J): the command streamer, its model converter, and the
//! code-interpreter adapter.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Mirrors the Python SDK's `Unset` sentinel: a wire field is either a
/// concrete value, an explicit JSON `null`, or omitted from the payload
/// entirely. `#[serde(default)]` on the struct field supplies `Absent` when
/// the key is missing; the custom `Deserialize` impl below distinguishes
/// `Null` from `Present` when the key is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Unset<T> {
    Present(T),
    Null,
    #[default]
    Absent,
}

impl<T> Unset<T> {
    /// Collapse `Null`/`Absent` to `None`, matching
    /// `command_model_converter.py::_unwrap_optional`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Unset::Present(v) => Some(v),
            Unset::Null | Unset::Absent => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Unset<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Unset::Present(v),
            None => Unset::Null,
        })
    }
}

/// Raw execd response for a command's status, each field independently
/// `Unset` (§4.I).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandStatusResponse {
    #[serde(default)]
    pub id: Unset<String>,
    #[serde(default)]
    pub content: Unset<String>,
    #[serde(default)]
    pub running: Unset<bool>,
    #[serde(default)]
    pub exit_code: Unset<i32>,
    #[serde(default)]
    pub error: Unset<String>,
    #[serde(default)]
    pub started_at: Unset<String>,
    #[serde(default)]
    pub finished_at: Unset<String>,
}

/// SDK-facing command status: every field independently optional after
/// conversion through the model converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandStatus {
    pub id: Option<String>,
    pub content: Option<String>,
    pub running: Option<bool>,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

/// A single `stdout`/`stderr` log line with its server-emitted timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub timestamp: f64,
}

/// `error` frame payload: `{name, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLogs {
    pub stdout: Vec<LogEntry>,
    pub stderr: Vec<LogEntry>,
}

/// The assembled result of a streamed command run, built incrementally from
/// SSE frames per the §4.H dispatch table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Execution {
    pub id: Option<String>,
    pub logs: ExecutionLogs,
    pub result: Vec<serde_json::Value>,
    pub error: Option<ExecutionError>,
    pub execution_time: Option<f64>,
}

/// A code-interpreter execution context (`create_context` response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub id: String,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_both_collapse_to_none() {
        let resp: CommandStatusResponse = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert_eq!(resp.id, Unset::Absent);
        assert_eq!(resp.content, Unset::Null);
        assert!(resp.id.into_option().is_none());
        assert!(resp.content.into_option().is_none());
    }

    #[test]
    fn present_value_round_trips_through_into_option() {
        let resp: CommandStatusResponse =
            serde_json::from_str(r#"{"id": "exec-1", "running": true, "exit_code": 0}"#).unwrap();
        assert_eq!(resp.id.into_option(), Some("exec-1".to_string()));
        assert_eq!(resp.running.into_option(), Some(true));
        assert_eq!(resp.exit_code.into_option(), Some(0));
        assert!(resp.started_at.into_option().is_none());
    }
}
