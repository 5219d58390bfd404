//! SDK Command Streamer (component H): runs a shell command in a sandbox
//! and assembles its `Execution` from an SSE stream.
//!
//! Wire protocol and frame dispatch are grounded in §4.H and in
//! `test_command_service_adapter_streaming.py`/`test_command_service_sse_client_config.py`.

use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::header::ACCEPT;

use crate::config::{ConnectionConfig, SandboxEndpoint};
use crate::error::{api_exception, Error, Result};
use crate::types::{Execution, ExecutionError, LogEntry};

const API_KEY_HEADER: &str = "open-sandbox-api-key";

/// Talks to a single sandbox's execd `/command` endpoint.
pub struct CommandsAdapter {
    config: ConnectionConfig,
    endpoint: SandboxEndpoint,
    sse_client: reqwest::Client,
}

impl CommandsAdapter {
    pub fn new(config: ConnectionConfig, endpoint: SandboxEndpoint) -> Self {
        // No total/read timeout: long-running commands stream indefinitely.
        // Only the connect phase is bounded, per §5's cancellation model.
        let sse_client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .build()
            .expect("reqwest client config is always valid here");
        Self {
            config,
            endpoint,
            sse_client,
        }
    }

    fn execd_url(&self, path: &str) -> String {
        format!("{}://{}:{}{}", self.config.protocol, self.endpoint.host, self.endpoint.port, path)
    }

    /// Run `command`, streaming its SSE frames into an `Execution`.
    ///
    /// Blank commands fail fast with `INVALID_ARGUMENT` before any network
    /// call; a non-2xx response fails with `SANDBOX_API_EXCEPTION`.
    pub async fn run(&self, command: &str) -> Result<Execution> {
        if command.trim().is_empty() {
            return Err(Error::InvalidArgument("command must not be blank".to_string()));
        }

        let mut req = self
            .sse_client
            .post(self.execd_url("/command"))
            .header(ACCEPT, "text/event-stream")
            .json(&serde_json::json!({ "command": command }));
        if let Some(key) = self.config.get_api_key() {
            req = req.header(API_KEY_HEADER, key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_exception(status.as_u16(), body));
        }

        let mut stream = response.bytes_stream().eventsource();
        let mut execution = Execution::default();
        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| Error::Stream(e.to_string()))?;
            if apply_frame(&mut execution, &event.data) {
                break;
            }
        }
        Ok(execution)
    }
}

/// Apply one SSE `data:` payload to `execution` per the §4.H dispatch
/// table. Returns `true` when the stream should stop (an
/// `execution_complete` frame was seen). Malformed JSON and unknown
/// `type`s are silently ignored so one bad frame can't abort a long-running
/// command.
fn apply_frame(execution: &mut Execution, raw: &str) -> bool {
    let Ok(frame) = serde_json::from_str::<serde_json::Value>(raw) else {
        return false;
    };
    let Some(kind) = frame.get("type").and_then(|t| t.as_str()) else {
        return false;
    };
    let timestamp = frame.get("timestamp").and_then(|t| t.as_f64()).unwrap_or(0.0);

    match kind {
        "init" => {
            if let Some(text) = frame.get("text").and_then(|t| t.as_str()) {
                execution.id = Some(text.to_string());
            }
        }
        "stdout" => {
            if let Some(text) = frame.get("text").and_then(|t| t.as_str()) {
                execution.logs.stdout.push(LogEntry {
                    text: text.to_string(),
                    timestamp,
                });
            }
        }
        "stderr" => {
            if let Some(text) = frame.get("text").and_then(|t| t.as_str()) {
                execution.logs.stderr.push(LogEntry {
                    text: text.to_string(),
                    timestamp,
                });
            }
        }
        "result" => {
            if let Some(results) = frame.get("results") {
                execution.result.push(results.clone());
            }
        }
        "error" => {
            let name = frame.get("name").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let value = frame.get("value").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            execution.error = Some(ExecutionError { name, value });
        }
        "execution_complete" => {
            execution.execution_time = frame.get("execution_time").and_then(|v| v.as_f64());
            return true;
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> (ConnectionConfig, SandboxEndpoint) {
        let addr = server.address();
        let config = ConnectionConfig::from_env().with_protocol("http");
        let endpoint = SandboxEndpoint::new(addr.ip().to_string(), addr.port());
        (config, endpoint)
    }

    #[tokio::test]
    async fn run_rejects_blank_command_without_any_network_call() {
        let config = ConnectionConfig::from_env().with_protocol("http");
        let endpoint = SandboxEndpoint::new("127.0.0.1", 1);
        let adapter = CommandsAdapter::new(config, endpoint);

        let err = adapter.run("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn run_streams_sse_frames_into_an_execution() {
        let server = MockServer::start().await;
        let sse_body = concat!(
            "data: {\"type\":\"init\",\"text\":\"exec-1\",\"timestamp\":1}\n\n",
            "\n",
            "data: {\"type\":\"stdout\",\"text\":\"hi\",\"timestamp\":2}\n\n",
            "not-json\n\n",
            "data: {\"type\":\"result\",\"results\":{\"text\":\"ok\"},\"timestamp\":3}\n\n",
            "data: {\"type\":\"execution_complete\",\"timestamp\":4,\"execution_time\":5.0}\n\n",
        );

        Mock::given(method("POST"))
            .and(path("/command"))
            .and(header("accept", "text/event-stream"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_raw(sse_body, "text/event-stream"),
            )
            .mount(&server)
            .await;

        let (config, endpoint) = test_config(&server);
        let adapter = CommandsAdapter::new(config, endpoint);

        let execution = adapter.run("echo hi").await.unwrap();
        assert_eq!(execution.id.as_deref(), Some("exec-1"));
        assert_eq!(execution.logs.stdout[0].text, "hi");
        assert_eq!(execution.result[0]["text"], "ok");
        assert_eq!(execution.execution_time, Some(5.0));
    }

    #[tokio::test]
    async fn non_200_response_raises_sandbox_api_exception() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/command"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (config, endpoint) = test_config(&server);
        let adapter = CommandsAdapter::new(config, endpoint);

        let err = adapter.run("other").await.unwrap_err();
        assert!(matches!(err, Error::SandboxApiException { status: 500, .. }));
    }
}
