//! Code-Interpreter Adapter (component J): thin wrapper over execd's
//! `/v1/code-context`, `/v1/code-run`, `/v1/code-interrupt/{id}` endpoints.
//!
//! Grounded in `test_code_service_adapter_openapi_calls.py`.

use crate::config::{ConnectionConfig, SandboxEndpoint};
use crate::error::{api_exception, Result};
use crate::types::{Context, Execution};

const API_KEY_HEADER: &str = "open-sandbox-api-key";

pub struct CodesAdapter {
    config: ConnectionConfig,
    endpoint: SandboxEndpoint,
    client: reqwest::Client,
}

impl CodesAdapter {
    pub fn new(endpoint: SandboxEndpoint, config: ConnectionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("reqwest client config is always valid here");
        Self { config, endpoint, client }
    }

    fn execd_url(&self, path: &str) -> String {
        format!("{}://{}:{}{}", self.config.protocol, self.endpoint.host, self.endpoint.port, path)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.get_api_key() {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// `create_context("python")` sends `{language: "python"}` and expects a
    /// parsed `{id, language}`.
    pub async fn create_context(&self, language: &str) -> Result<Context> {
        let req = self
            .authed(self.client.post(self.execd_url("/v1/code-context")))
            .json(&serde_json::json!({ "language": language }));
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_exception(status.as_u16(), body));
        }
        Ok(response.json::<Context>().await?)
    }

    /// `run(code, context) -> Execution`. execd returns the same
    /// `CommandStatusResponse`-shaped SSE or JSON body as the command
    /// streamer's non-streaming counterpart; here it's a plain JSON object
    /// (`/v1/code-run` is not SSE-framed).
    pub async fn run(&self, code: &str, context: &Context) -> Result<Execution> {
        let req = self.authed(self.client.post(self.execd_url("/v1/code-run"))).json(&serde_json::json!({
            "code": code,
            "context": context,
        }));
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_exception(status.as_u16(), body));
        }
        Ok(response.json::<Execution>().await?)
    }

    /// `interrupt(id)` expects status 204.
    pub async fn interrupt(&self, execution_id: &str) -> Result<()> {
        let req = self.authed(
            self.client
                .post(self.execd_url(&format!("/v1/code-interrupt/{execution_id}"))),
        );
        let response = req.send().await?;
        let status = response.status();
        if status.as_u16() != 204 {
            let body = response.text().await.unwrap_or_default();
            return Err(api_exception(status.as_u16(), body));
        }
        Ok(())
    }
}
