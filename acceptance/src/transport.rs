//! Blocking executor for core `HttpRequest` values.
//!
//! # Design
//! ureq is configured not to treat 4xx/5xx as errors, so every status comes
//! back as data and the core client decides what it means. Only failures
//! with no response at all become `TransportError`.

use petfriends_core::{HttpMethod, HttpRequest, HttpResponse};
use ureq::Agent;

use crate::error::TransportError;

/// Pet lists embed every photo as base64, so bodies get large.
const MAX_BODY_BYTES: u64 = 128 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Transport {
    agent: Agent,
}

impl Transport {
    pub fn new() -> Self {
        let agent = Agent::config_builder().http_status_as_error(false).build().new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = req.method.as_str(), url = %req.path, "sending request");

        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = req;
        let request_error = |source: ureq::Error| TransportError::Request {
            method,
            url: path.clone(),
            source,
        };

        let result = match method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&path);
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&path);
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if method == HttpMethod::Post {
                    self.agent.post(&path)
                } else {
                    self.agent.put(&path)
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(bytes) => builder.send(bytes.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(request_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|source| TransportError::Body {
                url: path.clone(),
                source,
            })?;

        tracing::debug!(status, url = %path, bytes = body.len(), "received response");
        Ok(HttpResponse { status, headers, body })
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
