use std::time::Duration;

use crate::command::{Command, RequestMethod};
use crate::error::{WaitError, WaitResult};
use crate::http::connection_sync::{WireClientCreateParams, WireClientSync};
use crate::session::SessionId;

/// Synchronous connection to a remote WebDriver server.
#[derive(Debug)]
pub struct ReqwestClientSync {
    url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl WireClientSync for ReqwestClientSync {
    fn create(params: WireClientCreateParams) -> WaitResult<Self> {
        let url = params.server_url.trim_end_matches('/').to_owned();
        Ok(ReqwestClientSync {
            url,
            client: reqwest::blocking::Client::builder().build()?,
            timeout: params.timeout.unwrap_or_else(|| Duration::from_secs(120)),
        })
    }

    fn set_request_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Execute the specified command and return the response payload.
    ///
    /// Error responses are parsed into the typed taxonomy so that the
    /// polling layer can distinguish transient signals (no such element,
    /// stale element) from fatal ones.
    fn execute(&self, session_id: &SessionId, command: Command) -> WaitResult<serde_json::Value> {
        let request_data = command.format_request(session_id);
        let url = self.url.clone() + &request_data.url;
        let mut request = match request_data.method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
        };
        request = request.timeout(self.timeout);

        if let Some(body) = request_data.body {
            request = request.json(&body);
        }

        let resp = request.send()?;

        match resp.status().as_u16() {
            200..=399 => Ok(resp.json()?),
            status => Err(WaitError::parse_wire(status, resp.text()?)),
        }
    }
}
