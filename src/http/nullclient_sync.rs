use std::time::Duration;

use crate::command::Command;
use crate::error::WaitResult;
use crate::http::connection_sync::{WireClientCreateParams, WireClientSync};
use crate::session::SessionId;

/// Null wire client that satisfies the build but does nothing.
#[derive(Debug)]
pub struct NullClientSync {
    url: String,
}

impl WireClientSync for NullClientSync {
    fn create(params: WireClientCreateParams) -> WaitResult<Self> {
        Ok(NullClientSync {
            url: params.server_url,
        })
    }

    fn set_request_timeout(&mut self, _timeout: Duration) {}

    fn execute(
        &self,
        _session_id: &SessionId,
        _command: Command,
    ) -> WaitResult<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }
}
