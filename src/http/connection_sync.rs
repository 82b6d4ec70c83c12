use std::fmt::Debug;
use std::time::Duration;

use crate::command::Command;
use crate::error::WaitResult;
use crate::session::SessionId;

/// Parameters for creating a wire client.
#[derive(Debug, Clone)]
pub struct WireClientCreateParams {
    pub server_url: String,
    pub timeout: Option<Duration>,
}

/// Trait for executing WebDriver wire commands over HTTP.
///
/// As long as you have some struct that implements `WireClientSync`, you
/// can turn it into a session like this:
///
/// ```ignore
/// // Assuming MyHttpClient implements WireClientSync.
/// pub type MySession = GenericRemoteSession<MyHttpClient>;
/// ```
pub trait WireClientSync: Debug + Send + Sync {
    fn create(params: WireClientCreateParams) -> WaitResult<Self>
    where
        Self: Sized;

    /// Set the HTTP request timeout.
    fn set_request_timeout(&mut self, timeout: Duration);

    /// Execute the specified command and return the raw response payload.
    fn execute(&self, session_id: &SessionId, command: Command) -> WaitResult<serde_json::Value>;
}
