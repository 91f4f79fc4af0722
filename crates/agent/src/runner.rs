use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::sink::ResultSink;
use crate::tools::ToolRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("call transport failed to connect: {0}")]
    Connect(String),
    #[error("call transport read failed: {0}")]
    Receive(String),
    #[error("call transport respond failed: {0}")]
    Respond(String),
    #[error("call transport disconnect failed: {0}")]
    Disconnect(String),
}

/// One function call selected by the language model.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub call_id: String,
    pub name: String,
    pub arguments: Value,
}

/// Seam to the conversation pipeline that produces function calls and
/// consumes their string results. Implementations own connection liveness;
/// the runner only pumps.
#[async_trait]
pub trait CallTransport: Send + Sync {
    async fn connect(&self) -> Result<(), TransportError>;
    async fn next_call(&self) -> Result<Option<ToolCall>, TransportError>;
    async fn respond(&self, call_id: &str, text: &str) -> Result<(), TransportError>;
    async fn disconnect(&self) -> Result<(), TransportError>;
}

#[derive(Default)]
pub struct NoopCallTransport;

#[async_trait]
impl CallTransport for NoopCallTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn next_call(&self) -> Result<Option<ToolCall>, TransportError> {
        Ok(None)
    }

    async fn respond(&self, _call_id: &str, _text: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

pub struct SessionRunner {
    transport: Arc<dyn CallTransport>,
    registry: ToolRegistry,
    sink: Arc<dyn ResultSink>,
}

impl SessionRunner {
    pub fn new(
        transport: Arc<dyn CallTransport>,
        registry: ToolRegistry,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self { transport, registry, sink }
    }

    /// Pumps function calls strictly sequentially: each dispatch completes
    /// before the next call is pulled, which is what keeps cart mutations
    /// from interleaving within one conversation. A closed stream ends the
    /// session cleanly; a respond failure ends it with an error, since the
    /// caller can no longer see results.
    pub async fn run(&self) -> Result<(), TransportError> {
        self.transport.connect().await?;
        info!(event_name = "agent.session.connected", "call transport connected");

        loop {
            let Some(call) = self.transport.next_call().await? else {
                info!(event_name = "agent.session.closed", "call transport stream closed");
                self.transport.disconnect().await?;
                return Ok(());
            };

            debug!(
                event_name = "agent.call.received",
                call_id = %call.call_id,
                tool_name = %call.name,
                "function call received"
            );

            let text = self
                .registry
                .dispatch(&call.name, call.arguments.clone(), self.sink.as_ref())
                .await;

            if let Err(error) = self.transport.respond(&call.call_id, &text).await {
                warn!(
                    event_name = "agent.call.respond_failed",
                    call_id = %call.call_id,
                    error = %error,
                    "failed to deliver function result"
                );
                return Err(error);
            }
        }
    }
}
