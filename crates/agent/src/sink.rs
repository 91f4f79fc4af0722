use async_trait::async_trait;
use tracing::info;

/// Side channel mirroring every rendered tool result to the surrounding
/// speech/transcript pipeline. The text delivered here is identical to the
/// string returned to the function caller.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn deliver(&self, tool_name: &str, text: &str);
}

#[derive(Default)]
pub struct NoopResultSink;

#[async_trait]
impl ResultSink for NoopResultSink {
    async fn deliver(&self, _tool_name: &str, _text: &str) {}
}

/// Emits each result as a transcript log line. The server wires this in
/// place of a synthesis pipeline.
#[derive(Default)]
pub struct TranscriptSink;

#[async_trait]
impl ResultSink for TranscriptSink {
    async fn deliver(&self, tool_name: &str, text: &str) {
        info!(event_name = "agent.tool.result", tool_name, result = text, "tool result delivered");
    }
}
