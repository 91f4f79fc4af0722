mod cart_ops;
mod order_ops;

pub use cart_ops::{AddItemToOrder, ReadCurrentOrder, RemoveItemFromOrder};
pub use order_ops::{CalculateOrderTotal, CreateOrder};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::warn;

use crate::outcome::{RefusalKind, ToolOutcome};
use crate::schema::ToolSchema;
use crate::sink::ResultSink;

/// One function unit exposed to the language model: a schema describing the
/// call surface and an async handler producing the spoken outcome.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn schema(&self) -> ToolSchema;
    async fn invoke(&self, args: &ToolArgs) -> ToolOutcome;
}

/// Argument bag handed to a tool. Accessors return `None` for absent or
/// wrong-typed values; tools turn that into conversational errors rather
/// than faults.
#[derive(Clone, Debug, Default)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    pub fn new(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn set_default(&mut self, name: &str, value: Value) {
        self.values.entry(name.to_string()).or_insert(value);
    }
}

/// The closed set of tools for one session, keyed by schema name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, Arc<dyn AgentTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: AgentTool + 'static,
    {
        self.tools.insert(tool.schema().name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn AgentTool>> {
        self.tools.get(name)
    }

    /// Declarations for LLM registration, sorted by name for stable output.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|tool| tool.schema()).collect();
        schemas.sort_by_key(|schema| schema.name);
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Runs one function call end to end: applies schema parameter defaults,
    /// invokes the tool, renders the outcome once, and delivers the identical
    /// text to both the result sink and the caller. Unknown names become a
    /// spoken refusal; nothing here raises past this boundary.
    pub async fn dispatch(&self, name: &str, arguments: Value, sink: &dyn ResultSink) -> String {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool_name = name, "unknown function requested");
            let refusal = ToolOutcome::refused(
                RefusalKind::UnknownTool,
                format!("Error: unknown function '{name}'"),
            );
            let text = refusal.render();
            sink.deliver(name, &text).await;
            return text;
        };

        let mut args = ToolArgs::new(arguments);
        for parameter in &tool.schema().parameters {
            if let Some(default) = &parameter.default {
                args.set_default(parameter.name, default.clone());
            }
        }

        let outcome = tool.invoke(&args).await;
        if let ToolOutcome::Refused { kind, .. } = &outcome {
            warn!(tool_name = name, refusal_kind = ?kind, "tool call refused");
        }

        let text = outcome.render();
        sink.deliver(name, &text).await;
        text
    }
}
