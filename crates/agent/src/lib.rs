//! Order agent mediation layer.
//!
//! This crate sits between the language-model function-calling loop and the
//! order backend:
//! 1. **Tool contracts** (`schema`, `tools`) - schema-described async
//!    operations the model can invoke
//! 2. **Session state** (`session`) - the per-conversation cart and catalog,
//!    injected into every tool at construction
//! 3. **Dispatch** (`tools::ToolRegistry`) - argument defaults, outcome
//!    rendering, result-sink mirroring
//! 4. **Call pump** (`runner`) - strictly sequential function-call loop over
//!    a pluggable conversation transport
//!
//! # Result contract
//!
//! Every tool call - success, validation failure, unknown item, backend
//! failure - yields exactly one conversational string, delivered both as the
//! call's return value and through the `ResultSink` side channel. Outcomes
//! are tagged internally (`ToolOutcome`) so callers and tests never have to
//! parse prefixes; the uniform text exists only at the speech boundary.

pub mod outcome;
pub mod prompt;
pub mod runner;
pub mod schema;
pub mod session;
pub mod sink;
pub mod tools;

pub use outcome::{RefusalKind, ToolOutcome};
pub use runner::{CallTransport, NoopCallTransport, SessionRunner, ToolCall, TransportError};
pub use schema::{ParameterKind, ParameterSpec, ToolSchema};
pub use session::{build_registry, OrderSession};
pub use sink::{NoopResultSink, ResultSink, TranscriptSink};
pub use tools::{AgentTool, ToolArgs, ToolRegistry};
