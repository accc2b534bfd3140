//! Agent invocation: sessions, the invocation gate, and the LLM runtime contract.

pub mod cancel;
pub mod gate;
pub mod record;
pub mod runtime;
pub mod session;

pub use cancel::{CancelHandle, CancelSignal};
pub use gate::InvocationGate;
pub use record::InvocationRecord;
pub use runtime::{AgentOutput, AgentRuntime, ReasoningContext};
pub use session::{AgentSession, DiscoveryState};
