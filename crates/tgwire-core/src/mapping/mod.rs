//! The bidirectional mapping engine.
//!
//! - [`inbound`]: decoded payloads into typed entities
//! - [`outbound`]: typed values into wire-safe JSON
//! - [`resolve`](mod@resolve): untagged markup payloads into their variant

pub mod inbound;
pub mod outbound;
pub mod resolve;

pub use inbound::{FieldSet, Raw, convert, convert_many, convert_with};
pub use outbound::{DepthPolicy, PrepareOptions, prepare, prepare_default};
pub use resolve::resolve;
