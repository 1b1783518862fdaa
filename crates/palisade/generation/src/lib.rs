//! # palisade-generation
//!
//! Generation backend chain: turns a deployment request into a
//! [`GeneratedArtifact`](palisade_types::GeneratedArtifact), and never fails.
//!
//! ```text
//! BackendChain::generate(request)
//!     │── remote adapter 1 (skip if no credential; bounded timeout)
//!     │── remote adapter 2 (log-and-continue on any failure)
//!     └── TemplateGenerator (deterministic, always succeeds)
//! ```
//!
//! Remote adapters follow a strict parse-or-fallback contract: the provider
//! response must yield a structured artifact with non-empty required fields,
//! or the whole backend call counts as failed and the chain advances.
//! Provider credentials live in an immutable [`ProviderConfig`] constructed
//! once at startup; there is no ambient/global credential lookup.

#![deny(unsafe_code)]

pub mod anthropic;
pub mod chain;
pub mod config;
pub mod error;
pub mod extract;
pub mod openai;
pub mod template;
pub mod transport;

pub use anthropic::AnthropicBackend;
pub use chain::{BackendChain, GenerationBackend};
pub use config::{ChainConfig, ProviderConfig};
pub use error::{GenerationError, GenerationResult};
pub use extract::{parse_artifact_payload, scan_security_features, REMOTE_CONFIDENCE};
pub use openai::OpenAiBackend;
pub use template::{TemplateGenerator, TEMPLATE_CONFIDENCE};
pub use transport::{GenerationTransport, HttpTransport, NoopTransport};
