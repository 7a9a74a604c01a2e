// kidcatch_guide: parent-facing guidance for the co-creation flow.
//
// Wraps an optional generative-text service behind one trait and always has
// a static answer ready, so the creation flow works identically with or
// without network access.
//
// Module overview:
// - `config.rs`:    `EnrichmentConfig` from `GEMINI_*` env vars, status
//                   (`no-key` / `invalid-key` / `ready`).
// - `enricher.rs`:  `Enricher` trait and the blocking `GeminiEnricher`.
// - `prompt.rs`:    Prompt text built from the lexicon tables.
// - `fallback.rs`:  Static guidance, suggested questions, share text.
// - `guide.rs`:     `Guide`: live-or-static guidance per step, share text.
// - `flow.rs`:      `CreationFlow` state machine over `Guide`.
// - `error.rs`:     `EnrichError`, `FlowError`.

pub mod config;
pub mod enricher;
pub mod error;
pub mod fallback;
pub mod flow;
pub mod guide;
pub mod prompt;

pub use config::{EnrichmentConfig, EnrichmentStatus};
pub use enricher::{Enricher, GeminiEnricher};
pub use error::{EnrichError, FlowError};
pub use flow::{CreationFlow, FlowOutcome, FlowProgress};
pub use guide::{Guidance, Guide};
