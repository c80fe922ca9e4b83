//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Catalog Ports
//!
//! - `MentorSource` - Loads the mentor pool (seed file, aggregators)
//! - `TraitCatalog` - Lookup of selectable traits
//!
//! ## Outbound Ports
//!
//! - `FeedbackSink` - Append-only log of ranking events
//! - `AdviceGenerator` - Coaching text for a gap
//! - `Clock` - Current time, for cache expiry

mod advice_generator;
mod clock;
mod feedback_sink;
mod mentor_source;

pub use advice_generator::{AdviceError, AdviceGenerator, AdviceRequest};
pub use clock::Clock;
pub use feedback_sink::{FeedbackSink, PersistenceError};
pub use mentor_source::{MentorSource, TraitCatalog};
