//! Cache Module
//!
//! The bounded cache core: engine, record model, and miss-path value
//! generation.

mod engine;
mod generator;
mod record;


// Re-export public types
pub use engine::{CacheEngine, Lookup, SetOutcome};
pub use generator::{
    FixedValueGenerator, RandomValueGenerator, ValueGenerator, GENERATED_VALUE_LENGTH,
};
pub use record::Record;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Assumed size of one stored record in bytes, used to derive the advisory
/// byte capacity handed to the storage backend at setup
pub const PER_ENTRY_BYTES_ESTIMATE: usize = 256;
