//! Value Generator Module
//!
//! Pluggable strategy that synthesizes a value for a key absent from the
//! store. Used only from the miss path of `get`.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

/// Length of values produced by the default generator.
pub const GENERATED_VALUE_LENGTH: usize = 32;

// == Value Generator Trait ==
/// Produces a value for a key that does not yet exist in the store.
///
/// Stateless with respect to the cache. Injected into the engine so the
/// generation policy can be swapped without touching it.
pub trait ValueGenerator: Send + Sync {
    /// Synthesizes a value for `key`.
    fn generate(&self, key: &str) -> Value;
}

// == Random Value Generator ==
/// Default generator: a pseudo-random alphanumeric string of fixed length.
///
/// Generated values carry no cryptographic guarantee of uniqueness or
/// unpredictability; callers must not treat them as secrets or as
/// collision-free.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomValueGenerator;

impl ValueGenerator for RandomValueGenerator {
    fn generate(&self, _key: &str) -> Value {
        let s: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_VALUE_LENGTH)
            .map(char::from)
            .collect();
        Value::String(s)
    }
}

// == Fixed Value Generator ==
/// Deterministic generator for tests: always returns the configured value.
#[derive(Debug, Clone)]
pub struct FixedValueGenerator {
    value: Value,
}

impl FixedValueGenerator {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl ValueGenerator for FixedValueGenerator {
    fn generate(&self, _key: &str) -> Value {
        self.value.clone()
    }
}
