//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage (SQLite or in-memory)
//! - LLM calls and the adventure generator built on them
//! - Reverse geocoding
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{GenerationError, GeocodeError, LlmError, RepoError};
pub use external::{
    AdventureGeneratorPort, ChatMessage, GeocodingPort, LlmPort, LlmRequest, LlmResponse,
    MessageRole, PlaceDescription,
};
pub use repos::AdventureStore;
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockAdventureGeneratorPort, MockGeocodingPort, MockLlmPort};
#[cfg(test)]
pub use repos::MockAdventureStore;
#[cfg(test)]
pub use testing::MockClockPort;
