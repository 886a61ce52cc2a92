//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    AdventureGeneratorPort, AdventureStore, ClockPort, GeocodingPort,
};
use crate::use_cases::{
    self, AdventureUseCases, CompleteQuest, DescribePosition, GetAdventure, GetProfile,
    ListAdventures, ProfileUseCases, StartAdventure, UpdateProfile,
};

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub adventure: AdventureUseCases,
    pub profile: ProfileUseCases,
    pub describe_position: Arc<DescribePosition>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// Every mutating use case shares one progress lock.
    pub fn new(
        store: Arc<dyn AdventureStore>,
        generator: Arc<dyn AdventureGeneratorPort>,
        geocoder: Arc<dyn GeocodingPort>,
        clock: Arc<dyn ClockPort>,
        default_language: impl Into<String>,
    ) -> Self {
        let lock = use_cases::new_progress_lock();

        let adventure = AdventureUseCases::new(
            Arc::new(StartAdventure::new(
                store.clone(),
                generator,
                clock.clone(),
                lock.clone(),
                default_language,
            )),
            Arc::new(CompleteQuest::new(store.clone(), clock.clone(), lock.clone())),
            Arc::new(ListAdventures::new(store.clone())),
            Arc::new(GetAdventure::new(store.clone())),
        );

        let profile = ProfileUseCases::new(
            Arc::new(GetProfile::new(store.clone(), clock.clone())),
            Arc::new(UpdateProfile::new(store, clock, lock)),
        );

        Self {
            use_cases: UseCases {
                adventure,
                profile,
                describe_position: Arc::new(DescribePosition::new(geocoder)),
            },
        }
    }
}
