//! Profile use cases.
//!
//! Only the identity fields are editable. Points, level and counters move
//! exclusively through quest rewards.

use std::sync::Arc;

use echoes_domain::{DomainError, ExplorerName, UserProfile};

use crate::infrastructure::ports::{AdventureStore, ClockPort, RepoError};
use crate::use_cases::{load_profile_or_default, ProgressLock};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Fields a player may overwrite. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    /// `Some("")` removes the avatar.
    pub avatar: Option<String>,
    pub interests: Option<Vec<String>>,
    pub favorite_locations: Option<Vec<String>>,
}

/// Container for profile use cases.
pub struct ProfileUseCases {
    pub get: Arc<GetProfile>,
    pub update: Arc<UpdateProfile>,
}

impl ProfileUseCases {
    pub fn new(get: Arc<GetProfile>, update: Arc<UpdateProfile>) -> Self {
        Self { get, update }
    }
}

pub struct GetProfile {
    store: Arc<dyn AdventureStore>,
    clock: Arc<dyn ClockPort>,
}

impl GetProfile {
    pub fn new(store: Arc<dyn AdventureStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// The stored profile, or a level-1 "Explorer" joined now.
    pub async fn execute(&self) -> Result<UserProfile, ProfileError> {
        Ok(load_profile_or_default(self.store.as_ref(), self.clock.now()).await?)
    }
}

pub struct UpdateProfile {
    store: Arc<dyn AdventureStore>,
    clock: Arc<dyn ClockPort>,
    lock: ProgressLock,
}

impl UpdateProfile {
    pub fn new(store: Arc<dyn AdventureStore>, clock: Arc<dyn ClockPort>, lock: ProgressLock) -> Self {
        Self { store, clock, lock }
    }

    pub async fn execute(&self, update: ProfileUpdate) -> Result<UserProfile, ProfileError> {
        // Validate before touching storage.
        let name = update.name.map(ExplorerName::new).transpose()?;

        let _guard = self.lock.lock().await;
        let mut profile = load_profile_or_default(self.store.as_ref(), self.clock.now()).await?;

        if let Some(name) = name {
            profile.set_name(name);
        }
        if let Some(avatar) = update.avatar {
            profile.set_avatar(Some(avatar).filter(|a| !a.trim().is_empty()));
        }
        if let Some(interests) = update.interests {
            profile.set_interests(interests);
        }
        if let Some(locations) = update.favorite_locations {
            profile.set_favorite_locations(locations);
        }

        self.store.save_profile(&profile).await?;
        tracing::info!(name = %profile.name(), "Profile updated");
        Ok(profile)
    }
}
