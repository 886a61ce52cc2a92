//! Use cases: user stories orchestrated over the domain and the ports.
//!
//! Every mutating use case runs load → transition → commit while holding the
//! shared [`ProgressLock`], so two requests in this process never interleave
//! between reading and writing the stored aggregates.

pub mod adventure;
pub mod location;
pub mod profile;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use echoes_domain::UserProfile;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{AdventureStore, RepoError};

pub use adventure::{
    AdventureError, AdventureUseCases, AdventureView, CompleteQuest, GetAdventure,
    ListAdventures, QuestOutcome, StartAdventure,
};
pub use location::{DescribePosition, LocationError};
pub use profile::{GetProfile, ProfileError, ProfileUpdate, ProfileUseCases, UpdateProfile};

/// Serializes mutations of the stored aggregates within this process.
pub type ProgressLock = Arc<Mutex<()>>;

pub fn new_progress_lock() -> ProgressLock {
    Arc::new(Mutex::new(()))
}

/// The stored profile, or a fresh default one if none has been saved yet.
pub(crate) async fn load_profile_or_default(
    store: &dyn AdventureStore,
    now: DateTime<Utc>,
) -> Result<UserProfile, RepoError> {
    Ok(store
        .load_profile()
        .await?
        .unwrap_or_else(|| UserProfile::default_at(now)))
}
