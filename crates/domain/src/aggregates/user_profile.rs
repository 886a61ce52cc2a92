//! UserProfile aggregate - cumulative rewards and identity for one player
//!
//! `level` is derived from `total_points` and can never be set directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_objects::{
    level_for_points, Achievement, Badge, ExplorerName, RewardDelta, RewardSource,
};

/// The single per-player aggregate of points, level and counters.
///
/// # Invariants
///
/// - `level == level_for_points(total_points)`
/// - `total_points` never decreases
/// - `visited_cities` contains no duplicates
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    name: ExplorerName,
    avatar: Option<String>,
    level: u32,
    total_points: u64,
    completed_quests: u32,
    badges: Vec<Badge>,
    achievements: Vec<Achievement>,
    visited_cities: Vec<String>,
    favorite_locations: Vec<String>,
    interests: Vec<String>,
    join_date: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh level-1 profile joined at `now`.
    pub fn new(name: ExplorerName, now: DateTime<Utc>) -> Self {
        Self {
            name,
            avatar: None,
            level: 1,
            total_points: 0,
            completed_quests: 0,
            badges: Vec::new(),
            achievements: Vec::new(),
            visited_cities: Vec::new(),
            favorite_locations: Vec::new(),
            interests: Vec::new(),
            join_date: now,
        }
    }

    /// The profile used when none has been stored yet.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        Self::new(ExplorerName::default(), now)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &ExplorerName {
        &self.name
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn completed_quests(&self) -> u32 {
        self.completed_quests
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn visited_cities(&self) -> &[String] {
        &self.visited_cities
    }

    pub fn favorite_locations(&self) -> &[String] {
        &self.favorite_locations
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn join_date(&self) -> DateTime<Utc> {
        self.join_date
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Add a reward and recompute the level from the new total.
    pub fn apply_reward(&mut self, delta: RewardDelta, source: &RewardSource) {
        self.total_points = self.total_points.saturating_add(u64::from(delta.points));
        self.level = level_for_points(self.total_points);
        if *source == RewardSource::Quest {
            self.completed_quests = self.completed_quests.saturating_add(1);
        }
    }

    /// Remember a destination the player started an adventure for.
    ///
    /// Case-sensitive; returns false when the name was already recorded.
    pub fn record_visited_city(&mut self, name: &str) -> bool {
        if self.visited_cities.iter().any(|c| c == name) {
            return false;
        }
        self.visited_cities.push(name.to_string());
        true
    }

    // =========================================================================
    // Profile edits (plain overwrites)
    // =========================================================================

    pub fn set_name(&mut self, name: ExplorerName) {
        self.name = name;
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
    }

    pub fn set_interests(&mut self, interests: Vec<String>) {
        self.interests = interests;
    }

    pub fn set_favorite_locations(&mut self, locations: Vec<String>) {
        self.favorite_locations = locations;
    }

    fn check_invariants(&self) -> Result<(), DomainError> {
        let expected = level_for_points(self.total_points);
        if self.level != expected {
            return Err(DomainError::invariant(format!(
                "profile level {} does not match {} points (expected {})",
                self.level, self.total_points, expected
            )));
        }
        for (i, city) in self.visited_cities.iter().enumerate() {
            if self.visited_cities[..i].contains(city) {
                return Err(DomainError::invariant(format!(
                    "visited city '{}' is listed twice",
                    city
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UserProfileWireFormat {
    name: ExplorerName,
    #[serde(default)]
    avatar: Option<String>,
    level: u32,
    total_points: u64,
    completed_quests: u32,
    #[serde(default)]
    badges: Vec<Badge>,
    #[serde(default)]
    achievements: Vec<Achievement>,
    #[serde(default)]
    visited_cities: Vec<String>,
    #[serde(default)]
    favorite_locations: Vec<String>,
    #[serde(default)]
    interests: Vec<String>,
    join_date: DateTime<Utc>,
}

impl Serialize for UserProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = UserProfileWireFormat {
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            level: self.level,
            total_points: self.total_points,
            completed_quests: self.completed_quests,
            badges: self.badges.clone(),
            achievements: self.achievements.clone(),
            visited_cities: self.visited_cities.clone(),
            favorite_locations: self.favorite_locations.clone(),
            interests: self.interests.clone(),
            join_date: self.join_date,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UserProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = UserProfileWireFormat::deserialize(deserializer)?;

        let profile = UserProfile {
            name: wire.name,
            avatar: wire.avatar,
            level: wire.level,
            total_points: wire.total_points,
            completed_quests: wire.completed_quests,
            badges: wire.badges,
            achievements: wire.achievements,
            visited_cities: wire.visited_cities,
            favorite_locations: wire.favorite_locations,
            interests: wire.interests,
            join_date: wire.join_date,
        };
        profile.check_invariants().map_err(serde::de::Error::custom)?;
        Ok(profile)
    }
}
