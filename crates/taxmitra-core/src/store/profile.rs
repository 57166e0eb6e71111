//! Mutable holder for the business profile.

use taxmitra_types::profile::BusinessProfile;

/// Owns the session's business profile.
///
/// The record is wholesale-replaced on every edit submission; there is no
/// partial merge and no validation of field contents.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profile: BusinessProfile,
}

impl ProfileStore {
    /// Create a store holding the all-empty default record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from a persisted profile.
    pub fn from_profile(profile: BusinessProfile) -> Self {
        Self { profile }
    }

    /// Wholesale-replace the profile.
    pub fn replace(&mut self, profile: BusinessProfile) {
        self.profile = profile;
    }

    /// Snapshot read of the current profile.
    pub fn get(&self) -> &BusinessProfile {
        &self.profile
    }
}
