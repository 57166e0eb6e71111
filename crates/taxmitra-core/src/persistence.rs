//! Durable slot storage port and the persistence gateway.
//!
//! The conversation and the profile live in two independent string-keyed
//! slots. The gateway owns (de)serialization and the rehydration policy;
//! `SlotStore` implementations live in taxmitra-infra.

use taxmitra_types::chat::Turn;
use taxmitra_types::error::PersistenceError;
use taxmitra_types::profile::BusinessProfile;
use tracing::warn;

use crate::store::conversation::ConversationStore;

/// Slot holding the serialized conversation log.
pub const CONVERSATION_SLOT: &str = "conversation";
/// Slot holding the serialized business profile.
pub const PROFILE_SLOT: &str = "profile";

/// Durable string-keyed slot storage.
///
/// Each individual slot write is all-or-nothing: a failed write leaves the
/// slot's previous value intact. No multi-slot transaction is offered.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in taxmitra-infra.
pub trait SlotStore: Send + Sync {
    /// Read a slot. Returns None when the slot has never been written.
    fn read(
        &self,
        slot: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, PersistenceError>> + Send;

    /// Write a slot, replacing any previous value.
    fn write(
        &self,
        slot: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), PersistenceError>> + Send;
}

/// State reconstructed from the backing store at startup.
///
/// `None` means the slot was absent, or corrupt and recovered to defaults.
#[derive(Debug, Default)]
pub struct RestoredState {
    pub conversation: Option<Vec<Turn>>,
    pub profile: Option<BusinessProfile>,
}

/// Serializes the session stores to their slots and rehydrates them at
/// startup.
///
/// The gateway never mutates the stores it is given; it only reads them for
/// save and produces fresh replacement values on load.
pub struct PersistenceGateway<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Save both stores to their independent slots.
    ///
    /// There is no atomic multi-slot transaction: if the second write is
    /// rejected, the first slot keeps its new value and the second keeps
    /// its previous one.
    pub async fn save(
        &self,
        conversation: &ConversationStore,
        profile: &BusinessProfile,
    ) -> Result<(), PersistenceError> {
        let turns = serde_json::to_string(conversation.all())
            .map_err(|e| PersistenceError::Unavailable(format!("serialize conversation: {e}")))?;
        self.store.write(CONVERSATION_SLOT, &turns).await?;

        let record = serde_json::to_string(profile)
            .map_err(|e| PersistenceError::Unavailable(format!("serialize profile: {e}")))?;
        self.store.write(PROFILE_SLOT, &record).await
    }

    /// Strict load of the conversation slot.
    ///
    /// Missing slot is `Ok(None)`; undecodable data is `CorruptState`.
    pub async fn load_conversation(&self) -> Result<Option<Vec<Turn>>, PersistenceError> {
        self.load_slot(CONVERSATION_SLOT).await
    }

    /// Strict load of the profile slot.
    pub async fn load_profile(&self) -> Result<Option<BusinessProfile>, PersistenceError> {
        self.load_slot(PROFILE_SLOT).await
    }

    /// Rehydrate both slots for startup.
    ///
    /// A corrupt slot is logged and treated as absent so it never blocks the
    /// other slot from loading. Backing-store unavailability still
    /// propagates to the caller.
    pub async fn restore(&self) -> Result<RestoredState, PersistenceError> {
        let conversation = recover_corrupt(self.load_conversation().await)?;
        let profile = recover_corrupt(self.load_profile().await)?;
        Ok(RestoredState {
            conversation,
            profile,
        })
    }

    async fn load_slot<T: serde::de::DeserializeOwned>(
        &self,
        slot: &str,
    ) -> Result<Option<T>, PersistenceError> {
        match self.store.read(slot).await? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                PersistenceError::CorruptState {
                    slot: slot.to_string(),
                    detail: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }
}

fn recover_corrupt<T>(
    result: Result<Option<T>, PersistenceError>,
) -> Result<Option<T>, PersistenceError> {
    match result {
        Err(PersistenceError::CorruptState { slot, detail }) => {
            warn!(slot = %slot, %detail, "Discarding corrupt slot, falling back to defaults");
            Ok(None)
        }
        other => other,
    }
}
