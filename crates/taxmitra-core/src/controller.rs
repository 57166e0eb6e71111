//! Chat controller orchestrating the conversation flow.
//!
//! `ChatController` coordinates the user-message, formatted-response,
//! persisted-state flow: it owns both session stores, drives the display and
//! modal surfaces, and is the only component with side effects beyond pure
//! computation. All recoverable errors stop here; nothing below the
//! validation layer ever reaches the UI as a failure.

use std::time::Duration;

use taxmitra_types::chat::{RequestId, Sender, Turn};
use taxmitra_types::config::ChatConfig;
use taxmitra_types::error::ValidationError;
use taxmitra_types::profile::BusinessProfile;
use tracing::{debug, info, warn};

use crate::engine;
use crate::markup;
use crate::persistence::{PersistenceGateway, SlotStore};
use crate::store::conversation::ConversationStore;
use crate::store::profile::ProfileStore;

/// Opening bot message materialized on first launch.
const WELCOME_MESSAGE: &str = "Hello! I'm TaxMitra, your tax advisory assistant. Ask me about GST, filing deadlines, deductions, or invoices, and I'll do my best to help.";

const PROFILE_CONFIRMATION: &str = "Business profile updated successfully! ";
const PROFILE_CONFIRMATION_FIRST_TIME: &str =
    "I'll use this information to provide you with more personalized tax advice.";

/// Shown once when the backing store stops accepting state.
const STORAGE_NOTICE: &str = "Your conversation can't be saved right now. You can keep chatting; history will last until this session ends.";

/// The two dialog kinds the modal surface can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    FileUpload,
    ProfileEdit,
}

/// Rendering side of the UI, one message bubble at a time.
pub trait DisplaySurface {
    /// Render one turn; `safe_markup` is the escaped and enriched form of
    /// `turn.content`.
    fn render_turn(&mut self, turn: &Turn, safe_markup: &str);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn scroll_to_latest(&mut self);
    /// Refresh the profile panel after a restore or an edit submission.
    fn refresh_profile(&mut self, profile: &BusinessProfile);
    /// Non-blocking notice, e.g. the one-time persistence warning.
    fn notice(&mut self, text: &str);
}

/// Dialog side of the UI.
pub trait ModalSurface {
    fn open(&mut self, kind: ModalKind);
    fn close_all(&mut self);
}

/// A response waiting on the simulated delay.
struct PendingResponse {
    id: RequestId,
    message: String,
}

/// Orchestrates conversation state, response generation, and persistence.
///
/// Generic over the slot store and both UI surfaces so the core never
/// depends on a concrete backing store or rendering technology.
pub struct ChatController<S: SlotStore, D: DisplaySurface, M: ModalSurface> {
    conversation: ConversationStore,
    profile: ProfileStore,
    gateway: PersistenceGateway<S>,
    display: D,
    modals: M,
    response_delay: Duration,
    pending: Option<PendingResponse>,
    memory_only: bool,
}

impl<S: SlotStore, D: DisplaySurface, M: ModalSurface> ChatController<S, D, M> {
    pub fn new(store: S, display: D, modals: M, config: &ChatConfig) -> Self {
        Self {
            conversation: ConversationStore::new(),
            profile: ProfileStore::new(),
            gateway: PersistenceGateway::new(store),
            display,
            modals,
            response_delay: Duration::from_millis(config.response_delay_ms),
            pending: None,
            memory_only: false,
        }
    }

    /// Rehydrate persisted state and render the initial view.
    ///
    /// A restored conversation fully replaces the default welcome content;
    /// with nothing persisted, the welcome turn is materialized and will be
    /// persisted by later saves. A restored profile replaces the defaults
    /// and refreshes the profile display. An unavailable backing store
    /// drops the session into memory-only mode with a one-time notice.
    pub async fn init(&mut self) {
        match self.gateway.restore().await {
            Ok(state) => {
                match state.conversation {
                    Some(turns) if !turns.is_empty() => {
                        info!(turns = turns.len(), "Restored persisted conversation");
                        self.conversation = ConversationStore::from_turns(turns);
                    }
                    _ => self.conversation.append(Turn::welcome(WELCOME_MESSAGE)),
                }
                if let Some(profile) = state.profile {
                    self.profile.replace(profile);
                    self.display.refresh_profile(self.profile.get());
                }
            }
            Err(err) => {
                warn!(%err, "Backing store unavailable, continuing in memory-only mode");
                self.enter_memory_only();
                self.conversation.append(Turn::welcome(WELCOME_MESSAGE));
            }
        }

        for turn in self.conversation.all() {
            let safe = markup::render(&turn.content);
            self.display.render_turn(turn, &safe);
        }
        self.display.scroll_to_latest();
    }

    /// Accept a user message and arm the deferred response.
    ///
    /// Returns the request token the embedding event loop must hand to
    /// [`Self::complete_response`]. Submitting again before the pending
    /// response resolves re-arms the token; the superseded completion then
    /// resolves to a no-op.
    pub fn send_message(&mut self, text: &str) -> Result<RequestId, ValidationError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        self.push_turn(Turn::user(message));
        self.display.scroll_to_latest();
        self.display.show_loading();

        let id = RequestId::new();
        if let Some(previous) = self.pending.replace(PendingResponse {
            id,
            message: message.to_string(),
        }) {
            warn!(superseded = %previous.id, "New message while a response was pending");
        }
        Ok(id)
    }

    /// Resolve the deferred response armed by [`Self::send_message`].
    ///
    /// This is the single suspension point in the system: it sleeps the
    /// configured delay, then generates the reply from the current profile
    /// snapshot. Stale tokens are dropped.
    pub async fn complete_response(&mut self, id: RequestId) {
        tokio::time::sleep(self.response_delay).await;

        let Some(pending) = self.pending.take_if(|p| p.id == id) else {
            debug!(request = %id, "Dropping stale response completion");
            return;
        };

        let reply = engine::generate(&pending.message, self.profile.get());
        self.display.hide_loading();
        self.push_turn(Turn::bot(reply));
        self.persist().await;
        self.display.scroll_to_latest();
    }

    /// Clear the history down to the welcome turn and persist the result.
    pub async fn clear_chat(&mut self) {
        self.conversation.clear();
        self.persist().await;
    }

    /// Start a fresh conversation. Currently identical to [`Self::clear_chat`].
    pub async fn start_new_chat(&mut self) {
        self.clear_chat().await;
    }

    pub fn open_file_upload(&mut self) {
        self.modals.open(ModalKind::FileUpload);
    }

    /// Open the profile editor; the form pre-populates from [`Self::profile`].
    pub fn open_profile_editor(&mut self) {
        self.modals.open(ModalKind::ProfileEdit);
    }

    /// Close any open dialog without touching state.
    pub fn cancel_modal(&mut self) {
        self.modals.close_all();
    }

    /// Handle the upload form submission.
    ///
    /// Only the filename is used; file bytes are never read.
    pub async fn submit_upload(&mut self, filename: &str) -> Result<(), ValidationError> {
        if filename.trim().is_empty() {
            return Err(ValidationError::EmptyFileSelection);
        }

        self.modals.close_all();
        let acknowledgment = format!(
            "Thank you for uploading \"{filename}\". I've analyzed this document and can assist you with any questions about it."
        );
        self.push_turn(Turn::bot(acknowledgment));
        self.persist().await;
        self.display.scroll_to_latest();
        Ok(())
    }

    /// Handle the profile form submission: wholesale replacement.
    pub async fn submit_profile(&mut self, profile: BusinessProfile) {
        self.profile.replace(profile);
        self.display.refresh_profile(self.profile.get());
        self.modals.close_all();

        // The confirmation itself mentions "profile", so only the very
        // first update gets the extra personalization sentence.
        let first_update = !self
            .conversation
            .all()
            .iter()
            .any(|t| t.sender == Sender::Bot && t.content.contains("profile"));
        let mut confirmation = PROFILE_CONFIRMATION.to_string();
        if first_update {
            confirmation.push_str(PROFILE_CONFIRMATION_FIRST_TIME);
        }

        self.push_turn(Turn::bot(confirmation));
        self.persist().await;
        self.display.scroll_to_latest();
    }

    /// Read view of the conversation log.
    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    /// Current profile, e.g. for pre-populating the edit form.
    pub fn profile(&self) -> &BusinessProfile {
        self.profile.get()
    }

    /// True once a persistence failure dropped the session into
    /// memory-only mode.
    pub fn is_memory_only(&self) -> bool {
        self.memory_only
    }

    /// Render a turn and append it to the log.
    fn push_turn(&mut self, turn: Turn) {
        let safe = markup::render(&turn.content);
        self.display.render_turn(&turn, &safe);
        self.conversation.append(turn);
    }

    /// Save both stores; a failure flips the session into memory-only mode.
    async fn persist(&mut self) {
        if self.memory_only {
            return;
        }
        if let Err(err) = self
            .gateway
            .save(&self.conversation, self.profile.get())
            .await
        {
            warn!(%err, "Persisting session state failed, switching to memory-only mode");
            self.enter_memory_only();
        }
    }

    fn enter_memory_only(&mut self) {
        if !self.memory_only {
            self.memory_only = true;
            self.display.notice(STORAGE_NOTICE);
        }
    }
}
