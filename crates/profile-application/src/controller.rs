//! Profile screen controller.
//!
//! Holds the committed profile plus an optional draft. The draft exists only
//! while editing and is a copy, so cancelling never touches the committed
//! values. The one exception to the edit/submit gate is the picture, which is
//! applied and persisted as soon as the user picks it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use profile_core::error::Result;
use profile_core::picker::{ImagePicker, PermissionStatus, PickConstraints, PickResult};
use profile_core::profile::{PROFILE_STORAGE_KEY, Profile, ProfileField, ProfileStore};
use profile_infrastructure::dto;

use crate::outcome::{LoadOutcome, PictureOutcome, SubmitOutcome};
use crate::view::ProfileView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// A draft mutation was attempted outside an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Not editing: start editing the profile first")]
    NotEditing,
}

/// State and operations behind the profile screen.
///
/// Construct once per session, call [`load`](Self::load), then drive it from
/// user actions. Operations take `&mut self`, so they complete in the order
/// the user triggered them.
///
/// # Example
///
/// ```ignore
/// let mut controller = ProfileController::new(store, picker);
/// controller.load().await;
/// controller.begin_edit();
/// controller.update_field(ProfileField::FirstName, "Maria")?;
/// if let Some(notice) = controller.submit().await.notice() {
///     show(notice.message());
/// }
/// ```
pub struct ProfileController {
    store: Arc<dyn ProfileStore>,
    picker: Arc<dyn ImagePicker>,
    committed: Profile,
    draft: Option<Profile>,
}

impl ProfileController {
    /// Starts in viewing mode with the default profile.
    pub fn new(store: Arc<dyn ProfileStore>, picker: Arc<dyn ImagePicker>) -> Self {
        Self {
            store,
            picker,
            committed: Profile::default(),
            draft: None,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    /// The last saved (or loaded) profile.
    pub fn profile(&self) -> &Profile {
        &self.committed
    }

    pub fn draft(&self) -> Option<&Profile> {
        self.draft.as_ref()
    }

    pub fn mode(&self) -> EditMode {
        if self.draft.is_some() {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// What the screen should show: the draft while editing, else the committed profile.
    pub fn view(&self) -> ProfileView {
        let shown = self.draft.as_ref().unwrap_or(&self.committed);
        ProfileView::new(shown, self.is_editing())
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Replaces the committed profile with the stored record, if any.
    ///
    /// Failures are logged and leave the current profile in place.
    pub async fn load(&mut self) -> LoadOutcome {
        match self.read_stored().await {
            Ok(Some(profile)) => {
                tracing::info!("[ProfileController] Restored stored profile");
                self.committed = profile;
                LoadOutcome::Restored
            }
            Ok(None) => {
                tracing::info!("[ProfileController] No stored profile, keeping defaults");
                LoadOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!("[ProfileController] Failed to load profile: {}", e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Enters edit mode with a fresh copy of the committed profile.
    ///
    /// Does nothing if already editing.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            tracing::debug!("[ProfileController] Begin edit");
            self.draft = Some(self.committed.clone());
        }
    }

    /// Replaces one text field of the draft. No validation happens here.
    pub fn update_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) -> std::result::Result<(), EditError> {
        let draft = self.draft.as_mut().ok_or(EditError::NotEditing)?;
        draft.set_field(field, value);
        Ok(())
    }

    /// Replaces the draft's date of birth. Any date is accepted.
    pub fn set_date_of_birth(
        &mut self,
        date: DateTime<Utc>,
    ) -> std::result::Result<(), EditError> {
        let draft = self.draft.as_mut().ok_or(EditError::NotEditing)?;
        draft.date_of_birth = date;
        Ok(())
    }

    /// Lets the user choose a new picture and persists it immediately.
    ///
    /// The picture is applied to the committed profile (and to the draft, if
    /// any, so a later save keeps it). No other field changes.
    pub async fn pick_picture(&mut self) -> PictureOutcome {
        match self.picker.request_permission().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(PermissionStatus::Denied) => {
                tracing::info!("[ProfileController] Photo library permission denied");
                return PictureOutcome::PermissionDenied;
            }
            Err(e) => {
                tracing::warn!("[ProfileController] Permission request failed: {}", e);
                return PictureOutcome::Failed(e);
            }
        }

        let locator = match self
            .picker
            .pick_image(PickConstraints::profile_picture())
            .await
        {
            Ok(PickResult::Selected { locator }) => locator,
            Ok(PickResult::Cancelled) => {
                tracing::debug!("[ProfileController] Picture selection cancelled");
                return PictureOutcome::Cancelled;
            }
            Err(e) => {
                tracing::warn!("[ProfileController] Image picker failed: {}", e);
                return PictureOutcome::Failed(e);
            }
        };

        self.committed.picture = Some(locator.clone());
        if let Some(draft) = self.draft.as_mut() {
            draft.picture = Some(locator.clone());
        }

        let persisted = match self.persist(&self.committed).await {
            Ok(()) => {
                tracing::info!("[ProfileController] Picture updated: {}", locator);
                true
            }
            Err(e) => {
                tracing::warn!("[ProfileController] Failed to persist picture: {}", e);
                false
            }
        };

        PictureOutcome::Updated { locator, persisted }
    }

    /// Validates and saves the draft.
    ///
    /// Only a successful write commits the draft and leaves edit mode; on
    /// rejection or write failure the draft stays as the user left it.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(draft) = self.draft.as_ref() else {
            return SubmitOutcome::NotEditing;
        };

        if let Err(e) = draft.validate() {
            tracing::info!("[ProfileController] Submit rejected: {}", e);
            return SubmitOutcome::Rejected(e);
        }

        if let Err(e) = self.persist(draft).await {
            tracing::warn!("[ProfileController] Failed to save profile: {}", e);
            return SubmitOutcome::NotPersisted(e);
        }

        if let Some(saved) = self.draft.take() {
            self.committed = saved;
        }
        tracing::info!("[ProfileController] Profile saved");
        SubmitOutcome::Saved
    }

    /// Leaves edit mode, discarding the draft.
    pub fn cancel_edit(&mut self) {
        if self.draft.take().is_some() {
            tracing::debug!("[ProfileController] Edit cancelled, draft discarded");
        }
    }

    // ============================================================================
    // Persistence helpers
    // ============================================================================

    async fn read_stored(&self) -> Result<Option<Profile>> {
        self.store
            .get(PROFILE_STORAGE_KEY)
            .await?
            .map(|text| dto::deserialize(&text))
            .transpose()
    }

    async fn persist(&self, profile: &Profile) -> Result<()> {
        let text = dto::serialize(profile)?;
        self.store.set(PROFILE_STORAGE_KEY, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use profile_core::error::ProfileError;
    use profile_core::picker::Locator;
    use profile_infrastructure::MemoryProfileStore;
    use std::sync::Mutex;

    use crate::outcome::Notice;

    /// Picker answering from a script and recording the constraints it saw.
    struct ScriptedPicker {
        permission: PermissionStatus,
        result: PickResult,
        seen: Mutex<Vec<PickConstraints>>,
    }

    impl ScriptedPicker {
        fn new(permission: PermissionStatus, result: PickResult) -> Arc<Self> {
            Arc::new(Self {
                permission,
                result,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn selecting(locator: &str) -> Arc<Self> {
            Self::new(
                PermissionStatus::Granted,
                PickResult::Selected {
                    locator: Locator::new(locator),
                },
            )
        }

        fn pick_calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ImagePicker for ScriptedPicker {
        async fn request_permission(&self) -> Result<PermissionStatus> {
            Ok(self.permission)
        }

        async fn pick_image(&self, constraints: PickConstraints) -> Result<PickResult> {
            self.seen.lock().unwrap().push(constraints);
            Ok(self.result.clone())
        }
    }

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    #[async_trait]
    impl ProfileStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ProfileError::io("disk unavailable"))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(ProfileError::io("disk unavailable"))
        }
    }

    fn controller_with(store: &MemoryProfileStore, picker: Arc<ScriptedPicker>) -> ProfileController {
        ProfileController::new(Arc::new(store.clone()), picker)
    }

    fn idle_picker() -> Arc<ScriptedPicker> {
        ScriptedPicker::new(PermissionStatus::Granted, PickResult::Cancelled)
    }

    fn stored_profile(writes: &[(String, String)], index: usize) -> Profile {
        let (key, text) = &writes[index];
        assert_eq!(key, PROFILE_STORAGE_KEY);
        dto::deserialize(text).unwrap()
    }

    #[tokio::test]
    async fn test_load_with_empty_store_keeps_defaults() {
        let store = MemoryProfileStore::new();
        let mut controller = controller_with(&store, idle_picker());
        let before = controller.profile().clone();

        let outcome = controller.load().await;

        assert!(matches!(outcome, LoadOutcome::NotFound));
        assert_eq!(controller.profile(), &before);
        assert_eq!(controller.profile().first_name, "Jose");
        assert_eq!(controller.profile().last_name, "Salgado");
        assert_eq!(controller.profile().nationality, "Nicaraguan");
        assert_eq!(controller.mode(), EditMode::Viewing);
    }

    #[tokio::test]
    async fn test_load_restores_stored_profile() {
        let stored = Profile {
            picture: Some(Locator::new("content://media/42")),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1998, 7, 1, 6, 0, 0).unwrap(),
            nationality: "Honduran".to_string(),
            bio: String::new(),
        };
        let store = MemoryProfileStore::with_record(
            PROFILE_STORAGE_KEY,
            dto::serialize(&stored).unwrap(),
        );
        let mut controller = controller_with(&store, idle_picker());

        assert!(matches!(controller.load().await, LoadOutcome::Restored));
        assert_eq!(controller.profile(), &stored);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_profile() {
        let store = MemoryProfileStore::with_record(PROFILE_STORAGE_KEY, "{broken");
        let mut controller = controller_with(&store, idle_picker());
        let before = controller.profile().clone();

        assert!(matches!(controller.load().await, LoadOutcome::Failed(_)));
        assert_eq!(controller.profile(), &before);

        let mut broken = ProfileController::new(Arc::new(BrokenStore), idle_picker());
        assert!(matches!(broken.load().await, LoadOutcome::Failed(e) if e.is_io()));
        assert_eq!(broken.profile().first_name, "Jose");
    }

    #[tokio::test]
    async fn test_edits_require_edit_mode() {
        let store = MemoryProfileStore::new();
        let mut controller = controller_with(&store, idle_picker());

        assert_eq!(
            controller.update_field(ProfileField::FirstName, "Maria"),
            Err(EditError::NotEditing)
        );
        assert_eq!(
            controller.set_date_of_birth(Utc::now()),
            Err(EditError::NotEditing)
        );
        assert!(matches!(controller.submit().await, SubmitOutcome::NotEditing));
        assert_eq!(store.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_submit_valid_draft_writes_once_and_commits() {
        let store = MemoryProfileStore::new();
        let mut controller = controller_with(&store, idle_picker());
        let dob = Utc.with_ymd_and_hms(2003, 9, 12, 0, 0, 0).unwrap();

        controller.begin_edit();
        controller
            .update_field(ProfileField::FirstName, "Maria")
            .unwrap();
        controller.set_date_of_birth(dob).unwrap();
        let draft = controller.draft().cloned().unwrap();

        let outcome = controller.submit().await;

        assert!(outcome.is_saved());
        assert!(outcome.notice().is_none());
        assert_eq!(controller.mode(), EditMode::Viewing);
        assert_eq!(controller.profile(), &draft);
        assert_eq!(controller.profile().date_of_birth, dob);

        let writes = store.writes().await;
        assert_eq!(writes.len(), 1);
        assert_eq!(stored_profile(&writes, 0), draft);
    }

    #[tokio::test]
    async fn test_submit_with_missing_required_field_is_rejected() {
        for field in [
            ProfileField::FirstName,
            ProfileField::LastName,
            ProfileField::Nationality,
        ] {
            let store = MemoryProfileStore::new();
            let mut controller = controller_with(&store, idle_picker());

            controller.begin_edit();
            controller.update_field(field, "").unwrap();
            let draft = controller.draft().cloned().unwrap();

            let outcome = controller.submit().await;

            let SubmitOutcome::Rejected(err) = &outcome else {
                panic!("expected rejection for {:?}, got {:?}", field, outcome);
            };
            assert_eq!(err.missing, vec![field]);
            assert!(matches!(
                outcome.notice(),
                Some(Notice::MissingRequiredFields(_))
            ));
            assert_eq!(controller.mode(), EditMode::Editing);
            assert_eq!(controller.draft(), Some(&draft));
            assert_eq!(controller.profile().field(field), Profile::default().field(field));
            assert_eq!(store.write_count().await, 0);
        }
    }

    #[tokio::test]
    async fn test_empty_bio_is_saved() {
        let store = MemoryProfileStore::new();
        let mut controller = controller_with(&store, idle_picker());

        controller.begin_edit();
        controller.update_field(ProfileField::Bio, "").unwrap();

        assert!(controller.submit().await.is_saved());
        assert_eq!(controller.profile().bio, "");
        assert_eq!(store.write_count().await, 1);
    }

    #[tokio::test]
    async fn test_submit_write_failure_keeps_draft() {
        let mut controller = ProfileController::new(Arc::new(BrokenStore), idle_picker());

        controller.begin_edit();
        controller
            .update_field(ProfileField::Nationality, "Panamanian")
            .unwrap();

        assert!(matches!(
            controller.submit().await,
            SubmitOutcome::NotPersisted(_)
        ));
        assert!(controller.is_editing());
        assert_eq!(controller.draft().unwrap().nationality, "Panamanian");
        assert_eq!(controller.profile().nationality, "Nicaraguan");
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let store = MemoryProfileStore::new();
        let mut controller = controller_with(&store, idle_picker());
        let before = controller.profile().clone();

        controller.begin_edit();
        controller.update_field(ProfileField::LastName, "Gomez").unwrap();
        assert_eq!(controller.view().last_name, "Gomez");
        controller.cancel_edit();

        assert_eq!(controller.mode(), EditMode::Viewing);
        assert!(controller.draft().is_none());
        assert_eq!(controller.profile(), &before);
        assert_eq!(controller.view().last_name, "Salgado");
        assert_eq!(store.write_count().await, 0);

        // A new session starts from the committed values again
        controller.begin_edit();
        assert_eq!(controller.draft(), Some(&before));
    }

    #[tokio::test]
    async fn test_begin_edit_twice_keeps_draft() {
        let store = MemoryProfileStore::new();
        let mut controller = controller_with(&store, idle_picker());

        controller.begin_edit();
        controller.update_field(ProfileField::Bio, "draft bio").unwrap();
        controller.begin_edit();

        assert_eq!(controller.draft().unwrap().bio, "draft bio");
    }

    #[tokio::test]
    async fn test_pick_picture_permission_denied() {
        let store = MemoryProfileStore::new();
        let picker = ScriptedPicker::new(
            PermissionStatus::Denied,
            PickResult::Selected {
                locator: Locator::new("file:///never.png"),
            },
        );
        let mut controller = controller_with(&store, picker.clone());
        let before = controller.profile().clone();

        let outcome = controller.pick_picture().await;

        assert!(matches!(outcome, PictureOutcome::PermissionDenied));
        assert_eq!(outcome.notice(), Some(Notice::PhotoPermissionRequired));
        assert_eq!(picker.pick_calls(), 0);
        assert_eq!(controller.profile(), &before);
        assert_eq!(store.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_pick_picture_cancelled() {
        let store = MemoryProfileStore::new();
        let picker = idle_picker();
        let mut controller = controller_with(&store, picker.clone());

        assert!(matches!(
            controller.pick_picture().await,
            PictureOutcome::Cancelled
        ));
        assert_eq!(picker.pick_calls(), 1);
        assert!(controller.profile().picture.is_none());
        assert_eq!(store.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_pick_picture_persists_immediately() {
        let store = MemoryProfileStore::new();
        let picker = ScriptedPicker::selecting("file:///photos/me.jpg");
        let mut controller = controller_with(&store, picker.clone());
        let before = controller.profile().clone();

        let outcome = controller.pick_picture().await;

        assert!(matches!(
            outcome,
            PictureOutcome::Updated { ref locator, persisted: true }
                if locator.as_str() == "file:///photos/me.jpg"
        ));
        assert_eq!(
            picker.seen.lock().unwrap().as_slice(),
            &[PickConstraints::profile_picture()]
        );

        let writes = store.writes().await;
        assert_eq!(writes.len(), 1);
        let saved = stored_profile(&writes, 0);
        assert_eq!(
            saved,
            Profile {
                picture: Some(Locator::new("file:///photos/me.jpg")),
                ..before
            }
        );
        assert_eq!(controller.profile(), &saved);
    }

    #[tokio::test]
    async fn test_pick_picture_while_editing_bypasses_draft_gate() {
        let store = MemoryProfileStore::new();
        let picker = ScriptedPicker::selecting("file:///photos/new.jpg");
        let mut controller = controller_with(&store, picker);

        controller.begin_edit();
        controller.update_field(ProfileField::FirstName, "").unwrap();
        controller.pick_picture().await;

        // Persisted record has the picture but not the invalid draft edit
        let writes = store.writes().await;
        assert_eq!(writes.len(), 1);
        let saved = stored_profile(&writes, 0);
        assert_eq!(saved.first_name, "Jose");
        assert_eq!(saved.picture, Some(Locator::new("file:///photos/new.jpg")));

        // Still editing, and the draft carries the picture forward
        assert!(controller.is_editing());
        assert_eq!(
            controller.draft().unwrap().picture,
            Some(Locator::new("file:///photos/new.jpg"))
        );
    }

    #[tokio::test]
    async fn test_pick_picture_write_failure_still_updates_memory() {
        let picker = ScriptedPicker::selecting("file:///photos/me.jpg");
        let mut controller = ProfileController::new(Arc::new(BrokenStore), picker);

        let outcome = controller.pick_picture().await;

        assert!(matches!(
            outcome,
            PictureOutcome::Updated { persisted: false, .. }
        ));
        assert_eq!(
            controller.profile().picture,
            Some(Locator::new("file:///photos/me.jpg"))
        );
    }
}
