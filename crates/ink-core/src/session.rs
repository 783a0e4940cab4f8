//! Session driver
//!
//! A [`Session`] routes input events into a [`MeshBuilder`] once per tick and
//! owns the anchor task started by the first committed point.

use glam::Vec3;

use crate::anchor::{AnchorHandle, AnchorStatus, AnchorTask};
use crate::builder::{CommitOutcome, MeshBuilder, UndoOutcome};
use crate::collab::Collaborators;
use crate::config::BuilderConfig;
use crate::input::InputEvent;

/// What a single event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// A press-hold cycle started at this position
    PreviewStarted(Vec3),
    /// The preview moved to this snapped position
    PreviewMoved(Vec3),
    /// A point was committed
    Committed(CommitOutcome),
    /// The preview was discarded
    PreviewAborted,
    Undone(UndoOutcome),
    /// The event carried nothing to act on
    Ignored,
}

/// A mesh-authoring session
#[derive(Debug)]
pub struct Session {
    builder: MeshBuilder,
    anchor: Option<AnchorTask>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl Session {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            builder: MeshBuilder::new(config),
            anchor: None,
        }
    }

    pub fn builder(&self) -> &MeshBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut MeshBuilder {
        &mut self.builder
    }

    /// Handle of the anchor task, once it has started
    pub fn anchor_handle(&self) -> Option<AnchorHandle> {
        self.anchor.as_ref().map(AnchorTask::handle)
    }

    /// Status of the anchor task, once it has started
    pub fn anchor_status(&self) -> Option<&AnchorStatus> {
        self.anchor.as_ref().map(AnchorTask::status)
    }

    /// Process one event
    pub fn handle(&mut self, event: InputEvent, collab: &mut Collaborators<'_>) -> EventOutcome {
        match event {
            InputEvent::PlacePressed(Some(pointer)) => {
                self.builder.begin_preview(pointer, &mut *collab.renderer);
                EventOutcome::PreviewStarted(pointer)
            }
            InputEvent::PlaceHeld(Some(pointer)) => {
                if self.builder.is_previewing() {
                    let snapped = self.builder.update_preview(pointer, &mut *collab.renderer);
                    EventOutcome::PreviewMoved(snapped)
                } else {
                    // Press arrived without a pointer sample
                    self.builder.begin_preview(pointer, &mut *collab.renderer);
                    EventOutcome::PreviewStarted(pointer)
                }
            }
            InputEvent::PlaceReleased(pointer) => {
                // Only a release that ends an active press-hold cycle commits
                let Some(preview) = self.builder.preview_position() else {
                    tracing::debug!("Release without an active preview ignored");
                    return EventOutcome::Ignored;
                };
                let pointer = pointer.unwrap_or(preview);
                let outcome = self.builder.commit_point(
                    pointer,
                    &mut *collab.renderer,
                    &mut *collab.haptics,
                );
                self.start_anchor(outcome.position());
                EventOutcome::Committed(outcome)
            }
            InputEvent::PlaceCancelled => {
                if !self.builder.is_previewing() {
                    return EventOutcome::Ignored;
                }
                self.builder.abort_preview(&mut *collab.renderer);
                EventOutcome::PreviewAborted
            }
            InputEvent::Undo => EventOutcome::Undone(self.builder.undo(&mut *collab.renderer)),
            InputEvent::PlacePressed(None) | InputEvent::PlaceHeld(None) => EventOutcome::Ignored,
        }
    }

    /// Process a tick's events, then advance the anchor task by one step
    pub fn tick(
        &mut self,
        events: &[InputEvent],
        collab: &mut Collaborators<'_>,
    ) -> Vec<EventOutcome> {
        let outcomes = events
            .iter()
            .map(|&event| self.handle(event, collab))
            .collect();

        if let (Some(task), Some(service)) = (self.anchor.as_mut(), collab.anchors.as_deref_mut()) {
            task.poll(service);
        }

        outcomes
    }

    /// Scale the mesh by the configured percentage
    pub fn scale(&mut self) {
        self.builder.scale_default();
    }

    /// Tear down the session, cancelling any unfinished anchor task
    pub fn end(&mut self) {
        if let Some(task) = &self.anchor
            && !task.status().is_finished()
        {
            tracing::debug!("Cancelling anchor task");
            task.handle().cancel();
        }
    }

    fn start_anchor(&mut self, position: Vec3) {
        let anchor = self.builder.config().anchor;
        if !anchor.enabled || self.anchor.is_some() {
            return;
        }
        tracing::info!("Anchoring mesh at first point {:?}", position);
        self.anchor = Some(AnchorTask::new(position, anchor.max_localize_polls));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{AnchorError, AnchorId};
    use crate::builder::PlacementState;
    use crate::collab::{AnchorService, NullHaptics, NullRenderer};
    use uuid::Uuid;

    #[derive(Default)]
    struct SlowAnchors {
        created_at: Option<Vec3>,
        polls: u32,
    }

    impl AnchorService for SlowAnchors {
        fn erase_all(&mut self) -> Result<(), AnchorError> {
            Ok(())
        }

        fn create_anchor(&mut self, position: Vec3) -> Result<AnchorId, AnchorError> {
            self.created_at = Some(position);
            Ok(Uuid::new_v4())
        }

        fn is_localized(&mut self, _anchor: AnchorId) -> Result<bool, AnchorError> {
            self.polls += 1;
            Ok(false)
        }

        fn reparent_mesh(&mut self, _anchor: AnchorId) -> Result<(), AnchorError> {
            Ok(())
        }
    }

    fn config(anchor: bool) -> BuilderConfig {
        let mut config = BuilderConfig::default();
        config.axis_snap.enabled = false;
        config.anchor.enabled = anchor;
        config
    }

    fn click(p: Vec3) -> [InputEvent; 2] {
        [InputEvent::PlacePressed(Some(p)), InputEvent::PlaceReleased(Some(p))]
    }

    #[test]
    fn test_press_hold_release_commits_point() {
        let mut session = Session::new(config(false));
        let (mut r, mut h) = (NullRenderer, NullHaptics);
        let mut collab = Collaborators::new(&mut r, &mut h);

        let outcomes = session.tick(
            &[
                InputEvent::PlacePressed(Some(Vec3::ZERO)),
                InputEvent::PlaceHeld(Some(Vec3::X)),
                InputEvent::PlaceReleased(Some(Vec3::X)),
            ],
            &mut collab,
        );
        assert_eq!(outcomes[0], EventOutcome::PreviewStarted(Vec3::ZERO));
        assert_eq!(outcomes[1], EventOutcome::PreviewMoved(Vec3::X));
        assert!(matches!(outcomes[2], EventOutcome::Committed(_)));
        assert_eq!(session.builder().state(), PlacementState::Placing1);
        assert!(!session.builder().is_previewing());
    }

    #[test]
    fn test_release_without_pointer_uses_preview() {
        let mut session = Session::new(config(false));
        let (mut r, mut h) = (NullRenderer, NullHaptics);
        let mut collab = Collaborators::new(&mut r, &mut h);

        session.tick(&[InputEvent::PlaceHeld(Some(Vec3::Y))], &mut collab);
        let outcomes = session.tick(&[InputEvent::PlaceReleased(None)], &mut collab);
        let EventOutcome::Committed(commit) = outcomes[0] else {
            panic!("expected commit, got {:?}", outcomes[0]);
        };
        assert_eq!(commit.position(), Vec3::Y);
    }

    #[test]
    fn test_missing_samples_are_ignored() {
        let mut session = Session::new(config(false));
        let (mut r, mut h) = (NullRenderer, NullHaptics);
        let mut collab = Collaborators::new(&mut r, &mut h);

        let outcomes = session.tick(
            &[
                InputEvent::PlacePressed(None),
                InputEvent::PlaceHeld(None),
                InputEvent::PlaceReleased(None),
                InputEvent::PlaceCancelled,
            ],
            &mut collab,
        );
        assert!(outcomes.iter().all(|o| *o == EventOutcome::Ignored));
        assert_eq!(session.builder().state(), PlacementState::Idle);
    }

    #[test]
    fn test_cancel_keeps_pending_points() {
        let mut session = Session::new(config(false));
        let (mut r, mut h) = (NullRenderer, NullHaptics);
        let mut collab = Collaborators::new(&mut r, &mut h);

        session.tick(&click(Vec3::ZERO), &mut collab);
        let outcomes = session.tick(
            &[
                InputEvent::PlacePressed(Some(Vec3::X)),
                InputEvent::PlaceCancelled,
                InputEvent::PlaceReleased(Some(Vec3::X)),
            ],
            &mut collab,
        );
        assert_eq!(outcomes[1], EventOutcome::PreviewAborted);
        assert_eq!(outcomes[2], EventOutcome::Ignored);
        assert_eq!(session.builder().state(), PlacementState::Placing1);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut session = Session::new(config(false));
        let (mut r, mut h) = (NullRenderer, NullHaptics);
        let mut collab = Collaborators::new(&mut r, &mut h);

        let outcomes = session.tick(&[InputEvent::PlaceReleased(Some(Vec3::Y))], &mut collab);
        assert_eq!(outcomes, vec![EventOutcome::Ignored]);
        assert_eq!(session.builder().state(), PlacementState::Idle);
        assert!(session.builder().mesh().is_empty());
    }

    #[test]
    fn test_anchor_starts_on_first_point_and_polls_each_tick() {
        let mut session = Session::new(config(true));
        let (mut r, mut h, mut a) = (NullRenderer, NullHaptics, SlowAnchors::default());
        let mut collab = Collaborators::new(&mut r, &mut h).with_anchors(&mut a);

        assert!(session.anchor_handle().is_none());
        session.tick(&click(Vec3::ONE), &mut collab);
        session.tick(&click(Vec3::X), &mut collab);
        session.tick(&[], &mut collab);
        session.tick(&[], &mut collab);

        // erase, create, then two localize polls
        assert!(matches!(
            session.anchor_status(),
            Some(AnchorStatus::Localizing { polls: 2, .. })
        ));
        drop(collab);
        assert_eq!(a.created_at, Some(Vec3::ONE));
        assert_eq!(a.polls, 2);
    }

    #[test]
    fn test_end_cancels_anchor_task() {
        let mut session = Session::new(config(true));
        let (mut r, mut h, mut a) = (NullRenderer, NullHaptics, SlowAnchors::default());
        let mut collab = Collaborators::new(&mut r, &mut h).with_anchors(&mut a);

        session.tick(&click(Vec3::ZERO), &mut collab);
        let handle = session.anchor_handle().unwrap();
        session.end();
        assert!(handle.is_cancelled());

        session.tick(&[], &mut collab);
        assert_eq!(handle.status(), AnchorStatus::Cancelled);
        // Construction continues without the anchor
        session.tick(&click(Vec3::X), &mut collab);
        assert_eq!(session.builder().state(), PlacementState::Placing2);
    }

    #[test]
    fn test_anchor_disabled_never_starts() {
        let mut session = Session::new(config(false));
        let (mut r, mut h, mut a) = (NullRenderer, NullHaptics, SlowAnchors::default());
        let mut collab = Collaborators::new(&mut r, &mut h).with_anchors(&mut a);
        session.tick(&click(Vec3::ZERO), &mut collab);
        assert!(session.anchor_handle().is_none());
    }
}
