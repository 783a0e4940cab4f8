//! Spatial anchoring of the mesh
//!
//! On the first vertex of a session the mesh is pinned to a persistent
//! anchor: erase old anchors, create one at the vertex, wait until it is
//! localized, then reparent the mesh under it. The task advances one step per
//! [`AnchorTask::poll`] so it never blocks a tick, and it can be cancelled
//! from any clone of its [`AnchorHandle`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec3;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::collab::AnchorService;

/// Identifier of a spatial anchor
pub type AnchorId = Uuid;

/// Progress of the anchor task
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnchorStatus {
    /// Erasing previously saved anchors
    #[default]
    Erasing,
    /// Creating the new anchor
    Creating,
    /// Waiting for the anchor to be localized
    Localizing { anchor: AnchorId, polls: u32 },
    /// Moving the mesh under the anchor
    Reparenting(AnchorId),
    /// Mesh is attached to the anchor
    Anchored(AnchorId),
    /// The task gave up; mesh construction is unaffected
    Failed(AnchorError),
    /// The task was cancelled before finishing
    Cancelled,
}

impl AnchorStatus {
    /// Whether the task will make no further progress
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            AnchorStatus::Anchored(_) | AnchorStatus::Failed(_) | AnchorStatus::Cancelled
        )
    }
}

/// Observer and cancellation handle for an [`AnchorTask`]
#[derive(Debug, Clone, Default)]
pub struct AnchorHandle {
    status: Arc<Mutex<AnchorStatus>>,
    cancelled: Arc<AtomicBool>,
}

impl AnchorHandle {
    /// Current status
    pub fn status(&self) -> AnchorStatus {
        self.status.lock().clone()
    }

    /// Request cancellation; takes effect at the next poll
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.status.lock().is_finished()
    }

    fn publish(&self, status: AnchorStatus) {
        *self.status.lock() = status;
    }
}

/// Cooperative erase → create → localize → reparent sequence
#[derive(Debug)]
pub struct AnchorTask {
    position: Vec3,
    max_localize_polls: u32,
    state: AnchorStatus,
    handle: AnchorHandle,
}

impl AnchorTask {
    /// Create a task that anchors the mesh at `position`
    pub fn new(position: Vec3, max_localize_polls: u32) -> Self {
        Self {
            position,
            max_localize_polls,
            state: AnchorStatus::Erasing,
            handle: AnchorHandle::default(),
        }
    }

    /// A handle sharing this task's status and cancellation flag
    pub fn handle(&self) -> AnchorHandle {
        self.handle.clone()
    }

    pub fn status(&self) -> &AnchorStatus {
        &self.state
    }

    /// Advance by one step
    pub fn poll(&mut self, service: &mut dyn AnchorService) -> &AnchorStatus {
        if self.state.is_finished() {
            return &self.state;
        }

        if self.handle.is_cancelled() {
            tracing::info!("Anchor task cancelled");
            return self.transition(AnchorStatus::Cancelled);
        }

        let next = match &self.state {
            AnchorStatus::Erasing => {
                // Stale anchors only waste storage; keep going
                if let Err(e) = service.erase_all() {
                    tracing::warn!("Failed to erase anchors: {}", e);
                }
                AnchorStatus::Creating
            }
            AnchorStatus::Creating => match service.create_anchor(self.position) {
                Ok(anchor) => {
                    tracing::debug!("Created anchor {} at {:?}", anchor, self.position);
                    AnchorStatus::Localizing { anchor, polls: 0 }
                }
                Err(e) => {
                    tracing::warn!("Failed to create anchor: {}", e);
                    AnchorStatus::Failed(e)
                }
            },
            AnchorStatus::Localizing { anchor, polls } => {
                let (anchor, polls) = (*anchor, *polls + 1);
                match service.is_localized(anchor) {
                    Ok(true) => AnchorStatus::Reparenting(anchor),
                    Ok(false) if polls >= self.max_localize_polls => {
                        tracing::warn!("Anchor {} not localized after {} polls", anchor, polls);
                        AnchorStatus::Failed(AnchorError::TimedOut { polls })
                    }
                    Ok(false) => AnchorStatus::Localizing { anchor, polls },
                    Err(e) => {
                        tracing::warn!("Failed to localize anchor {}: {}", anchor, e);
                        AnchorStatus::Failed(e)
                    }
                }
            }
            AnchorStatus::Reparenting(anchor) => {
                let anchor = *anchor;
                match service.reparent_mesh(anchor) {
                    Ok(()) => {
                        tracing::info!("Mesh anchored to {}", anchor);
                        AnchorStatus::Anchored(anchor)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to reparent mesh under {}: {}", anchor, e);
                        AnchorStatus::Failed(e)
                    }
                }
            }
            AnchorStatus::Anchored(_) | AnchorStatus::Failed(_) | AnchorStatus::Cancelled => {
                return &self.state;
            }
        };

        self.transition(next)
    }

    fn transition(&mut self, next: AnchorStatus) -> &AnchorStatus {
        self.handle.publish(next.clone());
        self.state = next;
        &self.state
    }
}

/// Anchor-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnchorError {
    #[error("Erase failed: {0}")]
    Erase(String),
    #[error("Create failed: {0}")]
    Create(String),
    #[error("Localization failed: {0}")]
    Localize(String),
    #[error("Not localized after {polls} polls")]
    TimedOut { polls: u32 },
    #[error("Reparent failed: {0}")]
    Reparent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted anchor service
    #[derive(Default)]
    struct FakeService {
        erase_fails: bool,
        create_fails: bool,
        localize_after: u32,
        localize_polls: u32,
        reparented: Option<AnchorId>,
        calls: Vec<&'static str>,
    }

    impl AnchorService for FakeService {
        fn erase_all(&mut self) -> Result<(), AnchorError> {
            self.calls.push("erase");
            if self.erase_fails {
                Err(AnchorError::Erase("storage unavailable".into()))
            } else {
                Ok(())
            }
        }

        fn create_anchor(&mut self, _position: Vec3) -> Result<AnchorId, AnchorError> {
            self.calls.push("create");
            if self.create_fails {
                Err(AnchorError::Create("tracking lost".into()))
            } else {
                Ok(Uuid::new_v4())
            }
        }

        fn is_localized(&mut self, _anchor: AnchorId) -> Result<bool, AnchorError> {
            self.calls.push("localize");
            self.localize_polls += 1;
            Ok(self.localize_polls > self.localize_after)
        }

        fn reparent_mesh(&mut self, anchor: AnchorId) -> Result<(), AnchorError> {
            self.calls.push("reparent");
            self.reparented = Some(anchor);
            Ok(())
        }
    }

    fn run(task: &mut AnchorTask, service: &mut FakeService, max_ticks: usize) {
        for _ in 0..max_ticks {
            if task.poll(service).is_finished() {
                break;
            }
        }
    }

    #[test]
    fn test_happy_path() {
        let mut service = FakeService {
            localize_after: 2,
            ..Default::default()
        };
        let mut task = AnchorTask::new(Vec3::ONE, 10);
        let handle = task.handle();
        run(&mut task, &mut service, 20);

        let AnchorStatus::Anchored(anchor) = handle.status() else {
            panic!("expected anchored, got {:?}", handle.status());
        };
        assert_eq!(service.reparented, Some(anchor));
        assert_eq!(
            service.calls,
            vec!["erase", "create", "localize", "localize", "localize", "reparent"]
        );
    }

    #[test]
    fn test_one_step_per_poll() {
        let mut service = FakeService::default();
        let mut task = AnchorTask::new(Vec3::ZERO, 10);
        assert_eq!(task.poll(&mut service), &AnchorStatus::Creating);
        assert_eq!(service.calls, vec!["erase"]);
        assert!(matches!(task.poll(&mut service), AnchorStatus::Localizing { polls: 0, .. }));
    }

    #[test]
    fn test_erase_failure_is_not_fatal() {
        let mut service = FakeService {
            erase_fails: true,
            ..Default::default()
        };
        let mut task = AnchorTask::new(Vec3::ZERO, 10);
        run(&mut task, &mut service, 20);
        assert!(matches!(task.status(), AnchorStatus::Anchored(_)));
    }

    #[test]
    fn test_create_failure() {
        let mut service = FakeService {
            create_fails: true,
            ..Default::default()
        };
        let mut task = AnchorTask::new(Vec3::ZERO, 10);
        run(&mut task, &mut service, 20);
        assert!(matches!(
            task.status(),
            AnchorStatus::Failed(AnchorError::Create(_))
        ));
    }

    #[test]
    fn test_localize_timeout() {
        let mut service = FakeService {
            localize_after: u32::MAX,
            ..Default::default()
        };
        let mut task = AnchorTask::new(Vec3::ZERO, 3);
        run(&mut task, &mut service, 20);
        assert_eq!(
            task.status(),
            &AnchorStatus::Failed(AnchorError::TimedOut { polls: 3 })
        );
        assert_eq!(service.localize_polls, 3);
    }

    #[test]
    fn test_cancel_stops_polling() {
        let mut service = FakeService {
            localize_after: u32::MAX,
            ..Default::default()
        };
        let mut task = AnchorTask::new(Vec3::ZERO, 100);
        let handle = task.handle();
        task.poll(&mut service);
        task.poll(&mut service);
        handle.cancel();

        assert_eq!(task.poll(&mut service), &AnchorStatus::Cancelled);
        let calls = service.calls.len();
        task.poll(&mut service);
        assert_eq!(service.calls.len(), calls);
        assert!(handle.is_finished());
    }
}
