//! StudioController - owns the studio state and drives generation.
//!
//! Every submission is tagged with a fresh `GenerationToken`. A completion is
//! applied only while the studio is still `Loading` with that same token, so
//! a reset, a direct load or a newer submission silently wins over a late
//! reply.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::domain::course::CourseData;
use crate::domain::foundation::{DomainError, ErrorCode, GenerationToken, StateMachine};
use crate::domain::studio::{Screen, StudioPhase, StudioState};
use crate::ports::{CourseGenerator, GenerationError};

/// What happened to a submission once its generation call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The result was applied; the studio is now in this phase.
    Applied(StudioPhase),
    /// The studio moved on before the result arrived; it was dropped.
    Discarded,
}

#[derive(Debug, Default)]
struct Inner {
    state: StudioState,
    /// Last token handed out.
    issued: GenerationToken,
}

impl Inner {
    fn transition(&mut self, next: StudioState) {
        let from = self.state.phase();
        match from.transition_to(next.phase()) {
            Ok(to) => {
                debug!(%from, %to, "Studio transition");
                self.state = next;
            }
            Err(e) => {
                let err = DomainError::new(ErrorCode::InvalidStateTransition, e.to_string());
                error!(%from, code = %err.code, error = %err.message, "Rejected studio transition");
            }
        }
    }
}

/// Application state controller for the course studio.
///
/// Shared as `Arc<StudioController>`; all operations take `&self`.
pub struct StudioController {
    generator: Arc<dyn CourseGenerator>,
    inner: RwLock<Inner>,
}

impl StudioController {
    pub fn new(generator: Arc<dyn CourseGenerator>) -> Self {
        Self {
            generator,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Generates a course from an uploaded JSON document.
    ///
    /// The studio is `Loading` from the first poll until the generator
    /// returns. If the returned future is dropped before that, nothing
    /// completes the submission: the studio stays `Loading` until the next
    /// `reset`, `load_course` or submission.
    pub async fn submit_file(&self, content: &str) -> SubmitOutcome {
        let token = self.begin("file").await;
        let result = self.generator.generate_from_structured_input(content).await;
        self.complete(token, result).await
    }

    /// Generates a course from a free-text prompt.
    ///
    /// Dropping the future early has the same effect as for
    /// [`StudioController::submit_file`].
    pub async fn submit_prompt(&self, prompt: &str) -> SubmitOutcome {
        let token = self.begin("prompt").await;
        let result = self.generator.generate_from_prompt(prompt).await;
        self.complete(token, result).await
    }

    /// Shows an existing course, skipping generation.
    pub async fn load_course(&self, course: CourseData) {
        let mut inner = self.inner.write().await;
        if let Some(token) = inner.state.pending_token() {
            debug!(%token, "Direct load supersedes in-flight generation");
        }
        info!(title = %course.title, "Course loaded");
        inner.transition(StudioState::Loaded {
            course: Arc::new(course),
        });
    }

    /// Returns to the creation screen. Safe to call in any state.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        if let Some(token) = inner.state.pending_token() {
            debug!(%token, "Reset abandons in-flight generation");
        }
        inner.transition(StudioState::Idle);
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> StudioState {
        self.inner.read().await.state.clone()
    }

    /// The screen the front end should show now.
    pub async fn screen(&self) -> Screen {
        Screen::from(&self.inner.read().await.state)
    }

    pub async fn phase(&self) -> StudioPhase {
        self.inner.read().await.state.phase()
    }

    /// The loaded course, if any.
    pub async fn course(&self) -> Option<Arc<CourseData>> {
        self.inner.read().await.state.course().cloned()
    }

    async fn begin(&self, source: &'static str) -> GenerationToken {
        let mut inner = self.inner.write().await;
        let token = inner.issued.next();
        inner.issued = token;
        if let Some(previous) = inner.state.pending_token() {
            debug!(%previous, %token, "New submission supersedes in-flight generation");
        }
        info!(%token, source, "Generation started");
        inner.transition(StudioState::Loading { token });
        token
    }

    async fn complete(
        &self,
        token: GenerationToken,
        result: Result<CourseData, GenerationError>,
    ) -> SubmitOutcome {
        let mut inner = self.inner.write().await;

        if inner.state.pending_token() != Some(token) {
            debug!(
                %token,
                phase = %inner.state.phase(),
                succeeded = result.is_ok(),
                "Discarding stale generation result"
            );
            return SubmitOutcome::Discarded;
        }

        let next = match result {
            Ok(course) => {
                info!(%token, title = %course.title, "Generation succeeded");
                StudioState::Loaded {
                    course: Arc::new(course),
                }
            }
            Err(e) => {
                let kind = e.kind();
                let err = DomainError::from(e);
                warn!(%token, ?kind, code = %err.code, error = %err.message, "Generation failed");
                StudioState::failed(err.message)
            }
        };
        inner.transition(next);
        SubmitOutcome::Applied(inner.state.phase())
    }
}
