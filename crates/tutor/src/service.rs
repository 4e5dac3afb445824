use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("tutor backend unavailable: {0}")]
    Unavailable(String),

    #[error("tutor backend failed: {0}")]
    Backend(String),
}

/// The opaque tutoring backend.
///
/// Implementations may call out to a model, a cache, or nothing at all.
/// They must not block on user interaction and must not mutate any
/// platform state.
pub trait TutorService: Send + Sync {
    /// Answer a student question inside a subject context.
    fn ask(&self, question: &str, subject_context: &str) -> Result<String, TutorError>;

    /// Condense a lesson transcript into key bullet points.
    fn summarize(&self, title: &str, transcript: &str) -> Result<Vec<String>, TutorError>;
}

impl<S> TutorService for Arc<S>
where
    S: TutorService + ?Sized,
{
    fn ask(&self, question: &str, subject_context: &str) -> Result<String, TutorError> {
        (**self).ask(question, subject_context)
    }

    fn summarize(&self, title: &str, transcript: &str) -> Result<Vec<String>, TutorError> {
        (**self).summarize(title, transcript)
    }
}
