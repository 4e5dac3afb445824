//! The never-failing facade callers actually talk to.

use std::sync::Arc;

use tracing::warn;

use crate::service::TutorService;

pub const TUTOR_RESTING: &str = "The AI Tutor is resting. Please try again later.";
pub const NO_ANSWER: &str = "I'm sorry, I couldn't generate an answer.";
pub const SUMMARY_UNAVAILABLE: &str = "Summary could not be generated at this time.";

/// Wraps a [`TutorService`] and absorbs its failures.
///
/// A backend error is logged and replaced with a static fallback; the
/// student always gets a sentence back, never an error.
#[derive(Clone)]
pub struct Tutor {
    service: Arc<dyn TutorService>,
}

impl Tutor {
    pub fn new(service: impl TutorService + 'static) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn ask(&self, question: &str, subject_context: &str) -> String {
        match self.service.ask(question, subject_context) {
            Ok(answer) if answer.trim().is_empty() => NO_ANSWER.to_string(),
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "tutor backend failed to answer");
                TUTOR_RESTING.to_string()
            }
        }
    }

    pub fn summarize_lesson(&self, title: &str, transcript: &str) -> Vec<String> {
        match self.service.summarize(title, transcript) {
            Ok(points) if points.is_empty() => vec![SUMMARY_UNAVAILABLE.to_string()],
            Ok(points) => points,
            Err(error) => {
                warn!(%error, "tutor backend failed to summarize");
                vec![SUMMARY_UNAVAILABLE.to_string()]
            }
        }
    }
}

impl core::fmt::Debug for Tutor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tutor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::TutorError;

    struct CannedTutor {
        answer: &'static str,
    }

    impl TutorService for CannedTutor {
        fn ask(&self, _question: &str, _subject_context: &str) -> Result<String, TutorError> {
            Ok(self.answer.to_string())
        }

        fn summarize(&self, _title: &str, _transcript: &str) -> Result<Vec<String>, TutorError> {
            Ok(vec![self.answer.to_string()])
        }
    }

    struct BrokenTutor;

    impl TutorService for BrokenTutor {
        fn ask(&self, _question: &str, _subject_context: &str) -> Result<String, TutorError> {
            Err(TutorError::Unavailable("connection refused".to_string()))
        }

        fn summarize(&self, _title: &str, _transcript: &str) -> Result<Vec<String>, TutorError> {
            Err(TutorError::Backend("model overloaded".to_string()))
        }
    }

    #[test]
    fn a_working_backend_answers_verbatim() {
        let tutor = Tutor::new(CannedTutor {
            answer: "Factor the quadratic first.",
        });

        let answer = tutor.ask("How do I solve x^2 - 4 = 0?", "Mathematics");
        assert_eq!(answer, "Factor the quadratic first.");
    }

    #[test]
    fn a_blank_answer_becomes_the_no_answer_fallback() {
        let tutor = Tutor::new(CannedTutor { answer: "   " });

        assert_eq!(tutor.ask("Anything?", "Biology"), NO_ANSWER);
    }

    #[test]
    fn a_failing_backend_never_surfaces_an_error() {
        let tutor = Tutor::new(BrokenTutor);

        assert_eq!(tutor.ask("Anything?", "Biology"), TUTOR_RESTING);
        assert_eq!(
            tutor.summarize_lesson("The Human Heart", "chambers and valves"),
            vec![SUMMARY_UNAVAILABLE.to_string()]
        );
    }

    #[test]
    fn an_empty_summary_becomes_the_fallback_point() {
        struct Silent;

        impl TutorService for Silent {
            fn ask(&self, _q: &str, _c: &str) -> Result<String, TutorError> {
                Ok(String::new())
            }

            fn summarize(&self, _t: &str, _tr: &str) -> Result<Vec<String>, TutorError> {
                Ok(Vec::new())
            }
        }

        let tutor = Tutor::new(Silent);
        assert_eq!(
            tutor.summarize_lesson("Essay Writing", ""),
            vec![SUMMARY_UNAVAILABLE.to_string()]
        );
    }
}
