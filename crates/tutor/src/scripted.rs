//! Local backends: a deterministic responder and an always-down stand-in.

use crate::service::{TutorError, TutorService};

/// Deterministic offline responder used by the demo and tests.
///
/// Replies are composed from the inputs, so callers can assert on them
/// without a network or a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedTutor;

impl ScriptedTutor {
    pub fn new() -> Self {
        Self
    }
}

impl TutorService for ScriptedTutor {
    fn ask(&self, question: &str, subject_context: &str) -> Result<String, TutorError> {
        Ok(format!(
            "Let us look at this {subject_context} question together: {question} \
             Start from the definition you already know, then work one step at a time, \
             the way the MSCE papers expect."
        ))
    }

    fn summarize(&self, title: &str, transcript: &str) -> Result<Vec<String>, TutorError> {
        let mut points: Vec<String> = transcript
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(4)
            .map(|s| format!("{s}."))
            .collect();
        if !points.is_empty() {
            points.push(format!("Revise \"{title}\" before the next lesson."));
        }
        Ok(points)
    }
}

/// Backend that is always down. Exercises the facade's fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTutor;

impl TutorService for OfflineTutor {
    fn ask(&self, _question: &str, _subject_context: &str) -> Result<String, TutorError> {
        Err(TutorError::Unavailable("no tutor backend configured".to_string()))
    }

    fn summarize(&self, _title: &str, _transcript: &str) -> Result<Vec<String>, TutorError> {
        Err(TutorError::Unavailable("no tutor backend configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_mention_the_subject() {
        let tutor = ScriptedTutor::new();

        let answer = tutor.ask("What is photosynthesis?", "Biology").unwrap();
        assert!(answer.contains("Biology"));
        assert!(answer.contains("What is photosynthesis?"));
    }

    #[test]
    fn scripted_summary_caps_the_points_and_adds_a_revision_prompt() {
        let tutor = ScriptedTutor::new();
        let transcript = "One. Two. Three. Four. Five. Six.";

        let points = tutor.summarize("Counting", transcript).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], "One.");
        assert!(points[4].contains("Counting"));
    }

    #[test]
    fn empty_transcript_yields_no_points() {
        let tutor = ScriptedTutor::new();
        assert!(tutor.summarize("Anything", "   ").unwrap().is_empty());
    }
}
