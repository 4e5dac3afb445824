//! Static content entries: subjects, videos, books.

use serde::{Deserialize, Serialize};

use smartlearn_core::{BookId, SubjectId, VideoId};
use smartlearn_entitlement::Gated;

/// Broad curriculum grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectCategory {
    Sciences,
    Humanities,
    Languages,
    Vocational,
}

/// A curriculum subject (`mat`, `chi`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub description: String,
    pub category: Option<SubjectCategory>,
}

/// A recorded lesson video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub subject_id: SubjectId,
    pub title: String,
    pub description: String,
    pub duration_secs: u32,
    pub is_paid: bool,
}

/// A textbook in the digital library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub subject_id: SubjectId,
    pub title: String,
    pub author: String,
    pub grade: String,
    pub pages: u32,
    pub is_paid: bool,
}

impl Gated for Video {
    fn is_paid(&self) -> bool {
        self.is_paid
    }
}

impl Gated for Book {
    fn is_paid(&self) -> bool {
        self.is_paid
    }
}
