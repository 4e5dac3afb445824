//! Stock catalog the platform launches with.

use chrono::{Duration, Utc};

use smartlearn_core::UserId;

use crate::content::{Book, Subject, SubjectCategory, Video};
use crate::live_class::{LiveClass, LiveClassStatus};

/// Stock one-time admission price for a live class, in MWK.
pub const LIVE_CLASS_PRICE_MWK: u64 = 500;

pub fn stock_subjects() -> Vec<Subject> {
    use SubjectCategory::*;

    let subject = |id: &'static str, name: &str, description: &str, category| Subject {
        id: id.into(),
        name: name.to_string(),
        description: description.to_string(),
        category: Some(category),
    };

    vec![
        subject("chi", "Chichewa", "National language and literature", Languages),
        subject("eng", "English", "Language and grammar mastery", Languages),
        subject("mat", "Mathematics", "Core algebraic and geometric concepts", Sciences),
        subject("bio", "Biology", "Study of living organisms", Sciences),
        subject("phy", "Physical Science", "Physics and chemistry combined", Sciences),
        subject("geo", "Geography", "Earth systems and human impact", Humanities),
        subject("his", "History", "African and world historical events", Humanities),
        subject("soc", "Social Studies", "Community and civic understanding", Humanities),
    ]
}

/// Stock videos. The first is a free taster; the rest sit behind the
/// subscription gate.
pub fn stock_videos() -> Vec<Video> {
    let video = |id: &'static str,
                 subject_id: &'static str,
                 title: &str,
                 description: &str,
                 duration_secs: u32,
                 is_paid: bool| Video {
        id: id.into(),
        subject_id: subject_id.into(),
        title: title.to_string(),
        description: description.to_string(),
        duration_secs,
        is_paid,
    };

    vec![
        video(
            "v1",
            "mat",
            "Quadratic Equations Part 1",
            "Introduction to factoring methods",
            1200,
            false,
        ),
        video(
            "v2",
            "mat",
            "Calculus: Differentiation",
            "Understanding rates of change",
            1500,
            true,
        ),
        video(
            "v3",
            "bio",
            "The Human Heart",
            "Detailed anatomy and physiology",
            1800,
            true,
        ),
        video(
            "v4",
            "eng",
            "Essay Writing Techniques",
            "Crafting the perfect argumentative essay",
            900,
            true,
        ),
    ]
}

pub fn stock_books() -> Vec<Book> {
    let book = |id: &'static str,
                subject_id: &'static str,
                title: &str,
                author: &str,
                grade: &str,
                pages: u32,
                is_paid: bool| Book {
        id: id.into(),
        subject_id: subject_id.into(),
        title: title.to_string(),
        author: author.to_string(),
        grade: grade.to_string(),
        pages,
        is_paid,
    };

    vec![
        book(
            "b1",
            "mat",
            "MSCE Mathematics Revision Guide",
            "E. Kachale",
            "Form 4",
            312,
            true,
        ),
        book(
            "b2",
            "chi",
            "Chichewa Grammar Handbook",
            "L. Nyirenda",
            "Form 3",
            186,
            false,
        ),
        book(
            "b3",
            "bio",
            "Senior Secondary Biology",
            "T. Gondwe",
            "Form 4",
            428,
            true,
        ),
        book(
            "b4",
            "eng",
            "English Comprehension Practice",
            "M. Chirwa",
            "Form 3",
            204,
            true,
        ),
    ]
}

/// Stock live classes, bound to the staff accounts created at seed time.
pub fn stock_live_classes(banda: UserId, phiri: UserId) -> Vec<LiveClass> {
    vec![
        LiveClass {
            id: "l1".into(),
            teacher_id: banda,
            teacher_name: "Mr. Banda".to_string(),
            title: "Mathematics Revision: MSCE Prep".to_string(),
            description: "Intensive session on past paper analysis.".to_string(),
            scheduled_at: Utc::now() + Duration::days(1),
            duration_mins: 60,
            price: LIVE_CLASS_PRICE_MWK,
            status: LiveClassStatus::Scheduled,
        },
        LiveClass {
            id: "l2".into(),
            teacher_id: phiri,
            teacher_name: "Mrs. Phiri".to_string(),
            title: "English Literature: The Concubine".to_string(),
            description: "Deep dive into themes and characterization.".to_string(),
            scheduled_at: Utc::now() + Duration::hours(1),
            duration_mins: 45,
            price: LIVE_CLASS_PRICE_MWK,
            status: LiveClassStatus::Scheduled,
        },
    ]
}
