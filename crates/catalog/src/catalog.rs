//! Store-backed catalog access.

use smartlearn_core::{BookId, DomainError, DomainResult, LiveClassId, SubjectId, VideoId};
use smartlearn_store::{Collection, Store};

use crate::content::{Book, Subject, Video};
use crate::live_class::LiveClass;
use crate::seed;

const SUBJECTS: Collection<Vec<Subject>> = Collection::new("subjects");
const VIDEOS: Collection<Vec<Video>> = Collection::new("videos");
const BOOKS: Collection<Vec<Book>> = Collection::new("books");
const LIVE_CLASSES: Collection<Vec<LiveClass>> = Collection::new("live_classes");

/// The content the platform offers, persisted as whole snapshots.
///
/// Static content (subjects, videos, books) is written once at seed time and
/// only ever replaced wholesale. Live classes additionally move through their
/// lifecycle and can be scheduled by staff.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Store,
}

impl Catalog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Write the stock catalog for any collection that is still empty.
    ///
    /// Live classes are bound to real staff accounts, so the caller supplies
    /// them (usually [`seed::stock_live_classes`] with freshly registered
    /// teachers).
    pub fn ensure_seeded(&self, live_classes: Vec<LiveClass>) {
        if self.store.load(SUBJECTS).is_empty() {
            self.store.save(SUBJECTS, &seed::stock_subjects());
        }
        if self.store.load(VIDEOS).is_empty() {
            self.store.save(VIDEOS, &seed::stock_videos());
        }
        if self.store.load(BOOKS).is_empty() {
            self.store.save(BOOKS, &seed::stock_books());
        }
        if self.store.load(LIVE_CLASSES).is_empty() && !live_classes.is_empty() {
            self.store.save(LIVE_CLASSES, &live_classes);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    pub fn subjects(&self) -> Vec<Subject> {
        self.store.load(SUBJECTS)
    }

    pub fn subject(&self, id: &SubjectId) -> Option<Subject> {
        self.subjects().into_iter().find(|s| &s.id == id)
    }

    pub fn videos(&self) -> Vec<Video> {
        self.store.load(VIDEOS)
    }

    pub fn videos_for(&self, subject: &SubjectId) -> Vec<Video> {
        self.videos()
            .into_iter()
            .filter(|v| &v.subject_id == subject)
            .collect()
    }

    pub fn video(&self, id: &VideoId) -> Option<Video> {
        self.videos().into_iter().find(|v| &v.id == id)
    }

    pub fn books(&self) -> Vec<Book> {
        self.store.load(BOOKS)
    }

    pub fn book(&self, id: &BookId) -> Option<Book> {
        self.books().into_iter().find(|b| &b.id == id)
    }

    pub fn live_classes(&self) -> Vec<LiveClass> {
        self.store.load(LIVE_CLASSES)
    }

    pub fn live_class(&self, id: &LiveClassId) -> Option<LiveClass> {
        self.live_classes().into_iter().find(|c| &c.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Live class writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Put a newly scheduled class on offer.
    pub fn add_live_class(&self, class: LiveClass) -> DomainResult<()> {
        let mut classes = self.live_classes();
        if classes.iter().any(|c| c.id == class.id) {
            return Err(DomainError::conflict("a class with this id already exists"));
        }
        classes.push(class);
        self.store.save(LIVE_CLASSES, &classes);
        Ok(())
    }

    /// Apply a lifecycle transition and persist the snapshot.
    pub fn update_live_class(
        &self,
        id: &LiveClassId,
        mutate: impl FnOnce(&mut LiveClass) -> DomainResult<()>,
    ) -> DomainResult<LiveClass> {
        let mut classes = self.live_classes();
        let class = classes
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or(DomainError::NotFound)?;

        mutate(class)?;
        let updated = class.clone();
        self.store.save(LIVE_CLASSES, &classes);

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use smartlearn_core::UserId;
    use smartlearn_store::InMemoryBackend;

    use super::*;
    use crate::live_class::LiveClassStatus;

    fn seeded_catalog() -> Catalog {
        let catalog = Catalog::new(Store::open(InMemoryBackend::new()));
        catalog.ensure_seeded(seed::stock_live_classes(UserId::new(), UserId::new()));
        catalog
    }

    #[test]
    fn stock_catalog_is_loaded() {
        let catalog = seeded_catalog();

        assert_eq!(catalog.subjects().len(), 8);
        assert_eq!(catalog.videos().len(), 4);
        assert_eq!(catalog.books().len(), 4);
        assert_eq!(catalog.live_classes().len(), 2);
    }

    #[test]
    fn seeding_twice_does_not_duplicate() {
        let catalog = seeded_catalog();
        catalog.ensure_seeded(seed::stock_live_classes(UserId::new(), UserId::new()));

        assert_eq!(catalog.subjects().len(), 8);
        assert_eq!(catalog.live_classes().len(), 2);
    }

    #[test]
    fn videos_are_grouped_by_subject() {
        let catalog = seeded_catalog();

        let maths = catalog.videos_for(&"mat".into());
        assert_eq!(maths.len(), 2);
        assert!(maths.iter().all(|v| v.subject_id == "mat".into()));
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        let catalog = seeded_catalog();

        assert!(catalog.video(&"v99".into()).is_none());
        assert!(catalog.subject(&"art".into()).is_none());
        assert!(catalog.live_class(&"l99".into()).is_none());
    }

    #[test]
    fn scheduled_class_can_be_added_and_started() {
        let catalog = seeded_catalog();
        let teacher = UserId::new();

        let class = LiveClass {
            id: "l3".into(),
            teacher_id: teacher,
            teacher_name: "Mr. Juma".to_string(),
            title: "Geography Fieldwork".to_string(),
            description: "Map reading practice.".to_string(),
            scheduled_at: chrono::Utc::now(),
            duration_mins: 30,
            price: seed::LIVE_CLASS_PRICE_MWK,
            status: LiveClassStatus::Scheduled,
        };
        catalog.add_live_class(class).unwrap();

        let updated = catalog
            .update_live_class(&"l3".into(), |c| c.start())
            .unwrap();

        assert_eq!(updated.status, LiveClassStatus::Live);
        assert_eq!(
            catalog.live_class(&"l3".into()).unwrap().status,
            LiveClassStatus::Live
        );
    }

    #[test]
    fn duplicate_class_id_is_a_conflict() {
        let catalog = seeded_catalog();
        let existing = catalog.live_class(&"l1".into()).unwrap();

        let result = catalog.add_live_class(existing);
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }
}
