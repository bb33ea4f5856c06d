//! In-memory `ReviewStore` for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{ReviewStore, StoreError};
use crate::models::Review;
use crate::services::review_query::{PageWindow, ReviewFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Healthy,
    /// Every call fails like a lost connection
    Down,
    /// Inserts succeed without reporting an id
    NoInsertedId,
}

pub struct MemoryStore {
    reviews: Mutex<Vec<Review>>,
    mode: Mode,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_mode(Mode::Healthy)
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self {
            reviews: Mutex::new(Vec::new()),
            mode,
        }
    }

    pub fn seed(&self, mut review: Review) -> ObjectId {
        let id = ObjectId::new();
        review.id = Some(id);
        self.reviews.lock().unwrap().push(review);
        id
    }

    pub fn all(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.mode == Mode::Down {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
            return Err(StoreError::Database(mongodb::error::Error::from(io)));
        }
        Ok(())
    }
}

/// Same semantics as `ReviewFilter::to_document` evaluated by MongoDB
fn matches(filter: &ReviewFilter, review: &Review) -> bool {
    if let Some(status) = filter.status {
        if review.status != Some(status) {
            return false;
        }
    }

    if let Some(term) = &filter.search {
        let needle = term.to_lowercase();
        let fields = [
            review.name.as_str(),
            review.email.as_str(),
            review.subject.as_str(),
            review.message.as_str(),
            review.user_type.as_str(),
            review.rank_and_position.as_str(),
        ];
        if !fields.iter().any(|field| field.to_lowercase().contains(&needle)) {
            return false;
        }
    }

    true
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn count(&self, filter: &ReviewFilter) -> Result<u64, StoreError> {
        self.check()?;
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews.iter().filter(|r| matches(filter, r)).count() as u64)
    }

    async fn find_page(&self, filter: &ReviewFilter, window: PageWindow) -> Result<Vec<Review>, StoreError> {
        self.check()?;
        let mut found: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches(filter, r))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(found
            .into_iter()
            .skip(window.skip() as usize)
            .take(window.limit as usize)
            .collect())
    }

    async fn insert(&self, review: &Review) -> Result<ObjectId, StoreError> {
        self.check()?;
        let id = self.seed(review.clone());
        if self.mode == Mode::NoInsertedId {
            return Err(StoreError::MissingId);
        }
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
