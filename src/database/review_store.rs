use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;

use super::{MongoDB, StoreError, REVIEWS_COLLECTION};
use crate::models::Review;
use crate::services::review_query::{newest_first, PageWindow, ReviewFilter};

/// Persistence seam for the reviews resource.
///
/// Handlers only see this trait; production wires in `MongoDB`.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn count(&self, filter: &ReviewFilter) -> Result<u64, StoreError>;

    /// Matching reviews, newest first, restricted to `window`
    async fn find_page(&self, filter: &ReviewFilter, window: PageWindow) -> Result<Vec<Review>, StoreError>;

    async fn insert(&self, review: &Review) -> Result<ObjectId, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl ReviewStore for MongoDB {
    async fn count(&self, filter: &ReviewFilter) -> Result<u64, StoreError> {
        let total = self
            .collection::<Review>(REVIEWS_COLLECTION)
            .count_documents(filter.to_document())
            .await?;
        Ok(total)
    }

    async fn find_page(&self, filter: &ReviewFilter, window: PageWindow) -> Result<Vec<Review>, StoreError> {
        let options = FindOptions::builder()
            .sort(newest_first())
            .skip(window.skip())
            .limit(window.limit as i64)
            .build();

        let cursor = self
            .collection::<Review>(REVIEWS_COLLECTION)
            .find(filter.to_document())
            .with_options(options)
            .await?;

        let reviews: Vec<Review> = cursor.try_collect().await?;
        Ok(reviews)
    }

    async fn insert(&self, review: &Review) -> Result<ObjectId, StoreError> {
        let result = self
            .collection::<Review>(REVIEWS_COLLECTION)
            .insert_one(review)
            .await?;

        result.inserted_id.as_object_id().ok_or(StoreError::MissingId)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
