use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use thiserror::Error;

mod review_store;
#[cfg(test)]
pub mod memory;

pub use review_store::ReviewStore;

pub const REVIEWS_COLLECTION: &str = "reviews";

const DEFAULT_DATABASE: &str = "dashboard";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("insert did not return an ObjectId")]
    MissingId,
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// `db_override` wins over the database named in the URI path
    pub async fn new(uri: &str, db_override: Option<&str>) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;
        let db_name = resolve_database_name(&client_options, db_override);

        // Pool compartilhado por todos os workers do actix
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the indexes the list query relies on
    async fn ensure_indexes(&self) {
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let reviews = self.collection::<mongodb::bson::Document>(REVIEWS_COLLECTION);

        let created_index = IndexModel::builder()
            .keys(crate::services::review_query::newest_first())
            .build();

        match reviews.create_index(created_index).await {
            Ok(_) => log::info!("   ✅ Index created: reviews(createdAt, _id)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

pub fn resolve_database_name(options: &ClientOptions, db_override: Option<&str>) -> String {
    db_override
        .map(str::to_string)
        .or_else(|| options.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}
