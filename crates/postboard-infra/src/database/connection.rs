use std::time::Duration;

use bson::doc;
use mongodb::error::Error as MongoError;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use super::DatabaseConfig;

/// Process-wide document store connection.
///
/// Built once at startup and handed to the repositories that need it.
/// Call [`DatabaseConnection::shutdown`] once the HTTP server has stopped.
///
/// # Example
/// ```ignore
/// let conn = DatabaseConnection::init(&config).await?;
/// let repo = MongoPostRepository::new(&conn);
/// // ... serve requests ...
/// conn.shutdown().await;
/// ```
#[derive(Clone)]
pub struct DatabaseConnection {
    client: Client,
    database: Database,
    collection: String,
}

impl DatabaseConnection {
    /// Connect and verify the server answers a ping.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, MongoError> {
        tracing::info!("Initializing document store connection...");

        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some("postboard".to_string());
        options.max_pool_size = Some(config.max_connections);
        options.min_pool_size = Some(config.min_connections);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.server_selection_timeout = Some(Duration::from_secs(10));
        options.max_idle_time = Some(Duration::from_secs(300));

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Document store connected (pool: {})",
            config.max_connections
        );

        Ok(Self {
            client,
            database,
            collection: config.collection.clone(),
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Close pooled connections and wait for in-flight operations to finish.
    pub async fn shutdown(self) {
        tracing::info!("Closing document store connection");
        self.client.shutdown().await;
    }
}
