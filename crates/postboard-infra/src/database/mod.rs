//! Post storage - MongoDB and in-memory fallback.

mod config;
mod memory;

#[cfg(feature = "mongodb")]
mod connection;
#[cfg(feature = "mongodb")]
mod document;
#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use config::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
pub use connection::DatabaseConnection;
#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoPostRepository;

#[cfg(test)]
mod tests;
