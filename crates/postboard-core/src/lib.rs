//! # Postboard Core
//!
//! The domain layer of the Postboard API.
//! This crate holds the Post record, its validation rules and the storage port,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
