//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the approval workflow engine and the
//!   business entities its executors mutate
//! - Repository abstractions for data access
//! - Action executor implementations registered at server startup
//! - Database migrations

pub mod entities;
pub mod executors;
pub mod migration;
pub mod repositories;

pub use repositories::{ApprovalRepository, DefinitionRepository, NotificationRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
