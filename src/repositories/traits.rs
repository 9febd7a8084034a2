//! Common repository traits
//!
//! Generic interfaces for database operations. Every method returns the raw
//! `sqlx::Error`; the engine decides what a missing row means for the caller.

/// Inserts a new row and returns it with the id and defaults assigned by the database.
pub trait Create<Entity, CreateDTO> {
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Reads a single row by primary key.
///
/// Soft-deleted rows are reported as `Ok(None)` unless the repository
/// documents otherwise.
pub trait Read<Entity, Id> {
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Partial update: only `Some(_)` fields of the DTO are written.
///
/// # Returns
/// * `Ok(Entity)` - Updated entity
/// * `Err(sqlx::Error::RowNotFound)` - no active row with that id
pub trait Update<Entity, UpdateDTO, Id> {
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, sqlx::Error>;
}

/// Soft delete: sets `deleted_at` and keeps the row as history.
///
/// Deleting an already deleted row succeeds without touching the first
/// timestamp; an unknown id fails with `sqlx::Error::RowNotFound`.
pub trait Delete<Id> {
    async fn delete(&self, id: &Id) -> Result<(), sqlx::Error>;
}
