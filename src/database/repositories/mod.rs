//! Database repositories module
//!
//! This module contains the record stores backing each resource table and the
//! generic repository that combines a record store with image cleanup.

pub mod memory;
pub mod postgres;
pub mod resource;
pub mod store;

// Re-export repositories
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use resource::ResourceRepository;
pub use store::RecordStore;
