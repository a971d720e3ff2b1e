//! Shared test helpers

pub mod database_helper;
pub mod test_data;

pub use database_helper::TestDatabase;
