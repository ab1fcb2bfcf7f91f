// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_export;
pub mod file_storage;
pub mod firestore_repository;
pub mod http_response;
pub mod memory_store;
