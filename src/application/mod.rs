// Application layer - use cases over the document store and local storage
pub mod chart_manager;
pub mod chart_panels;
pub mod contact_service;
pub mod credential_verifier;
pub mod document_store;
pub mod load_tickets;
pub mod session_store;
pub mod summary_loader;
pub mod view_router;
