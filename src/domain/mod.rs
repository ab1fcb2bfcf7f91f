// Domain layer - Core business models
pub mod analytics;
pub mod chart;
pub mod contact;
pub mod document;
pub mod session;
pub mod view;
