pub mod analytics;
pub mod auth;
pub mod feedback;
pub mod issues;
pub mod menu;
pub mod metrics;
pub mod sentiment;
pub mod upload;
pub mod wastage;
