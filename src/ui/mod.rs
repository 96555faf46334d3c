pub mod app;
pub mod chat;
pub mod listings;
pub mod media;
