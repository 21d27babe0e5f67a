//! Business logic shared by the HTTP handlers.

pub mod jobs;
