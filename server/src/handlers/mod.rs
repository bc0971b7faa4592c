pub mod accounts;
pub mod blobs;
pub mod feed;
pub mod grading;
pub mod notifications;
