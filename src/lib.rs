pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fixture;
pub mod form;
pub mod quality;
pub mod ranking;
pub mod scoring;
pub mod standings;
pub mod store;
pub mod summary;
