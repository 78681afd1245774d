//! Core library modules shared by the provider, the store and the CLI.
//!
//! - **Configuration**: authority, palette overrides, backup location
//! - **Data storage**: platform data directory resolution
//! - **Export**: JSON backups with progress reporting
//! - **Messages**: typed user-facing text and output macros
//! - **Task model**: task records and fetch filters
//! - **View**: terminal tables

pub mod config;
pub mod data_storage;
pub mod export;
pub mod messages;
pub mod task;
pub mod view;
