//! Google Sheets storage adapter
//!
//! Everything that talks to the remote store lives here: service-account
//! authorization, the Sheets/Drive REST client, the record model, and
//! the `RecordStore` contract the rest of the application codes against.

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;
pub mod store;

pub use auth::{AuthManager, ServiceAccountKey, TokenInfo};
pub use client::SheetsClient;
pub use models::{ClientRecord, HEADERS, cols};
pub use store::RecordStore;
