//! LearnUs (Moodle) calendar export fetcher.
//!
//! The export endpoint is authenticated by the `userid`/`authtoken` pair in
//! the query string; there is no session or cookie handling.
//!
//! ```ignore
//! use campusnavi_providers::learnus::{LearnUsClient, LearnUsConfig};
//!
//! let client = LearnUsClient::new(LearnUsConfig::default())?;
//! let body = client.fetch_export(&credential).await?;
//! ```

mod client;
mod config;

pub use client::LearnUsClient;
pub use config::LearnUsConfig;
