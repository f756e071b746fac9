//! Hetzner Cloud API client for snapflow
//!
//! This crate covers the small slice of the Hetzner Cloud API that
//! snapshot management needs: listing servers, listing and deleting
//! snapshot images, requesting new snapshots, and polling the actions
//! those requests return.
//!
//! # Requirements
//!
//! - A Hetzner Cloud API token with read/write access to the project
//!
//! # Example
//!
//! ```ignore
//! use snapflow_hcloud::{HcloudClient, PollConfig, wait_for_action};
//!
//! let client = HcloudClient::new(token);
//!
//! let servers = client.list_servers().await?;
//! let action = client.create_snapshot(servers[0].id, "weekly").await?;
//!
//! // Block until the snapshot is ready (or the budget runs out).
//! let outcome = wait_for_action(&client, action.id, PollConfig::default(), |a| {
//!     println!("{}%", a.progress);
//! })
//! .await?;
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod poller;

pub use client::{DEFAULT_ENDPOINT, HcloudClient};
pub use error::{HcloudError, Result};
pub use model::{Action, ActionError, ActionStatus, CreatedFrom, Server, Snapshot};
pub use poller::{ActionSource, PollConfig, PollOutcome, wait_for_action};
