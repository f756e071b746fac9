//! Domain types for Hetzner Cloud resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cloud server (VM)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Numeric server ID
    pub id: u64,

    /// Server name, unique within the project
    pub name: String,

    /// Provider-side status (e.g., "running", "off", "migrating")
    pub status: String,
}

/// A snapshot image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Numeric image ID
    pub id: u64,

    /// Free-text description, absent for unnamed snapshots
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Server the image is bound to, if any
    pub bound_to: Option<u64>,

    /// Server the image was created from, if still known
    pub created_from: Option<CreatedFrom>,

    /// Image size in GB
    pub image_size: Option<f64>,
}

/// Origin server reference embedded in an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFrom {
    pub id: u64,
    pub name: String,
}

impl Snapshot {
    /// Whether this snapshot is associated with `server`.
    ///
    /// The API has no per-server snapshot listing, so association is
    /// derived: the image is bound to the server, was created from it,
    /// or mentions the server ID or name in its description
    /// (case-insensitive).
    pub fn belongs_to(&self, server: &Server) -> bool {
        if self.bound_to == Some(server.id) {
            return true;
        }
        if self
            .created_from
            .as_ref()
            .is_some_and(|origin| origin.id == server.id)
        {
            return true;
        }
        match &self.description {
            Some(description) => {
                let description = description.to_lowercase();
                description.contains(&server.id.to_string())
                    || description.contains(&server.name.to_lowercase())
            }
            None => false,
        }
    }

    /// Description for display, with a placeholder for unnamed snapshots.
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("(no description)")
    }
}

/// A provider-side asynchronous operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Numeric action ID
    pub id: u64,

    /// Operation name (e.g., "create_image")
    pub command: String,

    /// Current status
    pub status: ActionStatus,

    /// Completion percentage, 0-100
    #[serde(default)]
    pub progress: u8,

    /// Error details, set when the action failed
    pub error: Option<ActionError>,
}

/// Status of an [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Finished successfully
    Success,
    /// Finished with an error
    Error,
    /// Still in progress. The catch-all must be the last variant;
    /// unknown provider-side statuses map here so the poller keeps
    /// polling instead of failing to decode.
    #[serde(other)]
    Running,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Success => write!(f, "success"),
            ActionStatus::Error => write!(f, "error"),
            ActionStatus::Running => write!(f, "running"),
        }
    }
}

/// Error payload of a failed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}
