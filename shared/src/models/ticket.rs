//! Ticket detail and replies (`GET /tickets/{id}`, `POST /tickets/{id}/responses`)

use super::submission::TicketStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    /// Replies in the order they were posted
    #[serde(default)]
    pub responses: Vec<TicketResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketResponse {
    #[serde(default)]
    pub id: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /tickets/{id}/responses`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReply {
    pub message: String,
}

/// Colour class shown next to a status: green when open, red when closed,
/// yellow for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBadge {
    Open,
    Closed,
    Pending,
}

impl StatusBadge {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Pending => "pending",
        }
    }
}

impl TicketStatus {
    pub fn badge(&self) -> StatusBadge {
        match self {
            Self::Abierto => StatusBadge::Open,
            Self::Cerrado => StatusBadge::Closed,
            Self::EnProceso | Self::Other(_) => StatusBadge::Pending,
        }
    }
}
