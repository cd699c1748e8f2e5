//! Form submission model and work-order metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// One answered field, a snapshot of the label at submit time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    pub label: String,
    #[serde(default, deserialize_with = "crate::util::null_as_empty")]
    pub value: String,
}

impl SubmissionEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Body of `POST /submissions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub ticket_template_id: i64,
    pub submission: Vec<SubmissionEntry>,
}

/// A stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub ticket_template_id: i64,
    #[serde(default)]
    pub submission: Vec<SubmissionEntry>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub work_order: WorkOrder,
}

/// Ticket status; unknown server values are carried through unchanged
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    Abierto,
    EnProceso,
    Cerrado,
    Other(String),
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Abierto => "abierto",
            Self::EnProceso => "en_proceso",
            Self::Cerrado => "cerrado",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "abierto" => Self::Abierto,
            "en_proceso" => Self::EnProceso,
            "cerrado" => Self::Cerrado,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for TicketStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work-order metadata attached to a submission.
///
/// Also the body of `PATCH /ticket-submissions/{id}`; unset fields are not
/// sent, so a patch only touches what the caller filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tecnico: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_mantenimiento: Option<String>,
}

impl WorkOrder {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the set fields of `patch` onto `self`
    pub fn merge(&mut self, patch: WorkOrder) {
        if patch.tecnico.is_some() {
            self.tecnico = patch.tecnico;
        }
        if patch.status.is_some() {
            self.status = patch.status;
        }
        if patch.serial.is_some() {
            self.serial = patch.serial;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.tipo_mantenimiento.is_some() {
            self.tipo_mantenimiento = patch.tipo_mantenimiento;
        }
    }
}
