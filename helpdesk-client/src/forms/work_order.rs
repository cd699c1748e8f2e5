//! Work-order editor for one submission

use shared::models::{Submission, Technician, TicketStatus, WorkOrder};

use crate::client::SubmissionApi;
use crate::error::ClientResult;

/// Collects changes to a submission's work-order metadata and sends them as
/// one `PATCH`. Only fields that were set are sent.
#[derive(Debug, Clone)]
pub struct WorkOrderEditor {
    submission_id: i64,
    current: WorkOrder,
    patch: WorkOrder,
}

impl WorkOrderEditor {
    pub fn new(submission: &Submission) -> Self {
        Self {
            submission_id: submission.id,
            current: submission.work_order.clone(),
            patch: WorkOrder::default(),
        }
    }

    /// Editor for a submission that was not fetched; only set fields are sent
    pub fn for_id(submission_id: i64) -> Self {
        Self {
            submission_id,
            current: WorkOrder::default(),
            patch: WorkOrder::default(),
        }
    }

    pub fn submission_id(&self) -> i64 {
        self.submission_id
    }

    /// Stored values with pending changes applied
    pub fn effective(&self) -> WorkOrder {
        let mut merged = self.current.clone();
        merged.merge(self.patch.clone());
        merged
    }

    pub fn patch(&self) -> &WorkOrder {
        &self.patch
    }

    pub fn is_dirty(&self) -> bool {
        !self.patch.is_empty()
    }

    pub fn set_tecnico(&mut self, name: impl Into<String>) -> &mut Self {
        self.patch.tecnico = Some(name.into());
        self
    }

    /// Technicians are referenced by name
    pub fn assign(&mut self, technician: &Technician) -> &mut Self {
        self.set_tecnico(technician.name.clone())
    }

    pub fn set_status(&mut self, status: impl Into<TicketStatus>) -> &mut Self {
        self.patch.status = Some(status.into());
        self
    }

    pub fn set_serial(&mut self, serial: impl Into<String>) -> &mut Self {
        self.patch.serial = Some(serial.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.patch.description = Some(description.into());
        self
    }

    pub fn set_tipo_mantenimiento(&mut self, tipo: impl Into<String>) -> &mut Self {
        self.patch.tipo_mantenimiento = Some(tipo.into());
        self
    }

    /// `PATCH /ticket-submissions/{id}`. On success the stored values are
    /// replaced with the server's and pending changes are cleared.
    pub async fn save<C: SubmissionApi>(&mut self, api: &C) -> ClientResult<Submission> {
        let updated = api
            .update_work_order(self.submission_id, &self.patch)
            .await
            .inspect_err(|e| {
                tracing::error!(submission_id = self.submission_id, error = %e, "Failed to update work order");
            })?;
        self.current = updated.work_order.clone();
        self.patch = WorkOrder::default();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission {
            id: 9,
            ticket_template_id: 1,
            submission: Vec::new(),
            created_at: None,
            updated_at: None,
            work_order: WorkOrder {
                tecnico: Some("Luis".into()),
                status: Some(TicketStatus::Abierto),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_pending_changes() {
        let mut editor = WorkOrderEditor::new(&submission());
        assert!(!editor.is_dirty());

        editor.set_status("en_proceso").set_serial("SN-77");
        assert!(editor.is_dirty());
        assert_eq!(editor.patch().tecnico, None);

        let effective = editor.effective();
        assert_eq!(effective.tecnico.as_deref(), Some("Luis"));
        assert_eq!(effective.status, Some(TicketStatus::EnProceso));
        assert_eq!(effective.serial.as_deref(), Some("SN-77"));
    }

    #[test]
    fn test_assign_technician() {
        let mut editor = WorkOrderEditor::new(&submission());
        editor.assign(&Technician {
            id: 2,
            name: "Ana".into(),
            email: "ana@x.co".into(),
            profile_photo_url: None,
            created_at: None,
        });
        assert_eq!(editor.patch().tecnico.as_deref(), Some("Ana"));
    }
}
