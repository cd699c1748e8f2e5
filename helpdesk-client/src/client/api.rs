//! Typed API surface.
//!
//! Components are written against these traits so they can be driven by
//! [`HelpdeskClient`] or by an in-memory double in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    Asset, Category, InventoryQuery, InventoryResponse, Submission, SubmissionPayload, Technician,
    Template, TemplatePayload, TemplateSummary, Ticket, TicketReply, TicketResponse, WorkOrder,
};

use crate::error::{ClientError, ClientResult};

use super::common::HelpdeskClient;
use super::http::HttpClient;

/// Template endpoints
#[async_trait]
pub trait TemplateApi: Send + Sync {
    /// `GET /templates`
    async fn list_templates(&self) -> ClientResult<Vec<TemplateSummary>>;
    /// `GET /templates/{id}`
    async fn get_template(&self, id: i64) -> ClientResult<Template>;
    /// `POST /templates`
    async fn create_template(&self, payload: &TemplatePayload) -> ClientResult<Template>;
    /// `PUT /templates/{id}` (whole template)
    async fn update_template(&self, id: i64, payload: &TemplatePayload) -> ClientResult<()>;
}

/// Submission endpoints
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// `GET /submissions/by-template/{id}`
    async fn submissions_by_template(&self, template_id: i64) -> ClientResult<Vec<Submission>>;
    /// `POST /submissions`
    async fn create_submission(&self, payload: &SubmissionPayload) -> ClientResult<Submission>;
    /// `PATCH /ticket-submissions/{id}`
    async fn update_work_order(
        &self,
        submission_id: i64,
        patch: &WorkOrder,
    ) -> ClientResult<Submission>;
}

/// Ticket detail and replies
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// `GET /tickets/{id}`
    async fn ticket(&self, id: i64) -> ClientResult<Ticket>;
    /// `POST /tickets/{id}/responses`. A blank message is refused before
    /// any request is made.
    async fn reply_to_ticket(&self, id: i64, message: &str) -> ClientResult<TicketResponse>;
}

/// Technicians and categories
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `GET /get-tecnicos`, requires a session
    async fn technicians(&self) -> ClientResult<Vec<Technician>>;
    /// `GET /categorias`
    async fn categories(&self) -> ClientResult<Vec<Category>>;
}

/// Inventory service
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `POST {inventory_url}/tabla`, normalized
    async fn assets(&self) -> ClientResult<Vec<Asset>>;
}

/// Decode a list endpoint, reading anything but a JSON array as empty.
fn list_or_empty<T: DeserializeOwned>(endpoint: &str, value: Value) -> ClientResult<Vec<T>> {
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        tracing::warn!(endpoint, "Expected a JSON array, treating as empty");
        Ok(Vec::new())
    }
}

#[async_trait]
impl<H: HttpClient> TemplateApi for HelpdeskClient<H> {
    async fn list_templates(&self) -> ClientResult<Vec<TemplateSummary>> {
        let value: Value = self.http.get("/templates").await?;
        list_or_empty("/templates", value)
    }

    async fn get_template(&self, id: i64) -> ClientResult<Template> {
        let mut template: Template = self.http.get(&format!("/templates/{}", id)).await?;
        if template.id == 0 {
            template.id = id;
        }
        Ok(template)
    }

    async fn create_template(&self, payload: &TemplatePayload) -> ClientResult<Template> {
        let template: Template = self.http.post("/templates", payload).await?;
        tracing::info!(id = template.id, name = %template.name, "Template created");
        Ok(template)
    }

    async fn update_template(&self, id: i64, payload: &TemplatePayload) -> ClientResult<()> {
        let _: Value = self.http.put(&format!("/templates/{}", id), payload).await?;
        tracing::info!(id, fields = payload.fields.len(), "Template updated");
        Ok(())
    }
}

#[async_trait]
impl<H: HttpClient> SubmissionApi for HelpdeskClient<H> {
    async fn submissions_by_template(&self, template_id: i64) -> ClientResult<Vec<Submission>> {
        let value: Value = self
            .http
            .get(&format!("/submissions/by-template/{}", template_id))
            .await?;
        list_or_empty("/submissions/by-template", value)
    }

    async fn create_submission(&self, payload: &SubmissionPayload) -> ClientResult<Submission> {
        let submission: Submission = self.http.post("/submissions", payload).await?;
        tracing::info!(
            id = submission.id,
            template_id = payload.ticket_template_id,
            "Submission sent"
        );
        Ok(submission)
    }

    async fn update_work_order(
        &self,
        submission_id: i64,
        patch: &WorkOrder,
    ) -> ClientResult<Submission> {
        let submission: Submission = self
            .http
            .patch(&format!("/ticket-submissions/{}", submission_id), patch)
            .await?;
        tracing::info!(id = submission_id, "Work order updated");
        Ok(submission)
    }
}

#[async_trait]
impl<H: HttpClient> TicketApi for HelpdeskClient<H> {
    async fn ticket(&self, id: i64) -> ClientResult<Ticket> {
        let mut ticket: Ticket = self.http.get(&format!("/tickets/{}", id)).await?;
        if ticket.id == 0 {
            ticket.id = id;
        }
        Ok(ticket)
    }

    async fn reply_to_ticket(&self, id: i64, message: &str) -> ClientResult<TicketResponse> {
        if message.trim().is_empty() {
            return Err(ClientError::Validation("reply message is empty".into()));
        }
        let reply = TicketReply {
            message: message.to_string(),
        };
        let value: Value = self
            .http
            .post(&format!("/tickets/{}/responses", id), &reply)
            .await?;
        tracing::info!(ticket_id = id, "Ticket reply sent");
        // Some backends answer with an empty or unrelated body
        Ok(serde_json::from_value(value).unwrap_or(TicketResponse {
            id: 0,
            message: reply.message,
            created_at: None,
        }))
    }
}

#[async_trait]
impl<H: HttpClient> DirectoryApi for HelpdeskClient<H> {
    async fn technicians(&self) -> ClientResult<Vec<Technician>> {
        self.require_session()?;
        self.http.get("/get-tecnicos").await
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        let value: Value = self.http.get("/categorias").await?;
        list_or_empty("/categorias", value)
    }
}

#[async_trait]
impl<H: HttpClient> InventoryApi for HelpdeskClient<H> {
    async fn assets(&self) -> ClientResult<Vec<Asset>> {
        let inventory = self
            .inventory
            .as_ref()
            .ok_or_else(|| ClientError::Config("inventory_url is not configured".into()))?;
        let query = InventoryQuery {
            id: self.session.as_ref().and_then(|s| s.user_id()),
            id_sede: None,
        };
        let response: InventoryResponse = inventory.post("/tabla", &query).await?;
        let edit_base = &self.config.asset_edit_url;
        Ok(response
            .activo
            .into_iter()
            .map(|raw| Asset::normalize(raw, edit_base))
            .collect())
    }
}
