//! Form template model

use super::field::FieldDefinition;
use serde::{Deserialize, Serialize};

/// A stored form template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Server-assigned id. Some backends omit it from `GET /templates/{id}`;
    /// the client fills it in from the request path.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    /// Ordered fields; order is rendering order and pivot column order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Template {
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Label of a field, or the id itself when the field is unknown
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.field(id).map(|f| f.label.as_str()).unwrap_or(id)
    }
}

/// Entry of `GET /templates`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&Template> for TemplateSummary {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            created_at: t.created_at.clone(),
        }
    }
}

/// Body of `POST /templates` and `PUT /templates/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePayload {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

/// Pre-save preview shape `{formName, fields}`
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePreview<'a> {
    #[serde(rename = "formName")]
    pub form_name: &'a str,
    pub fields: &'a [FieldDefinition],
}
