//! Form renderer
//!
//! Loads a template, collects one string value per field and submits them
//! as a `{label, value}` snapshot.

use shared::models::{
    FieldKind, Submission, SubmissionEntry, SubmissionPayload, Template,
};

use crate::client::{SubmissionApi, TemplateApi};
use crate::error::{ClientError, ClientResult};

/// Load lifecycle. `Loading` only lasts for the duration of `load`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready(Template),
    Failed(String),
}

/// Non-blocking hint about a value; never prevents submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    NotAnOption { field_id: String, value: String },
    NotANumber { field_id: String, value: String },
    NotAnEmail { field_id: String, value: String },
}

#[derive(Debug, Clone)]
pub struct FormRenderer {
    state: LoadState,
    /// (field id, value) in template order, then unknown ids as set
    values: Vec<(String, String)>,
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRenderer {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            values: Vec::new(),
        }
    }

    /// Renderer over an already fetched template
    pub fn from_template(template: Template) -> Self {
        let mut renderer = Self::new();
        renderer.seed(template);
        renderer
    }

    fn seed(&mut self, template: Template) {
        self.values = template
            .fields
            .iter()
            .map(|f| (f.id.clone(), f.default_value.clone()))
            .collect();
        self.state = LoadState::Ready(template);
    }

    /// Fetch the template and seed values from field defaults.
    pub async fn load<C: TemplateApi>(&mut self, api: &C, template_id: i64) -> ClientResult<()> {
        self.state = LoadState::Loading;
        match api.get_template(template_id).await {
            Ok(template) => {
                tracing::debug!(template_id, fields = template.fields.len(), "Form loaded");
                self.seed(template);
                Ok(())
            }
            Err(e) => {
                tracing::error!(template_id, error = %e, "Failed to load form");
                self.values.clear();
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn template(&self) -> Option<&Template> {
        match &self.state {
            LoadState::Ready(t) => Some(t),
            _ => None,
        }
    }

    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, v)| v.as_str())
    }

    /// Store a value. Unknown ids are kept and submitted under the raw id.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(id, _)| id == field_id) {
            Some((_, v)) => *v = value,
            None => self.values.push((field_id.to_string(), value)),
        }
    }

    /// Submission entries labelled by the template; unknown ids keep their id.
    pub fn entries(&self) -> Vec<SubmissionEntry> {
        let template = self.template();
        self.values
            .iter()
            .map(|(id, value)| {
                let label = template.map(|t| t.label_for(id)).unwrap_or(id.as_str());
                SubmissionEntry::new(label, value.clone())
            })
            .collect()
    }

    /// Advisory checks for select, number and email fields
    pub fn advisories(&self) -> Vec<Advisory> {
        let Some(template) = self.template() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for field in &template.fields {
            let Some(value) = self.value(&field.id).filter(|v| !v.is_empty()) else {
                continue;
            };
            let field_id = field.id.clone();
            let value = value.to_string();
            match &field.kind {
                FieldKind::Select { options } if !options.contains(&value) => {
                    out.push(Advisory::NotAnOption { field_id, value })
                }
                FieldKind::Number if value.trim().parse::<f64>().is_err() => {
                    out.push(Advisory::NotANumber { field_id, value })
                }
                FieldKind::Email if !looks_like_email(&value) => {
                    out.push(Advisory::NotAnEmail { field_id, value })
                }
                _ => {}
            }
        }
        out
    }

    /// `POST /submissions`. Values reset to empty on success and are kept
    /// for a retry on failure.
    pub async fn submit<C: SubmissionApi>(&mut self, api: &C) -> ClientResult<Submission> {
        let template_id = self
            .template()
            .map(|t| t.id)
            .ok_or_else(|| ClientError::InvalidState("no form loaded".into()))?;
        let payload = SubmissionPayload {
            ticket_template_id: template_id,
            submission: self.entries(),
        };
        match api.create_submission(&payload).await {
            Ok(submission) => {
                for (_, v) in &mut self.values {
                    v.clear();
                }
                Ok(submission)
            }
            Err(e) => {
                tracing::error!(template_id, error = %e, "Failed to submit form");
                Err(e)
            }
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{FieldDefinition, FieldType};

    fn intake() -> Template {
        Template {
            id: 1,
            name: "Intake".into(),
            fields: vec![
                FieldDefinition::new("f1", FieldType::Text).with_label("Name"),
                FieldDefinition::new("f2", FieldType::Select)
                    .with_label("Priority")
                    .with_default("Media")
                    .with_options(vec!["Alta".into(), "Media".into()]),
                FieldDefinition::new("f3", FieldType::Email).with_label("Email"),
            ],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_seeded_from_defaults() {
        let r = FormRenderer::from_template(intake());
        let entries = r.entries();
        assert_eq!(
            entries,
            vec![
                SubmissionEntry::new("Name", ""),
                SubmissionEntry::new("Priority", "Media"),
                SubmissionEntry::new("Email", ""),
            ]
        );
    }

    #[test]
    fn test_unknown_id_uses_raw_id() {
        let mut r = FormRenderer::from_template(intake());
        r.set_value("f1", "Alice");
        r.set_value("ghost", "boo");
        let entries = r.entries();
        assert_eq!(entries[0], SubmissionEntry::new("Name", "Alice"));
        assert_eq!(entries.last().unwrap(), &SubmissionEntry::new("ghost", "boo"));
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_advisories() {
        let mut r = FormRenderer::from_template(intake());
        r.set_value("f2", "Baja");
        r.set_value("f3", "not-an-email");
        let adv = r.advisories();
        assert_eq!(adv.len(), 2);
        assert!(matches!(&adv[0], Advisory::NotAnOption { value, .. } if value == "Baja"));
        assert!(matches!(&adv[1], Advisory::NotAnEmail { .. }));

        r.set_value("f3", "ana@x.co");
        r.set_value("f2", "Alta");
        assert!(r.advisories().is_empty());
    }

    #[test]
    fn test_idle_renderer() {
        let r = FormRenderer::new();
        assert_eq!(r.state(), &LoadState::Idle);
        assert!(r.template().is_none());
        assert!(r.advisories().is_empty());
    }
}
