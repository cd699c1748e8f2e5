//! Template editor: builder seeded from a stored template, saved with PUT.

use std::ops::{Deref, DerefMut};

use super::builder::FormBuilder;
use crate::client::TemplateApi;
use crate::error::ClientResult;

#[derive(Debug, Clone)]
pub struct TemplateEditor {
    template_id: i64,
    builder: FormBuilder,
}

impl TemplateEditor {
    /// `GET /templates/{id}` and seed a builder from it
    pub async fn load<C: TemplateApi>(api: &C, template_id: i64) -> ClientResult<Self> {
        let template = api.get_template(template_id).await.inspect_err(|e| {
            tracing::error!(template_id, error = %e, "Failed to load template for editing");
        })?;
        Ok(Self {
            template_id,
            builder: FormBuilder::from_template(&template),
        })
    }

    pub fn template_id(&self) -> i64 {
        self.template_id
    }

    /// `PUT /templates/{id}` with the whole name and field list
    pub async fn save<C: TemplateApi>(&self, api: &C) -> ClientResult<()> {
        api.update_template(self.template_id, &self.builder.payload())
            .await
            .inspect_err(|e| {
                tracing::error!(template_id = self.template_id, error = %e, "Failed to update template");
            })
    }
}

impl Deref for TemplateEditor {
    type Target = FormBuilder;

    fn deref(&self) -> &FormBuilder {
        &self.builder
    }
}

impl DerefMut for TemplateEditor {
    fn deref_mut(&mut self) -> &mut FormBuilder {
        &mut self.builder
    }
}
