//! Form builder
//!
//! Composes the ordered field list of a template and persists it.

use shared::models::{
    FieldChanges, FieldDefinition, FieldType, Template, TemplatePayload, TemplatePreview,
    parse_options,
};
use shared::util::new_field_id;

use super::layout::{FieldExtent, insertion_index};
use crate::client::TemplateApi;
use crate::config::form_link;
use crate::error::ClientResult;

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTemplate {
    pub id: i64,
    /// Renderer link, `{form_base_url}/ver-formulario?id={id}`
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBuilder {
    name: String,
    fields: Vec<FieldDefinition>,
}

impl FormBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Seed from a stored template, keeping its field ids
    pub fn from_template(template: &Template) -> Self {
        Self {
            name: template.name.clone(),
            fields: template.fields.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Append an empty field with a fresh id; returns the id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        let field = FieldDefinition::new(new_field_id(), field_type);
        let id = field.id.clone();
        tracing::debug!(id = %id, kind = %field_type, "Field added");
        self.fields.push(field);
        id
    }

    /// Merge partial changes into a field. Unknown ids are ignored and
    /// reported as `false`.
    pub fn update_field(&mut self, id: &str, changes: FieldChanges) -> bool {
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => {
                field.apply(changes);
                true
            }
            None => false,
        }
    }

    /// Set select options from comma separated text
    pub fn set_options_text(&mut self, id: &str, text: &str) -> bool {
        self.update_field(
            id,
            FieldChanges {
                options: Some(parse_options(text)),
                ..Default::default()
            },
        )
    }

    pub fn remove_field(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.fields.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move a field so it lands before the field currently at `target`
    /// (`target == len` moves it to the end).
    ///
    /// Dropping onto the field's own slot or the slot right after it leaves
    /// the order unchanged and returns `false`.
    pub fn move_field(&mut self, id: &str, target: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let target = target.min(self.fields.len());
        if target == from || target == from + 1 {
            return false;
        }
        let field = self.fields.remove(from);
        let to = if target > from { target - 1 } else { target };
        self.fields.insert(to, field);
        tracing::debug!(id, from, to, "Field moved");
        true
    }

    /// Drop a dragged field at a pointer position over the rendered fields.
    ///
    /// `extents[i]` is the extent of `fields()[i]`, `None` when not rendered.
    /// Fields past the end of `extents` count as not rendered; a drop below
    /// every measured field goes to the end of the whole list.
    pub fn reorder_field(
        &mut self,
        id: &str,
        pointer_y: f64,
        extents: &[Option<FieldExtent>],
    ) -> bool {
        let target = insertion_index(extents, pointer_y).unwrap_or(self.fields.len());
        self.move_field(id, target)
    }

    pub fn payload(&self) -> TemplatePayload {
        TemplatePayload {
            name: self.name.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Pretty JSON `{formName, fields}` as shown before saving
    pub fn preview(&self) -> ClientResult<String> {
        let preview = TemplatePreview {
            form_name: &self.name,
            fields: &self.fields,
        };
        Ok(serde_json::to_string_pretty(&preview)?)
    }

    /// `POST /templates`. No validation: an empty name or field list is
    /// sent as-is.
    pub async fn save<C: TemplateApi>(
        &self,
        api: &C,
        form_base_url: &str,
    ) -> ClientResult<SavedTemplate> {
        let template = api.create_template(&self.payload()).await.inspect_err(|e| {
            tracing::error!(name = %self.name, error = %e, "Failed to save template");
        })?;
        Ok(SavedTemplate {
            id: template.id,
            link: form_link(form_base_url, template.id),
        })
    }
}
