//! Form field model
//!
//! A field is a tagged variant: only `select` fields carry options. The wire
//! shape stays the flat `{id, type, label, defaultValue, options?}` record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field type tag as it appears on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Select,
    Email,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [Self::Text, Self::Number, Self::Select, Self::Email];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "select" => Ok(Self::Select),
            "email" => Ok(Self::Email),
            other => Err(format!(
                "unknown field type '{}', expected one of text, number, select, email",
                other
            )),
        }
    }
}

/// Field kind with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Select { options: Vec<String> },
    Email,
}

/// Input control a renderer should use for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Email,
    Choice,
}

impl FieldKind {
    /// Empty kind for a type tag (`select` starts with no options)
    pub fn empty(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => Self::Text,
            FieldType::Number => Self::Number,
            FieldType::Select => Self::Select {
                options: Vec::new(),
            },
            FieldType::Email => Self::Email,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Number => FieldType::Number,
            Self::Select { .. } => FieldType::Select,
            Self::Email => FieldType::Email,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Select { options } => Some(options),
            _ => None,
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::Text => InputKind::Text,
            Self::Number => InputKind::Number,
            Self::Select { .. } => InputKind::Choice,
            Self::Email => InputKind::Email,
        }
    }
}

/// One field of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct FieldDefinition {
    /// Client-generated id, unique within the template
    pub id: String,
    pub label: String,
    pub default_value: String,
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// New field with empty label and default value
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            default_value: String::new(),
            kind: FieldKind::empty(field_type),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Replace the options; ignored unless the field is a select
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        if let FieldKind::Select { options: o } = &mut self.kind {
            *o = options;
        }
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn options(&self) -> Option<&[String]> {
        self.kind.options()
    }

    /// Switch the field type. Switching to `select` starts with no options,
    /// switching away drops them; keeping the same type changes nothing.
    pub fn set_type(&mut self, field_type: FieldType) {
        if self.field_type() != field_type {
            self.kind = FieldKind::empty(field_type);
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, changes: FieldChanges) {
        if let Some(field_type) = changes.field_type {
            self.set_type(field_type);
        }
        if let Some(label) = changes.label {
            self.label = label;
        }
        if let Some(default_value) = changes.default_value {
            self.default_value = default_value;
        }
        if let Some(options) = changes.options
            && let FieldKind::Select { options: o } = &mut self.kind
        {
            *o = options;
        }
    }
}

/// Partial changes to a field; `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub label: Option<String>,
    pub default_value: Option<String>,
    pub field_type: Option<FieldType>,
    pub options: Option<Vec<String>>,
}

impl FieldChanges {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn default_value(value: impl Into<String>) -> Self {
        Self {
            default_value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Default::default()
        }
    }

    /// Options typed as comma separated text
    pub fn options_text(text: &str) -> Self {
        Self {
            options: Some(parse_options(text)),
            ..Default::default()
        }
    }
}

/// Split comma separated option text, trimming each entry.
///
/// Duplicates and empty entries are kept as typed.
pub fn parse_options(text: &str) -> Vec<String> {
    text.split(',').map(|s| s.trim().to_string()).collect()
}

// ── wire form ──

#[derive(Serialize, Deserialize)]
struct RawField {
    id: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    label: String,
    #[serde(
        rename = "defaultValue",
        default,
        deserialize_with = "crate::util::null_as_empty"
    )]
    default_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
}

impl From<RawField> for FieldDefinition {
    fn from(raw: RawField) -> Self {
        let kind = match raw.field_type {
            FieldType::Select => FieldKind::Select {
                options: raw.options.unwrap_or_default(),
            },
            other => FieldKind::empty(other),
        };
        Self {
            id: raw.id,
            label: raw.label,
            default_value: raw.default_value,
            kind,
        }
    }
}

impl From<FieldDefinition> for RawField {
    fn from(field: FieldDefinition) -> Self {
        let field_type = field.field_type();
        let options = match field.kind {
            FieldKind::Select { options } => Some(options),
            _ => None,
        };
        Self {
            id: field.id,
            field_type,
            label: field.label,
            default_value: field.default_value,
            options,
        }
    }
}
