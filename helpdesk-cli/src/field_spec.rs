//! Field specs on the command line: `type:label[=default][|opt1,opt2]`

use anyhow::{Context, bail};
use shared::models::{FieldChanges, FieldType, parse_options};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub label: String,
    pub default_value: Option<String>,
    pub options: Option<Vec<String>>,
}

impl FieldSpec {
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let (kind, rest) = spec
            .split_once(':')
            .with_context(|| format!("field '{}' must look like type:label", spec))?;
        let field_type: FieldType = kind.parse().map_err(anyhow::Error::msg)?;

        let (rest, options) = match rest.split_once('|') {
            Some((head, opts)) => (head, Some(parse_options(opts))),
            None => (rest, None),
        };
        if options.is_some() && field_type != FieldType::Select {
            bail!("options are only allowed on select fields: '{}'", spec);
        }

        let (label, default_value) = match rest.split_once('=') {
            Some((label, default)) => (label, Some(default.to_string())),
            None => (rest, None),
        };

        Ok(Self {
            field_type,
            label: label.trim().to_string(),
            default_value,
            options,
        })
    }

    pub fn changes(&self) -> FieldChanges {
        FieldChanges {
            label: Some(self.label.clone()),
            default_value: self.default_value.clone(),
            field_type: None,
            options: self.options.clone(),
        }
    }
}

/// `ID=VALUE` pairs
pub fn parse_assignment(arg: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got '{}'", arg))?;
    Ok((key.trim().to_string(), value.to_string()))
}

/// `ID:INDEX` move instructions
pub fn parse_move(arg: &str) -> anyhow::Result<(String, usize)> {
    let (id, index) = arg
        .rsplit_once(':')
        .with_context(|| format!("expected ID:INDEX, got '{}'", arg))?;
    let index = index
        .trim()
        .parse()
        .with_context(|| format!("invalid index in '{}'", arg))?;
    Ok((id.trim().to_string(), index))
}
