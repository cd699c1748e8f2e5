//! Submission viewer: pivots the submissions of one template into a table
//! whose columns are the labels seen across all of them.

use shared::models::{Submission, WorkOrder};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

use crate::client::SubmissionApi;
use crate::error::ClientResult;

/// Trailing fixed column holding the creation timestamp
pub const CREATED_AT_COLUMN: &str = "Fecha de creación";
const CREATED_AT_SUFFIX: &str = "registro";

#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub submission_id: i64,
    /// One cell per label, in column order
    pub cells: Vec<String>,
    pub created_at: String,
    pub work_order: WorkOrder,
}

/// A label that occurs more than once inside one submission.
/// Only the first occurrence is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateLabel {
    pub submission_id: i64,
    pub label: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    /// Distinct labels in first-appearance order
    pub labels: Vec<String>,
    pub rows: Vec<PivotRow>,
    pub duplicates: Vec<DuplicateLabel>,
}

impl PivotTable {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for entry in submissions.iter().flat_map(|s| &s.submission) {
            if !index.contains_key(entry.label.as_str()) {
                index.insert(&entry.label, labels.len());
                labels.push(entry.label.clone());
            }
        }

        let mut duplicates = Vec::new();
        let rows = submissions
            .iter()
            .map(|s| {
                // column -> (first value, occurrences)
                let mut found: Vec<Option<(&str, usize)>> = vec![None; labels.len()];
                for entry in &s.submission {
                    let slot = &mut found[index[entry.label.as_str()]];
                    match slot {
                        Some((_, n)) => *n += 1,
                        None => *slot = Some((&entry.value, 1)),
                    }
                }
                for (col, hit) in found.iter().enumerate() {
                    if let Some((_, occurrences)) = hit
                        && *occurrences > 1
                    {
                        tracing::warn!(
                            submission_id = s.id,
                            label = %labels[col],
                            occurrences,
                            "Duplicate label in submission, showing first value"
                        );
                        duplicates.push(DuplicateLabel {
                            submission_id: s.id,
                            label: labels[col].clone(),
                            occurrences: *occurrences,
                        });
                    }
                }
                PivotRow {
                    submission_id: s.id,
                    cells: found
                        .into_iter()
                        .map(|hit| hit.map(|(v, _)| v.to_string()).unwrap_or_default())
                        .collect(),
                    created_at: s.created_at.clone().unwrap_or_default(),
                    work_order: s.work_order.clone(),
                }
            })
            .collect();

        Self {
            labels,
            rows,
            duplicates,
        }
    }

    /// Header of the trailing timestamp column. When a submitted label
    /// already uses [`CREATED_AT_COLUMN`] the fixed column is renamed so
    /// both stay addressable.
    pub fn created_at_column(&self) -> Cow<'static, str> {
        if self.labels.iter().any(|l| l == CREATED_AT_COLUMN) {
            Cow::Owned(format!("{} ({})", CREATED_AT_COLUMN, CREATED_AT_SUFFIX))
        } else {
            Cow::Borrowed(CREATED_AT_COLUMN)
        }
    }

    /// Labels followed by the creation column
    pub fn columns(&self) -> Vec<String> {
        self.labels
            .iter()
            .cloned()
            .chain(std::iter::once(self.created_at_column().into_owned()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell by row index and column name. Submitted labels take precedence
    /// over the timestamp column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let row = self.rows.get(row)?;
        if let Some(col) = self.labels.iter().position(|l| l == column) {
            return row.cells.get(col).map(String::as_str);
        }
        (column == self.created_at_column()).then_some(row.created_at.as_str())
    }

    /// Plain-text table with columns sized to their content
    pub fn render_text(&self) -> String {
        let columns = self.columns();
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        let lines: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|r| {
                r.cells
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(r.created_at.as_str()))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
        for line in &lines {
            for (w, cell) in widths.iter_mut().zip(line) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        write_line(&mut out, &columns, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        write_line(&mut out, &rule, &widths);
        for line in &lines {
            write_line(&mut out, line, &widths);
        }
        out
    }
}

fn write_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(" | ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        let _ = write!(line, "{}{}", cell, " ".repeat(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Fetches submissions of a template and keeps the derived table.
/// Every `load`/`reload` re-fetches; nothing is cached across loads.
#[derive(Debug, Clone)]
pub struct SubmissionViewer {
    template_id: i64,
    submissions: Vec<Submission>,
    table: PivotTable,
}

impl SubmissionViewer {
    pub async fn load<C: SubmissionApi>(api: &C, template_id: i64) -> ClientResult<Self> {
        let mut viewer = Self {
            template_id,
            submissions: Vec::new(),
            table: PivotTable::default(),
        };
        viewer.reload(api).await?;
        Ok(viewer)
    }

    pub async fn reload<C: SubmissionApi>(&mut self, api: &C) -> ClientResult<()> {
        let submissions = api
            .submissions_by_template(self.template_id)
            .await
            .inspect_err(|e| {
                tracing::error!(template_id = self.template_id, error = %e, "Failed to load submissions");
            })?;
        self.table = PivotTable::from_submissions(&submissions);
        self.submissions = submissions;
        Ok(())
    }

    pub fn template_id(&self) -> i64 {
        self.template_id
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn submission(&self, id: i64) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    pub fn table(&self) -> &PivotTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SubmissionEntry;

    fn submission(id: i64, entries: &[(&str, &str)]) -> Submission {
        Submission {
            id,
            ticket_template_id: 1,
            submission: entries
                .iter()
                .map(|(l, v)| SubmissionEntry::new(*l, *v))
                .collect(),
            created_at: Some(format!("2025-01-0{}T10:00:00Z", id)),
            updated_at: None,
            work_order: WorkOrder::default(),
        }
    }

    #[test]
    fn test_union_of_labels() {
        let subs = vec![
            submission(1, &[("A", "1"), ("B", "2")]),
            submission(2, &[("B", "3"), ("C", "4")]),
        ];
        let table = PivotTable::from_submissions(&subs);
        assert_eq!(table.columns(), ["A", "B", "C", CREATED_AT_COLUMN]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells, ["1", "2", ""]);
        assert_eq!(table.rows[1].cells, ["", "3", "4"]);
        assert_eq!(table.cell(1, CREATED_AT_COLUMN), Some("2025-01-02T10:00:00Z"));
        assert!(table.duplicates.is_empty());
    }

    #[test]
    fn test_duplicate_label_first_wins() {
        let subs = vec![submission(5, &[("A", "first"), ("A", "second")])];
        let table = PivotTable::from_submissions(&subs);
        assert_eq!(table.labels, ["A"]);
        assert_eq!(table.cell(0, "A"), Some("first"));
        assert_eq!(
            table.duplicates,
            vec![DuplicateLabel {
                submission_id: 5,
                label: "A".into(),
                occurrences: 2
            }]
        );
    }

    #[test]
    fn test_label_named_like_created_at_column() {
        let subs = vec![submission(1, &[("Nombre", "Ana"), (CREATED_AT_COLUMN, "ayer")])];
        let table = PivotTable::from_submissions(&subs);
        let columns = table.columns();
        assert_eq!(
            columns,
            ["Nombre", CREATED_AT_COLUMN, "Fecha de creación (registro)"]
        );
        assert_eq!(table.cell(0, CREATED_AT_COLUMN), Some("ayer"));
        assert_eq!(
            table.cell(0, "Fecha de creación (registro)"),
            Some("2025-01-01T10:00:00Z")
        );
    }

    #[test]
    fn test_many_labels_keep_order() {
        let entries: Vec<(String, String)> = (0..200)
            .map(|i| (format!("L{}", i), i.to_string()))
            .collect();
        let mut first = submission(1, &[]);
        first.submission = entries
            .iter()
            .map(|(l, v)| SubmissionEntry::new(l.as_str(), v.as_str()))
            .collect();
        let mut second = submission(2, &[]);
        second.submission = entries
            .iter()
            .rev()
            .map(|(l, v)| SubmissionEntry::new(l.as_str(), v.as_str()))
            .collect();

        let table = PivotTable::from_submissions(&[first, second]);
        assert_eq!(table.labels.len(), 200);
        assert_eq!(table.labels[199], "L199");
        assert_eq!(table.rows[0].cells, table.rows[1].cells);
        assert_eq!(table.cell(1, "L42"), Some("42"));
    }

    #[test]
    fn test_empty() {
        let table = PivotTable::from_submissions(&[]);
        assert!(table.is_empty());
        assert_eq!(table.columns(), [CREATED_AT_COLUMN]);
        assert_eq!(table.cell(0, "A"), None);
    }

    #[test]
    fn test_render_text() {
        let subs = vec![submission(1, &[("Name", "Alice")])];
        let text = PivotTable::from_submissions(&subs).render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name  | Fecha de creación");
        assert_eq!(lines[1], "----- | --------------------");
        assert_eq!(lines[2], "Alice | 2025-01-01T10:00:00Z");
    }
}
