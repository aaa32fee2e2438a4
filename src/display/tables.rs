//! Table formatting utilities for structured output.

use chrono::{DateTime, Utc};
use comfy_table::{
    Attribute, Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};

use crate::indexing::IndexStats;
use crate::storage::IndexMetadata;
use crate::types::{DocumentType, SearchResult};

/// Builder for creating formatted tables.
pub struct TableBuilder {
    table: Table,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// Create a new table builder.
    pub fn new() -> Self {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.apply_modifier(UTF8_ROUND_CORNERS);
        Self { table }
    }

    /// Set the table headers.
    pub fn set_headers(mut self, headers: Vec<&str>) -> Self {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect();
        self.table.set_header(header_cells);
        self
    }

    /// Add a row to the table.
    pub fn add_row(mut self, row: Vec<String>) -> Self {
        self.table.add_row(row);
        self
    }

    /// Build and return the formatted table.
    pub fn build(self) -> String {
        self.table.to_string()
    }
}

/// One row per search hit.
pub fn create_results_table(results: &[SearchResult]) -> String {
    results
        .iter()
        .fold(
            TableBuilder::new().set_headers(vec!["Workspace", "Type", "Name", "Description", "URL"]),
            |table, result| {
                table.add_row(vec![
                    result.workspace_id.to_string(),
                    result.doc_type.to_string(),
                    result.name.clone(),
                    result.description.clone(),
                    result.url.clone(),
                ])
            },
        )
        .build()
}

/// Summary of one or more reindex runs.
pub fn create_summary_table(runs: &[IndexStats]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);

    let mut header = vec![Cell::new("Workspace").add_attribute(Attribute::Bold)];
    header.extend(
        DocumentType::ALL
            .iter()
            .map(|t| Cell::new(t).add_attribute(Attribute::Bold)),
    );
    header.push(Cell::new("Commits").add_attribute(Attribute::Bold));
    header.push(Cell::new("Time").add_attribute(Attribute::Bold));
    table.set_header(header);

    let mut total_documents = 0;
    for stats in runs {
        total_documents += stats.documents_written;

        let mut row = vec![Cell::new(stats.workspace_id)];
        row.extend(DocumentType::ALL.iter().map(|t| Cell::new(stats.count(*t))));
        row.push(Cell::new(stats.commits));
        row.push(Cell::new(format!("{:.2?}", stats.elapsed)));
        table.add_row(row);
    }

    if runs.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL").add_attribute(Attribute::Bold),
            Cell::new(format!("{total_documents} documents"))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
    }

    table.to_string()
}

/// Indexed workspaces as recorded in the index metadata.
pub fn create_status_table(metadata: &IndexMetadata) -> String {
    let table = TableBuilder::new().set_headers(vec!["Workspace", "Name", "Documents", "Indexed"]);

    metadata
        .workspaces
        .iter()
        .fold(table, |table, (id, entry)| {
            table.add_row(vec![
                id.to_string(),
                entry.name.clone(),
                entry.document_count.to_string(),
                format_timestamp(entry.indexed_at),
            ])
        })
        .build()
}

/// Seconds since the epoch as an RFC 3339 UTC string.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
