//! Splits free-text documentation into heading-delimited sections.
//!
//! Every `## ` (Markdown) or `== ` (AsciiDoc) line starts a new section.
//! Lines before the first heading form section 0.

use tracing::debug;

use super::Owner;
use super::urls::section_url;
use crate::model::Documentation;
use crate::types::{DocumentType, IndexedDocument, WorkspaceId, join_non_empty};

const MARKDOWN_SECTION_HEADING: &str = "## ";
const ASCIIDOC_SECTION_HEADING: &str = "== ";

/// One heading-delimited block of documentation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationSection {
    pub title: String,
    pub content: String,
    pub number: usize,
}

impl DocumentationSection {
    /// A preamble with no text is not worth indexing. Skipping it does not
    /// shift the numbers of the sections after it.
    fn is_empty_preamble(&self) -> bool {
        self.number == 0 && self.title.is_empty() && self.content.trim().is_empty()
    }
}

/// Join every section of the documentation, each followed by a newline.
pub fn concatenate(documentation: &Documentation) -> String {
    let mut text = String::new();
    for section in &documentation.sections {
        text.push_str(&section.content);
        text.push('\n');
    }
    text
}

fn heading_title(line: &str) -> Option<&str> {
    line.strip_prefix(MARKDOWN_SECTION_HEADING)
        .or_else(|| line.strip_prefix(ASCIIDOC_SECTION_HEADING))
        .map(str::trim)
}

pub fn split_sections(text: &str) -> Vec<DocumentationSection> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    // Trailing blank lines carry nothing and would otherwise leak into the last section
    while lines.last() == Some(&"") {
        lines.pop();
    }

    let mut sections = Vec::new();
    let mut title = String::new();
    let mut content = String::new();
    let mut number = 0;

    for line in lines {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match heading_title(line) {
            Some(heading) => {
                sections.push(DocumentationSection {
                    title: std::mem::replace(&mut title, heading.to_string()),
                    content: std::mem::take(&mut content),
                    number,
                });
                number += 1;
            }
            None => {
                content.push_str(line);
                content.push('\n');
            }
        }
    }

    if !content.is_empty() {
        sections.push(DocumentationSection {
            title,
            content,
            number,
        });
    }

    sections
}

/// One Documentation document per section of the owner's documentation.
pub fn section_documents(
    workspace_id: WorkspaceId,
    owner: &Owner<'_>,
    documentation: &Documentation,
) -> Vec<IndexedDocument> {
    let text = concatenate(documentation);

    split_sections(&text)
        .into_iter()
        .filter(|section| !section.is_empty_preamble())
        .map(|section| {
            let name = if section.title.is_empty() {
                owner.name().to_string()
            } else {
                format!("{} - {}", owner.name(), section.title)
            };
            debug!(workspace_id, section = section.number, %name, "Documentation section");

            IndexedDocument::new(workspace_id, DocumentType::Documentation)
                .with_url(section_url(&owner.path(), section.number))
                .with_name(name)
                .with_content(join_non_empty([
                    section.title.as_str(),
                    section.content.as_str(),
                ]))
        })
        .collect()
}
