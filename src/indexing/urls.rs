//! Result URLs.
//!
//! A URL is a page path plus an anchor. Paths and anchors are derived from
//! view keys, owner paths, section numbers and decision ids only, so they
//! stay stable across reindexing as long as the model keeps those.

pub const DIAGRAMS_PATH: &str = "/diagrams";
pub const DOCUMENTATION_PATH: &str = "/documentation";
pub const DECISIONS_PATH: &str = "/decisions";

pub fn diagram_url(view_key: &str) -> String {
    format!("{DIAGRAMS_PATH}#{view_key}")
}

/// `owner` holds the element's path of names, and is empty for
/// workspace-level documentation
pub fn section_url(owner: &[&str], section_number: usize) -> String {
    format!("{DOCUMENTATION_PATH}{}#{section_number}", owner_path(owner))
}

pub fn decision_url(owner: &[&str], decision_id: &str) -> String {
    format!(
        "{DECISIONS_PATH}{}#{}",
        owner_path(owner),
        urlencoding::encode(decision_id)
    )
}

fn owner_path(owner: &[&str]) -> String {
    owner
        .iter()
        .map(|name| format!("/{}", urlencoding::encode(name)))
        .collect()
}
