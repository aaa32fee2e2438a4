#![allow(dead_code)]

use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;
use workspace_search::{
    CommitMode, DocumentIndex, QueryEngine, Settings, TantivySearchComponent, Workspace,
    WorkspaceIndexer,
};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn big_bank() -> Workspace {
    Workspace::load(&fixture_path("big-bank.json")).expect("Failed to load fixture workspace")
}

/// Settings with an on-disk index inside `dir`.
pub fn disk_settings(dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.data_dir = dir.path().join(".workspace-search");
    settings.index.writer_heap_bytes = 15_000_000;
    settings
}

/// A component over an isolated on-disk index.
/// This prevents Tantivy lock conflicts when tests run in parallel.
pub fn create_test_component() -> (TantivySearchComponent, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let component = TantivySearchComponent::from_settings(&disk_settings(&temp_dir));
    (component, temp_dir)
}

pub fn in_memory_component(commit_mode: CommitMode) -> TantivySearchComponent {
    TantivySearchComponent::new(
        DocumentIndex::in_memory(),
        WorkspaceIndexer::new(commit_mode),
        QueryEngine::default(),
    )
}

/// Builds small workspace JSON documents for tests.
pub struct WorkspaceBuilder {
    json: Value,
}

impl WorkspaceBuilder {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            json: json!({
                "id": id,
                "name": name,
                "model": { "softwareSystems": [] },
                "views": {},
            }),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.json["description"] = json!(description);
        self
    }

    pub fn documentation(mut self, section: &str) -> Self {
        self.json["documentation"] = json!({ "sections": [ { "content": section } ] });
        self
    }

    pub fn decision(mut self, id: &str, title: &str, status: &str) -> Self {
        if self.json["documentation"].is_null() {
            self.json["documentation"] = json!({ "sections": [] });
        }
        let decisions = &mut self.json["documentation"]["decisions"];
        if decisions.is_null() {
            *decisions = json!([]);
        }
        if let Some(list) = decisions.as_array_mut() {
            list.push(json!({ "id": id, "title": title, "status": status }));
        }
        self
    }

    pub fn software_system(mut self, id: &str, name: &str, description: &str) -> Self {
        if let Some(systems) = self.json["model"]["softwareSystems"].as_array_mut() {
            systems.push(json!({ "id": id, "name": name, "description": description }));
        }
        self
    }

    /// A system context view showing the given element ids
    pub fn context_view(mut self, key: &str, elements: &[&str]) -> Self {
        let elements: Vec<Value> = elements.iter().map(|id| json!({ "id": id })).collect();
        self.json["views"]["systemContextViews"] = json!([
            { "key": key, "name": key, "elements": elements }
        ]);
        self
    }

    pub fn build(self) -> Workspace {
        serde_json::from_value(self.json).expect("Invalid workspace fixture")
    }
}
