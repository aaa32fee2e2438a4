//! Documents generated from a full workspace export.

use crate::common::{big_bank, fixture_path, in_memory_component};
use workspace_search::{
    CommitMode, DocumentType, IndexError, SearchComponent, Workspace, WorkspaceIndexer,
};

#[test]
fn test_fixture_document_counts() {
    let docs = WorkspaceIndexer::default().documents(&big_bank());
    let count = |doc_type| docs.iter().filter(|d| d.doc_type == doc_type).count();

    assert_eq!(count(DocumentType::Workspace), 1);
    assert_eq!(count(DocumentType::Diagram), 3);
    assert_eq!(count(DocumentType::Documentation), 6);
    assert_eq!(count(DocumentType::Decision), 3);
}

#[test]
fn test_fixture_urls() {
    let docs = WorkspaceIndexer::default().documents(&big_bank());
    let urls: Vec<&str> = docs.iter().map(|d| d.url.as_str()).collect();

    assert_eq!(
        urls,
        vec![
            "",
            "/diagrams#SystemLandscape",
            "/diagrams#Containers",
            "/diagrams#LiveDeployment",
            "/documentation#0",
            "/documentation#1",
            "/decisions#ADR%207",
            "/documentation/Internet%20Banking%20System#1",
            "/documentation/Internet%20Banking%20System#2",
            "/decisions/Internet%20Banking%20System#1",
            "/decisions/Internet%20Banking%20System#2",
            "/documentation/Internet%20Banking%20System/API%20Application/Accounts%20Summary%20Controller#0",
            "/documentation/Internet%20Banking%20System/API%20Application/Accounts%20Summary%20Controller#1",
        ]
    );
}

#[test]
fn test_deployment_diagram_covers_whole_subtree() {
    let docs = WorkspaceIndexer::default().documents(&big_bank());
    let deployment = docs
        .iter()
        .find(|d| d.url == "/diagrams#LiveDeployment")
        .unwrap();

    assert_eq!(deployment.name, "Live deployment");
    for expected in [
        "Big Bank plc data center",
        "bigbank-api01",
        "Ubuntu 16.04 LTS",
        "API Application",
        "Java and Spring MVC",
        "Load balancer",
        "F5 BIG-IP",
        "E-mail System",
        "Microsoft Exchange",
    ] {
        assert!(
            deployment.content.contains(expected),
            "deployment content is missing {expected:?}: {}",
            deployment.content
        );
    }
}

#[test]
fn test_landscape_diagram_includes_relationships() {
    let docs = WorkspaceIndexer::default().documents(&big_bank());
    let landscape = &docs[1];

    assert_eq!(landscape.doc_type, DocumentType::Diagram);
    assert!(landscape.content.contains("Sends e-mail using SMTP"));
    assert!(landscape.content.contains("Personal Banking Customer"));
}

#[test]
fn test_search_across_fixture() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&big_bank());

    let exchange = component.search("exchange", "diagram", &[1]).unwrap();
    let keys: Vec<&str> = exchange.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(exchange.len(), 2);
    assert!(keys.contains(&"/diagrams#SystemLandscape"));
    assert!(keys.contains(&"/diagrams#LiveDeployment"));

    let caching = component.search("cached seconds", "", &[1]).unwrap();
    assert_eq!(caching.len(), 1);
    assert_eq!(caching[0].name, "Accounts Summary Controller - Caching");

    let glossary = component.search("savings", "", &[1]).unwrap();
    assert_eq!(glossary.len(), 1);
    assert_eq!(glossary[0].name, "Big Bank plc - Glossary");

    let superseded = component.search("superseded", "decision", &[1]).unwrap();
    assert_eq!(superseded.len(), 1);
    assert_eq!(superseded[0].description, "Superseded");
    assert_eq!(superseded[0].url, "/decisions#ADR%207");
}

#[test]
fn test_same_named_containers_get_distinct_urls() {
    let system = |id: &str, name: &str| {
        serde_json::json!({
            "id": id,
            "name": name,
            "containers": [{
                "id": format!("{id}-db"),
                "name": "Database",
                "documentation": {
                    "sections": [{ "content": "## Schema\nOrders and customers" }],
                    "decisions": [{ "id": "1", "title": "Use PostgreSQL", "status": "Accepted" }]
                }
            }]
        })
    };
    let workspace: Workspace = serde_json::from_value(serde_json::json!({
        "id": 4,
        "name": "Shops",
        "model": { "softwareSystems": [system("1", "Retail"), system("2", "Wholesale")] },
        "views": {}
    }))
    .unwrap();

    let docs = WorkspaceIndexer::default().documents(&workspace);
    let database_urls: Vec<&str> = docs
        .iter()
        .filter(|d| d.name.starts_with("Database"))
        .map(|d| d.url.as_str())
        .collect();

    assert_eq!(
        database_urls,
        vec![
            "/documentation/Retail/Database#1",
            "/decisions/Retail/Database#1",
            "/documentation/Wholesale/Database#1",
            "/decisions/Wholesale/Database#1",
        ]
    );

    let component = in_memory_component(CommitMode::Batch);
    component.index(&workspace);
    let hits = component.search("customers", "", &[4]).unwrap();
    assert_eq!(hits.len(), 2);
    assert_ne!(hits[0].url, hits[1].url);
}

#[test]
fn test_search_result_json_shape() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&big_bank());

    let results = component.search("mortgages", "", &[1]).unwrap();
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json[0]["type"], "documentation");
    assert_eq!(json[0]["workspace_id"], 1);
    assert_eq!(json[0]["name"], "Internet Banking System - Context");
    assert!(json[0].get("content").is_none());
}

#[test]
fn test_loading_missing_or_invalid_files() {
    let missing = Workspace::load(&fixture_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(missing, IndexError::FileRead { .. }));

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "name": "no id" }"#).unwrap();

    let invalid = Workspace::load(&path).unwrap_err();
    assert!(matches!(invalid, IndexError::WorkspaceParse { .. }));
    assert_eq!(invalid.status_code(), "WORKSPACE_PARSE_ERROR");
}
