//! End-to-end behaviour of the search component over a real index.

use crate::common::{WorkspaceBuilder, big_bank, create_test_component, in_memory_component};
use workspace_search::{
    CommitMode, DocumentType, IndexError, SearchComponent, TantivySearchComponent,
};

fn payments() -> workspace_search::Workspace {
    WorkspaceBuilder::new(1, "Payments")
        .description("Payment processing")
        .build()
}

#[test]
fn test_round_trip_workspace_overview() {
    let component = in_memory_component(CommitMode::Batch);
    component.start();
    component.index(&payments());

    let results = component.search("Payments", "", &[1]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_type, DocumentType::Workspace);
    assert_eq!(results[0].name, "Payments");
    assert_eq!(results[0].description, "Payment processing");
    assert_eq!(results[0].url, "");
    assert_eq!(results[0].workspace_id, 1);
}

#[test]
fn test_workspace_isolation() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&payments());
    component.index(
        &WorkspaceBuilder::new(2, "Payments mirror")
            .description("Payment processing copy")
            .build(),
    );

    let scoped = component.search("payment", "", &[1]).unwrap();
    assert!(!scoped.is_empty());
    assert!(scoped.iter().all(|r| r.workspace_id == 1));

    let both = component.search("payment", "", &[1, 2]).unwrap();
    assert_eq!(both.len(), 2);

    assert!(component.search("payment", "", &[3]).unwrap().is_empty());
}

#[test]
fn test_type_filter_is_exact() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(
        &WorkspaceBuilder::new(4, "Ledger")
            .documentation("## Storage\nLedger entries live in PostgreSQL.")
            .decision("1", "Use PostgreSQL for the ledger", "Accepted")
            .build(),
    );

    let all = component.search("ledger", "", &[4]).unwrap();
    assert_eq!(all.len(), 3);

    let decisions = component.search("ledger", "Decision", &[4]).unwrap();
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].doc_type, DocumentType::Decision);
    assert_eq!(decisions[0].name, "Ledger - 1. Use PostgreSQL for the ledger");
    assert_eq!(decisions[0].description, "Accepted");
    assert_eq!(decisions[0].url, "/decisions#1");

    let sections = component.search("postgresql", "documentation", &[4]).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].name, "Ledger - Storage");
    assert_eq!(sections[0].url, "/documentation#1");
}

#[test]
fn test_decision_status_is_searchable() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(
        &WorkspaceBuilder::new(4, "Ledger")
            .decision("1", "Use PostgreSQL", "Deprecated")
            .build(),
    );

    let results = component.search("deprecated", "decision", &[4]).unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_delete_removes_every_document() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&big_bank());
    component.index(
        &WorkspaceBuilder::new(2, "Online banking")
            .description("Mobile banking")
            .build(),
    );
    assert!(!component.search("banking", "", &[1]).unwrap().is_empty());

    component.delete(1);

    assert!(component.search("banking", "", &[1]).unwrap().is_empty());
    assert!(component.search("kafka", "", &[1]).unwrap().is_empty());
    assert_eq!(component.search("banking", "", &[1, 2]).unwrap().len(), 1);
    assert_eq!(
        component
            .store()
            .open_for_read()
            .unwrap()
            .workspace_document_count(1)
            .unwrap(),
        0
    );
}

#[test]
fn test_reindex_replaces_documents() {
    let component = in_memory_component(CommitMode::Batch);
    let workspace = big_bank();

    let first = component.reindex(&workspace).unwrap();
    let before = component.search("bank", "", &[1]).unwrap().len();
    let second = component.reindex(&workspace).unwrap();
    let after = component.search("bank", "", &[1]).unwrap().len();

    assert_eq!(before, after);
    assert_eq!(first.documents_written, second.documents_written);
    assert_eq!(
        component
            .store()
            .open_for_read()
            .unwrap()
            .workspace_document_count(1)
            .unwrap(),
        second.documents_written
    );
}

#[test]
fn test_reindex_drops_documents_no_longer_generated() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(
        &WorkspaceBuilder::new(5, "Shop")
            .decision("1", "Adopt GraphQL", "Proposed")
            .build(),
    );
    assert_eq!(component.search("graphql", "", &[5]).unwrap().len(), 1);

    component.index(&WorkspaceBuilder::new(5, "Shop").build());
    assert!(component.search("graphql", "", &[5]).unwrap().is_empty());
}

#[test]
fn test_empty_scope_is_rejected() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&payments());

    let err = component.search("x", "", &[]).unwrap_err();
    assert!(matches!(err, IndexError::InvalidArgument { .. }));
    assert_eq!(err.status_code(), "INVALID_ARGUMENT");
}

#[test]
fn test_unknown_type_filter_matches_nothing() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&payments());
    assert!(component.search("payments", "glossary", &[1]).unwrap().is_empty());
}

#[test]
fn test_query_syntax_errors_yield_empty_results() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&payments());
    assert!(component.search("name:payments", "", &[1]).unwrap().is_empty());
}

#[test]
fn test_batch_reindex_is_invisible_to_open_snapshots() {
    let component = in_memory_component(CommitMode::Batch);
    component.index(&payments());

    let before = component.store().open_for_read().unwrap();
    component.index(
        &WorkspaceBuilder::new(1, "Payments")
            .decision("1", "Split settlement", "Accepted")
            .decision("2", "Retry card captures", "Accepted")
            .build(),
    );
    let after = component.store().open_for_read().unwrap();

    assert_eq!(before.workspace_document_count(1).unwrap(), 1);
    assert_eq!(after.workspace_document_count(1).unwrap(), 3);
}

#[test]
fn test_document_commit_mode_produces_same_results() {
    let batch = in_memory_component(CommitMode::Batch);
    let per_document = in_memory_component(CommitMode::Document);

    let batch_stats = batch.reindex(&big_bank()).unwrap();
    let document_stats = per_document.reindex(&big_bank()).unwrap();

    assert_eq!(batch_stats.commits, 1);
    assert_eq!(document_stats.commits, document_stats.documents_written + 1);
    assert_eq!(
        batch.search("mortgages", "", &[1]).unwrap(),
        per_document.search("mortgages", "", &[1]).unwrap()
    );
}

#[test]
fn test_concurrent_searches_during_indexing() {
    let component = std::sync::Arc::new(in_memory_component(CommitMode::Batch));
    component.index(&payments());

    let writer = {
        let component = component.clone();
        std::thread::spawn(move || {
            for _ in 0..5 {
                component.index(&payments());
            }
        })
    };

    for _ in 0..20 {
        let results = component.search("payments", "", &[1]).unwrap();
        assert_eq!(results.len(), 1);
    }
    writer.join().unwrap();
}

#[test]
fn test_on_disk_index_survives_restart() {
    let (component, temp_dir) = create_test_component();
    component.start();
    component.index(&big_bank());
    component.stop();
    drop(component);

    let reopened = TantivySearchComponent::from_settings(&crate::common::disk_settings(&temp_dir));
    reopened.start();
    let results = reopened.search("kafka", "decision", &[1]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].name,
        "Internet Banking System - 2. Use Kafka for notifications"
    );
}

#[test]
fn test_clear_empties_index_and_stays_writable() {
    let (component, _temp_dir) = create_test_component();
    component.index(&big_bank());

    component.clear();
    assert!(component.search("bank", "", &[1]).unwrap().is_empty());

    component.index(&payments());
    assert_eq!(component.search("payments", "", &[1]).unwrap().len(), 1);
}

#[test]
fn test_stop_is_safe_without_writer_and_twice() {
    let (component, _temp_dir) = create_test_component();
    component.stop();
    component.start();
    component.stop();
    component.stop();

    component.index(&payments());
    assert_eq!(component.search("payments", "", &[1]).unwrap().len(), 1);
}
