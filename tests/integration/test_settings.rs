//! Settings drive which component is built and where the index lives.

use crate::common::{big_bank, disk_settings};
use tempfile::TempDir;
use workspace_search::storage::IndexMetadata;
use workspace_search::{
    CommitMode, SearchComponent, Settings, TantivySearchComponent, create_search_component,
};

#[test]
fn test_settings_file_selects_commit_mode_and_limit() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &config_path,
        r#"
[index]
in_memory = true
commit_mode = "document"

[search]
max_results = 2
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.index.commit_mode, CommitMode::Document);

    let component = TantivySearchComponent::from_settings(&settings);
    let stats = component.reindex(&big_bank()).unwrap();
    assert_eq!(stats.commits, stats.documents_written + 1);

    // Far more than two fixture documents mention the bank
    assert_eq!(component.search("bank", "", &[1]).unwrap().len(), 2);
}

#[test]
fn test_disabled_search_indexes_nothing() {
    let mut settings = Settings::in_memory();
    settings.search.enabled = false;

    let component = create_search_component(&settings);
    component.start();
    component.index(&big_bank());

    assert!(!component.is_enabled());
    assert!(component.search("bank", "", &[1]).unwrap().is_empty());
    assert!(component.search("bank", "", &[]).is_err());
    component.stop();
}

#[test]
fn test_index_files_live_under_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let settings = disk_settings(&temp_dir);

    let component = create_search_component(&settings);
    component.start();
    component.index(&big_bank());
    component.stop();

    assert!(settings.index_path().join("meta.json").exists());

    let mut metadata = IndexMetadata::load(&settings.data_dir).unwrap();
    metadata.record_indexed(1, "Big Bank plc", 13);
    metadata.save(&settings.data_dir).unwrap();

    let reloaded = IndexMetadata::load(&settings.data_dir).unwrap();
    assert_eq!(reloaded.document_count(), 13);
    assert!(settings.data_dir.join("index.meta").exists());
}
