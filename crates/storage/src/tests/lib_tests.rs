use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn missing_server_address_loads_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let address = storage.load_server_address().await.expect("load");
    assert_eq!(address, None);
}

#[tokio::test]
async fn saves_and_loads_server_address() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .save_server_address("192.168.1.10")
        .await
        .expect("save");

    let address = storage.load_server_address().await.expect("load");
    assert_eq!(address.as_deref(), Some("192.168.1.10"));
}

#[tokio::test]
async fn overwrite_keeps_latest_address() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.save_server_address("10.0.0.1").await.expect("save");
    storage
        .save_server_address("192.168.0.42")
        .await
        .expect("overwrite");

    let address = storage.load_server_address().await.expect("load");
    assert_eq!(address.as_deref(), Some("192.168.0.42"));
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("panel_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("panel.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/panel.db"),
        "sqlite://./data/panel.db"
    );
}

#[test]
fn empty_url_falls_back_to_default() {
    assert_eq!(normalize_database_url("  "), DEFAULT_DATABASE_URL);
}

#[test]
fn passes_through_memory_url() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}

#[test]
fn keeps_windows_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\alice\\panel.db"),
        "sqlite:C:/Users/alice/panel.db"
    );
}

#[tokio::test]
async fn prepared_database_url_creates_openable_sqlite_file() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("panel_storage_open_test_{suffix}"));
    let db_path = temp_root.join("data").join("panel.db");

    let prepared =
        prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    let storage = Storage::new(&prepared).await.expect("open sqlite");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}
