//! Preference services against the JSON file store.

use std::fs;
use std::sync::Arc;

use handyman::db::repositories::FileRepository;
use handyman::db::{services, PreferenceRepository, FAVORITES_KEY, SELECTED_TOOL_KEY};
use handyman::models::TOOLS;
use tempfile::TempDir;

#[tokio::test]
async fn test_preferences_persist_across_restarts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let repo = FileRepository::open(&path).unwrap();
        services::toggle_favorite(&repo, "currency-converter")
            .await
            .unwrap();
        services::toggle_favorite(&repo, "base64-tool").await.unwrap();
        services::select_tool(&repo, "eta-calculator").await.unwrap();
    }

    let repo = FileRepository::open(&path).unwrap();
    assert_eq!(
        services::load_favorites(&repo).await.unwrap(),
        vec!["currency-converter".to_string(), "base64-tool".to_string()]
    );
    assert_eq!(
        services::selected_tool(&repo).await.unwrap().map(|t| t.id),
        Some("eta-calculator")
    );
}

#[tokio::test]
async fn test_file_layout_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    let repo = FileRepository::open(&path).unwrap();
    services::toggle_favorite(&repo, "json-formatter")
        .await
        .unwrap();
    services::select_tool(&repo, "json-formatter").await.unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk[FAVORITES_KEY], "[\"json-formatter\"]");
    assert_eq!(on_disk[SELECTED_TOOL_KEY], "\"json-formatter\"");
}

#[tokio::test]
async fn test_hand_edited_corrupt_value_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(
        &path,
        r#"{"handyman-favorites": "tax-calculator", "handyman-selected-tool": "42"}"#,
    )
    .unwrap();

    let repo = FileRepository::open(&path).unwrap();
    assert!(services::load_favorites(&repo).await.unwrap().is_empty());
    assert!(services::selected_tool(&repo).await.unwrap().is_none());

    // The next toggle overwrites the bad value with a well-formed one.
    assert!(services::toggle_favorite(&repo, "tax-calculator")
        .await
        .unwrap());
    assert_eq!(
        repo.get(FAVORITES_KEY).await.unwrap().as_deref(),
        Some("[\"tax-calculator\"]")
    );
}

#[tokio::test]
async fn test_concurrent_toggles_through_shared_handle() {
    let dir = TempDir::new().unwrap();
    let repo: Arc<dyn PreferenceRepository> =
        Arc::new(FileRepository::open(dir.path().join("prefs.json")).unwrap());

    let ids = ["length-converter", "weight-converter", "volume-converter"];
    let mut handles = Vec::new();
    for id in ids {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            services::is_favorite(repo.as_ref(), id).await.unwrap()
        }));
    }
    for handle in handles {
        assert!(!handle.await.unwrap());
    }

    for id in ids {
        services::toggle_favorite(repo.as_ref(), id).await.unwrap();
    }
    let menu = services::tool_menu(repo.as_ref()).await.unwrap();
    let favorites: Vec<&str> = menu[0].tools.iter().map(|t| t.id).collect();
    assert_eq!(favorites, ids.to_vec());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallel_toggles_all_reach_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    let repo: Arc<dyn PreferenceRepository> = Arc::new(FileRepository::open(&path).unwrap());

    let handles: Vec<_> = TOOLS
        .iter()
        .map(|tool| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { services::toggle_favorite(repo.as_ref(), tool.id).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let reopened = FileRepository::open(&path).unwrap();
    let mut favorites = services::load_favorites(&reopened).await.unwrap();
    favorites.sort();
    let mut expected: Vec<String> = TOOLS.iter().map(|t| t.id.to_string()).collect();
    expected.sort();
    assert_eq!(favorites, expected);
}
