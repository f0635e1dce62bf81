//! Preference service layer.
//!
//! Repository-agnostic operations on the two stored preferences. Values are
//! JSON-encoded before they reach the repository:
//!
//! | Key                      | Value                         |
//! |--------------------------|-------------------------------|
//! | `handyman-favorites`     | JSON array of tool ids        |
//! | `handyman-selected-tool` | JSON string holding a tool id |
//!
//! Reads are forgiving: a corrupt value or an id that is no longer in the
//! catalog is dropped (and logged) instead of failing the request. Every
//! mutating call has persisted its change by the time it returns.
//!
//! # Usage
//!
//! ```no_run
//! use handyman::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     services::toggle_favorite(&repo, "tax-calculator").await?;
//!     let menu = services::tool_menu(&repo).await?;
//!     assert_eq!(menu[0].id, "favorites");
//!     Ok(())
//! }
//! ```

use log::{debug, warn};

use super::repository::{ErrorContext, PreferenceRepository, RepositoryError, RepositoryResult};
use crate::models::tool::{build_menu, find_tool, MenuSection, Tool};

pub const FAVORITES_KEY: &str = "handyman-favorites";
pub const SELECTED_TOOL_KEY: &str = "handyman-selected-tool";

// ==================== Health ====================

/// Check that the preference store is usable.
pub async fn health_check<R: PreferenceRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

fn known_tool(id: &str, operation: &str) -> RepositoryResult<&'static Tool> {
    find_tool(id).ok_or_else(|| {
        RepositoryError::not_found_with_context(
            format!("Unknown tool '{}'", id),
            ErrorContext::new(operation).with_entity("tool").with_entity_id(id),
        )
    })
}

// ==================== Favorites ====================

/// Load the favourited tool ids in the order they were added.
///
/// A missing value is an empty list. A value that is not a JSON array of
/// strings is treated as empty and logged. Duplicates and ids unknown to
/// the catalog are dropped.
pub async fn load_favorites<R: PreferenceRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<String>> {
    let raw = repo.get(FAVORITES_KEY).await?;
    Ok(parse_favorites(raw.as_deref()))
}

fn parse_favorites(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let stored: Vec<String> = match serde_json::from_str(raw) {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Ignoring corrupt {} value: {}", FAVORITES_KEY, e);
            return Vec::new();
        }
    };

    let mut favorites: Vec<String> = Vec::with_capacity(stored.len());
    for id in stored {
        if find_tool(&id).is_none() {
            debug!("Dropping unknown favourite '{}'", id);
            continue;
        }
        if !favorites.contains(&id) {
            favorites.push(id);
        }
    }
    favorites
}

fn encode_favorites(favorites: &[String]) -> RepositoryResult<String> {
    serde_json::to_string(favorites).map_err(|e| {
        RepositoryError::serialization_with_context(
            e.to_string(),
            ErrorContext::new("save_favorites").with_entity_id(FAVORITES_KEY),
        )
    })
}

/// Whether `tool_id` is currently a favourite.
pub async fn is_favorite<R: PreferenceRepository + ?Sized>(
    repo: &R,
    tool_id: &str,
) -> RepositoryResult<bool> {
    Ok(load_favorites(repo).await?.iter().any(|id| id == tool_id))
}

/// Add `tool_id` to the favourites, or remove it if already present.
///
/// # Returns
/// * `Ok(true)` if the tool is now a favourite
/// * `Ok(false)` if it was removed
/// * `Err(NotFound)` if the id is not in the catalog
pub async fn toggle_favorite<R: PreferenceRepository + ?Sized>(
    repo: &R,
    tool_id: &str,
) -> RepositoryResult<bool> {
    let tool = known_tool(tool_id, "toggle_favorite")?;
    let mut now_favorite = false;

    // Read and write under one store lock so concurrent toggles cannot
    // overwrite each other.
    repo.update(
        FAVORITES_KEY,
        Box::new(|current: Option<&str>| {
            let mut favorites = parse_favorites(current);
            if let Some(pos) = favorites.iter().position(|id| id == tool.id) {
                favorites.remove(pos);
            } else {
                favorites.push(tool.id.to_string());
                now_favorite = true;
            }
            encode_favorites(&favorites).map(Some)
        }),
    )
    .await
    .map_err(|e| e.with_operation("toggle_favorite"))?;

    debug!("Favourite '{}' set to {}", tool.id, now_favorite);
    Ok(now_favorite)
}

// ==================== Selected Tool ====================

/// The last selected tool, if it still exists in the catalog.
pub async fn selected_tool<R: PreferenceRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Option<&'static Tool>> {
    let Some(raw) = repo.get(SELECTED_TOOL_KEY).await? else {
        return Ok(None);
    };
    let id: String = match serde_json::from_str(&raw) {
        Ok(id) => id,
        Err(e) => {
            warn!("Ignoring corrupt {} value: {}", SELECTED_TOOL_KEY, e);
            return Ok(None);
        }
    };
    let tool = find_tool(&id);
    if tool.is_none() {
        debug!("Stored selection '{}' is no longer in the catalog", id);
    }
    Ok(tool)
}

/// Remember `tool_id` as the open tool.
pub async fn select_tool<R: PreferenceRepository + ?Sized>(
    repo: &R,
    tool_id: &str,
) -> RepositoryResult<&'static Tool> {
    let tool = known_tool(tool_id, "select_tool")?;
    let json = serde_json::to_string(tool.id)?;
    repo.set(SELECTED_TOOL_KEY, &json)
        .await
        .map_err(|e| e.with_operation("select_tool"))?;
    Ok(tool)
}

/// Forget the selection (the panel returns to the menu).
pub async fn clear_selected_tool<R: PreferenceRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<()> {
    repo.remove(SELECTED_TOOL_KEY).await.map(|_| ())
}

// ==================== Menu ====================

/// The catalog grouped for display, favourites first.
pub async fn tool_menu<R: PreferenceRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<MenuSection>> {
    let favorites = load_favorites(repo).await?;
    Ok(build_menu(favorites.iter().map(String::as_str)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::tool::TOOLS;

    #[tokio::test]
    async fn favorites_default_to_empty() {
        let repo = LocalRepository::new();
        assert!(load_favorites(&repo).await.unwrap().is_empty());
        assert!(!is_favorite(&repo, "tax-calculator").await.unwrap());
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let repo = LocalRepository::new();
        assert!(toggle_favorite(&repo, "tax-calculator").await.unwrap());
        assert!(toggle_favorite(&repo, "json-formatter").await.unwrap());
        assert_eq!(
            repo.get(FAVORITES_KEY).await.unwrap().as_deref(),
            Some(r#"["tax-calculator","json-formatter"]"#)
        );

        assert!(!toggle_favorite(&repo, "tax-calculator").await.unwrap());
        assert_eq!(
            load_favorites(&repo).await.unwrap(),
            vec!["json-formatter".to_string()]
        );
    }

    #[tokio::test]
    async fn toggle_rejects_unknown_tools() {
        let repo = LocalRepository::new();
        let err = toggle_favorite(&repo, "flux-capacitor").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn corrupt_and_stale_favorites_are_dropped() {
        let repo = LocalRepository::with_values([(FAVORITES_KEY, "{not json")]);
        assert!(load_favorites(&repo).await.unwrap().is_empty());

        repo.set(
            FAVORITES_KEY,
            r#"["retired-tool","tax-calculator","tax-calculator"]"#,
        )
        .await
        .unwrap();
        assert_eq!(
            load_favorites(&repo).await.unwrap(),
            vec!["tax-calculator".to_string()]
        );
    }

    #[tokio::test]
    async fn selection_round_trip() {
        let repo = LocalRepository::new();
        assert!(selected_tool(&repo).await.unwrap().is_none());

        let tool = select_tool(&repo, "sla-deadline-estimator").await.unwrap();
        assert_eq!(tool.id, "sla-deadline-estimator");
        assert_eq!(
            repo.get(SELECTED_TOOL_KEY).await.unwrap().as_deref(),
            Some("\"sla-deadline-estimator\"")
        );
        assert_eq!(
            selected_tool(&repo).await.unwrap().map(|t| t.id),
            Some("sla-deadline-estimator")
        );

        clear_selected_tool(&repo).await.unwrap();
        assert!(selected_tool(&repo).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stale_selection_is_ignored() {
        let repo = LocalRepository::with_values([(SELECTED_TOOL_KEY, "\"retired-tool\"")]);
        assert!(selected_tool(&repo).await.unwrap().is_none());
        assert!(select_tool(&repo, "retired-tool").await.is_err());
    }

    #[tokio::test]
    async fn menu_lists_favorites_first() {
        let repo = LocalRepository::new();
        toggle_favorite(&repo, "json-formatter").await.unwrap();
        let menu = tool_menu(&repo).await.unwrap();
        assert_eq!(menu[0].id, "favorites");
        assert_eq!(menu[0].tools[0].id, "json-formatter");
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!health_check(&repo).await.unwrap());
        let err = select_tool(&repo, "tax-calculator").await.unwrap_err();
        assert_eq!(err.context().operation.as_deref(), Some("select_tool"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_toggles_keep_every_change() {
        let repo = LocalRepository::new();

        for round in 0..50 {
            let expect_favorite = round % 2 == 0;
            let handles: Vec<_> = TOOLS
                .iter()
                .map(|tool| {
                    let repo = repo.clone();
                    tokio::spawn(async move { toggle_favorite(&repo, tool.id).await })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.await.unwrap().unwrap(), expect_favorite);
            }

            let expected_len = if expect_favorite { TOOLS.len() } else { 0 };
            assert_eq!(load_favorites(&repo).await.unwrap().len(), expected_len);
        }
    }
}
