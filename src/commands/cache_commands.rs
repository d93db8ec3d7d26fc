use crate::cache::cache_key;
use crate::config::SourceKind;
use crate::error::AppError;
use crate::resolver::{resolve_track_uri, ResolveOptions};
use crate::source::manager;
use crate::source::models::Track;
use crate::AppState;
use tauri::State;

#[tauri::command]
pub async fn check_cache(
    state: State<'_, AppState>,
    track_id: String,
    original_path: String,
) -> Result<Option<String>, AppError> {
    let key = cache_key(manager::active_kind(), &track_id);
    Ok(state.cache.check(&key, &original_path))
}

#[tauri::command]
pub async fn download_track(
    state: State<'_, AppState>,
    track_id: String,
    url: String,
    token: Option<String>,
) -> Result<Option<String>, AppError> {
    let key = cache_key(manager::active_kind(), &track_id);
    Ok(state.cache.download(&key, &url, token).await)
}

#[tauri::command]
pub async fn get_cache_size(state: State<'_, AppState>) -> Result<u64, AppError> {
    Ok(state.cache.size())
}

#[tauri::command]
pub async fn clear_cache(state: State<'_, AppState>) -> Result<bool, AppError> {
    state.cache.clear()?;
    Ok(true)
}

/// Resolve a track to a playable URI. A cache miss answers with the remote
/// URI immediately; the background fill is detached at this boundary.
#[tauri::command]
pub async fn resolve_track(
    state: State<'_, AppState>,
    track: Track,
) -> Result<String, AppError> {
    let (options, kind) = {
        let config = state.config.read().await;
        let kind = manager::active_kind();
        let base_url = match kind {
            SourceKind::Native => config.native_base_url.clone(),
            SourceKind::Subsonic => config.subsonic_base_url.clone(),
        };
        (
            ResolveOptions {
                cache_enabled: config.cache_enabled,
                base_url,
                token: config.native_token.clone(),
            },
            kind,
        )
    };

    let resolved = resolve_track_uri(&state.cache, kind, &track, &options);
    Ok(resolved.uri)
}
