use crate::error::AppError;
use crate::source::manager;
use crate::source::models::{Playlist, SuccessResponse};

#[tauri::command]
pub async fn get_playlists() -> Result<SuccessResponse<Vec<Playlist>>, AppError> {
    manager::adapter().playlists().await
}

#[tauri::command]
pub async fn get_playlist(id: String) -> Result<SuccessResponse<Playlist>, AppError> {
    manager::adapter().playlist_by_id(&id).await
}

#[tauri::command]
pub async fn create_playlist(name: String) -> Result<SuccessResponse<Playlist>, AppError> {
    manager::adapter().create_playlist(&name).await
}

#[tauri::command]
pub async fn rename_playlist(
    id: String,
    name: String,
) -> Result<SuccessResponse<Playlist>, AppError> {
    manager::adapter().rename_playlist(&id, &name).await
}

#[tauri::command]
pub async fn delete_playlist(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().delete_playlist(&id).await
}

#[tauri::command]
pub async fn add_to_playlist(
    playlist_id: String,
    track_id: String,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter()
        .add_track_to_playlist(&playlist_id, &track_id)
        .await
}

/// Removal is positional; the same track may appear more than once.
#[tauri::command]
pub async fn remove_from_playlist(
    playlist_id: String,
    position: u32,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter()
        .remove_playlist_track(&playlist_id, position)
        .await
}
