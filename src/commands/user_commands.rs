use crate::error::AppError;
use crate::source::contract::PageQuery;
use crate::source::manager;
use crate::source::models::{Album, HistoryEntry, Paged, SuccessResponse, Track, User};

#[tauri::command]
pub async fn add_to_history(
    track_id: String,
    progress: Option<u32>,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter()
        .add_to_history(&track_id, progress.unwrap_or(0))
        .await
}

#[tauri::command]
pub async fn get_track_history(
    query: PageQuery,
) -> Result<SuccessResponse<Paged<HistoryEntry>>, AppError> {
    manager::adapter().track_history(query).await
}

#[tauri::command]
pub async fn get_favorite_tracks(
    query: PageQuery,
) -> Result<SuccessResponse<Paged<Track>>, AppError> {
    manager::adapter().favorite_tracks(query).await
}

#[tauri::command]
pub async fn get_favorite_albums(
    query: PageQuery,
) -> Result<SuccessResponse<Paged<Album>>, AppError> {
    manager::adapter().favorite_albums(query).await
}

#[tauri::command]
pub async fn like_track(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().like_track(&id).await
}

#[tauri::command]
pub async fn unlike_track(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().unlike_track(&id).await
}

#[tauri::command]
pub async fn like_album(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().like_album(&id).await
}

#[tauri::command]
pub async fn unlike_album(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().unlike_album(&id).await
}

#[tauri::command]
pub async fn get_user_list() -> Result<SuccessResponse<Vec<User>>, AppError> {
    manager::adapter().user_list().await
}
