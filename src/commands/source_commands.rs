use crate::error::AppError;
use crate::source::contract::{
    AlbumDraft, AlbumPatch, AlbumTracksQuery, ArtistDraft, ArtistPatch, PageQuery, TableQuery,
    TrackDraft, TrackPatch,
};
use crate::source::manager;
use crate::source::models::{
    Album, Artist, Paged, SuccessResponse, TablePage, Track, TrackSlice,
};

// The canonical call surface. Every command reads the binding at call time
// and never branches on which backend is behind it.

// -- tracks --

#[tauri::command]
pub async fn get_track_list() -> Result<SuccessResponse<Vec<Track>>, AppError> {
    manager::adapter().track_list().await
}

#[tauri::command]
pub async fn get_track_table_list(
    query: TableQuery,
) -> Result<SuccessResponse<TablePage<Track>>, AppError> {
    manager::adapter().track_table_list(query).await
}

#[tauri::command]
pub async fn load_more_tracks(query: PageQuery) -> Result<SuccessResponse<Paged<Track>>, AppError> {
    manager::adapter().load_more_tracks(query).await
}

#[tauri::command]
pub async fn create_track(draft: TrackDraft) -> Result<SuccessResponse<Track>, AppError> {
    manager::adapter().create_track(draft).await
}

#[tauri::command]
pub async fn update_track(
    id: String,
    patch: TrackPatch,
) -> Result<SuccessResponse<Track>, AppError> {
    manager::adapter().update_track(&id, patch).await
}

#[tauri::command]
pub async fn delete_track(
    id: String,
    delete_album: Option<bool>,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter()
        .delete_track(&id, delete_album.unwrap_or(false))
        .await
}

#[tauri::command]
pub async fn batch_create_tracks(
    drafts: Vec<TrackDraft>,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().batch_create_tracks(drafts).await
}

#[tauri::command]
pub async fn batch_delete_tracks(ids: Vec<String>) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().batch_delete_tracks(ids).await
}

#[tauri::command]
pub async fn get_latest_tracks(
    kind: Option<String>,
    random: Option<bool>,
    page_size: Option<u32>,
) -> Result<SuccessResponse<Vec<Track>>, AppError> {
    manager::adapter()
        .latest_tracks(kind.as_deref(), random.unwrap_or(false), page_size)
        .await
}

#[tauri::command]
pub async fn get_tracks_by_artist(artist: String) -> Result<SuccessResponse<Vec<Track>>, AppError> {
    manager::adapter().tracks_by_artist(&artist).await
}

// -- albums --

#[tauri::command]
pub async fn get_album_list() -> Result<SuccessResponse<Vec<Album>>, AppError> {
    manager::adapter().album_list().await
}

#[tauri::command]
pub async fn get_album_table_list(
    query: TableQuery,
) -> Result<SuccessResponse<TablePage<Album>>, AppError> {
    manager::adapter().album_table_list(query).await
}

#[tauri::command]
pub async fn load_more_albums(
    query: PageQuery,
    kind: Option<String>,
) -> Result<SuccessResponse<Paged<Album>>, AppError> {
    manager::adapter()
        .load_more_albums(query, kind.as_deref())
        .await
}

#[tauri::command]
pub async fn create_album(draft: AlbumDraft) -> Result<SuccessResponse<Album>, AppError> {
    manager::adapter().create_album(draft).await
}

#[tauri::command]
pub async fn update_album(
    id: String,
    patch: AlbumPatch,
) -> Result<SuccessResponse<Album>, AppError> {
    manager::adapter().update_album(&id, patch).await
}

#[tauri::command]
pub async fn delete_album(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().delete_album(&id).await
}

#[tauri::command]
pub async fn batch_create_albums(
    drafts: Vec<AlbumDraft>,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().batch_create_albums(drafts).await
}

#[tauri::command]
pub async fn batch_delete_albums(ids: Vec<String>) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().batch_delete_albums(ids).await
}

#[tauri::command]
pub async fn get_recommended_albums(
    kind: Option<String>,
    random: Option<bool>,
    page_size: Option<u32>,
) -> Result<SuccessResponse<Vec<Album>>, AppError> {
    manager::adapter()
        .recommended_albums(kind.as_deref(), random.unwrap_or(false), page_size)
        .await
}

#[tauri::command]
pub async fn get_recent_albums(
    kind: Option<String>,
    random: Option<bool>,
    page_size: Option<u32>,
) -> Result<SuccessResponse<Vec<Album>>, AppError> {
    manager::adapter()
        .recent_albums(kind.as_deref(), random.unwrap_or(false), page_size)
        .await
}

#[tauri::command]
pub async fn get_album_by_id(id: String) -> Result<SuccessResponse<Album>, AppError> {
    manager::adapter().album_by_id(&id).await
}

#[tauri::command]
pub async fn get_album_tracks(
    id: String,
    query: AlbumTracksQuery,
) -> Result<SuccessResponse<TrackSlice>, AppError> {
    manager::adapter().album_tracks(&id, query).await
}

#[tauri::command]
pub async fn get_albums_by_artist(artist: String) -> Result<SuccessResponse<Vec<Album>>, AppError> {
    manager::adapter().albums_by_artist(&artist).await
}

// -- artists --

#[tauri::command]
pub async fn get_artist_list(query: PageQuery) -> Result<SuccessResponse<Paged<Artist>>, AppError> {
    manager::adapter().artist_list(query).await
}

#[tauri::command]
pub async fn get_artist_table_list(
    query: TableQuery,
) -> Result<SuccessResponse<TablePage<Artist>>, AppError> {
    manager::adapter().artist_table_list(query).await
}

#[tauri::command]
pub async fn load_more_artists(
    query: PageQuery,
) -> Result<SuccessResponse<Paged<Artist>>, AppError> {
    manager::adapter().load_more_artists(query).await
}

#[tauri::command]
pub async fn create_artist(draft: ArtistDraft) -> Result<SuccessResponse<Artist>, AppError> {
    manager::adapter().create_artist(draft).await
}

#[tauri::command]
pub async fn update_artist(
    id: String,
    patch: ArtistPatch,
) -> Result<SuccessResponse<Artist>, AppError> {
    manager::adapter().update_artist(&id, patch).await
}

#[tauri::command]
pub async fn delete_artist(id: String) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().delete_artist(&id).await
}

#[tauri::command]
pub async fn batch_create_artists(
    drafts: Vec<ArtistDraft>,
) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().batch_create_artists(drafts).await
}

#[tauri::command]
pub async fn batch_delete_artists(ids: Vec<String>) -> Result<SuccessResponse<bool>, AppError> {
    manager::adapter().batch_delete_artists(ids).await
}

#[tauri::command]
pub async fn get_artist_by_id(id: String) -> Result<SuccessResponse<Artist>, AppError> {
    manager::adapter().artist_by_id(&id).await
}

#[tauri::command]
pub async fn get_latest_artists(
    kind: Option<String>,
    page_size: Option<u32>,
) -> Result<SuccessResponse<Vec<Artist>>, AppError> {
    manager::adapter()
        .latest_artists(kind.as_deref(), page_size)
        .await
}
