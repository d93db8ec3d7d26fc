use crate::error::AppResult;
use crate::source::models::{
    Album, Artist, AuthSession, HistoryEntry, Paged, Playlist, SuccessResponse, TablePage, Track,
    TrackSlice, User,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Envelope<T> = AppResult<SuccessResponse<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_size: u32,
    /// Items already delivered for this query across previous pages.
    pub load_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    pub page_size: u32,
    /// 1-based page number.
    pub current: u32,
}

impl TableQuery {
    pub fn offset(&self) -> u32 {
        self.current.saturating_sub(1) * self.page_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumTracksQuery {
    pub page_size: u32,
    pub skip: u32,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDraft {
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDraft {
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDraft {
    pub name: String,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub device_name: Option<String>,
}

/// The one stable operation set both backends implement. Rules:
///
/// - Write operations on a read-only backend fail with
///   [`crate::error::AppError::Unsupported`] before any network request,
///   never silently no-op.
/// - Zero results are an empty list plus `total = 0`, never an error.
/// - Every paginated read returns its envelope with `load_count` at least
///   as large as the one passed in, and `has_more == false` as a terminal
///   signal.
#[async_trait]
pub trait MusicSource: Send + Sync {
    // -- tracks --
    async fn track_list(&self) -> Envelope<Vec<Track>>;
    async fn track_table_list(&self, query: TableQuery) -> Envelope<TablePage<Track>>;
    async fn load_more_tracks(&self, query: PageQuery) -> Envelope<Paged<Track>>;
    async fn create_track(&self, draft: TrackDraft) -> Envelope<Track>;
    async fn update_track(&self, id: &str, patch: TrackPatch) -> Envelope<Track>;
    async fn delete_track(&self, id: &str, delete_album: bool) -> Envelope<bool>;
    async fn batch_create_tracks(&self, drafts: Vec<TrackDraft>) -> Envelope<bool>;
    async fn batch_delete_tracks(&self, ids: Vec<String>) -> Envelope<bool>;
    async fn latest_tracks(
        &self,
        kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Track>>;
    async fn tracks_by_artist(&self, artist: &str) -> Envelope<Vec<Track>>;

    // -- albums --
    async fn album_list(&self) -> Envelope<Vec<Album>>;
    async fn album_table_list(&self, query: TableQuery) -> Envelope<TablePage<Album>>;
    async fn load_more_albums(&self, query: PageQuery, kind: Option<&str>)
        -> Envelope<Paged<Album>>;
    async fn create_album(&self, draft: AlbumDraft) -> Envelope<Album>;
    async fn update_album(&self, id: &str, patch: AlbumPatch) -> Envelope<Album>;
    async fn delete_album(&self, id: &str) -> Envelope<bool>;
    async fn batch_create_albums(&self, drafts: Vec<AlbumDraft>) -> Envelope<bool>;
    async fn batch_delete_albums(&self, ids: Vec<String>) -> Envelope<bool>;
    async fn recommended_albums(
        &self,
        kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Album>>;
    async fn recent_albums(
        &self,
        kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Album>>;
    async fn album_by_id(&self, id: &str) -> Envelope<Album>;
    async fn album_tracks(&self, id: &str, query: AlbumTracksQuery) -> Envelope<TrackSlice>;
    async fn albums_by_artist(&self, artist: &str) -> Envelope<Vec<Album>>;

    // -- artists --
    async fn artist_list(&self, query: PageQuery) -> Envelope<Paged<Artist>>;
    async fn artist_table_list(&self, query: TableQuery) -> Envelope<TablePage<Artist>>;
    async fn load_more_artists(&self, query: PageQuery) -> Envelope<Paged<Artist>>;
    async fn create_artist(&self, draft: ArtistDraft) -> Envelope<Artist>;
    async fn update_artist(&self, id: &str, patch: ArtistPatch) -> Envelope<Artist>;
    async fn delete_artist(&self, id: &str) -> Envelope<bool>;
    async fn batch_create_artists(&self, drafts: Vec<ArtistDraft>) -> Envelope<bool>;
    async fn batch_delete_artists(&self, ids: Vec<String>) -> Envelope<bool>;
    async fn artist_by_id(&self, id: &str) -> Envelope<Artist>;
    async fn latest_artists(&self, kind: Option<&str>, page_size: Option<u32>)
        -> Envelope<Vec<Artist>>;

    // -- playlists --
    async fn playlists(&self) -> Envelope<Vec<Playlist>>;
    async fn playlist_by_id(&self, id: &str) -> Envelope<Playlist>;
    async fn create_playlist(&self, name: &str) -> Envelope<Playlist>;
    async fn rename_playlist(&self, id: &str, name: &str) -> Envelope<Playlist>;
    async fn delete_playlist(&self, id: &str) -> Envelope<bool>;
    async fn add_track_to_playlist(&self, playlist_id: &str, track_id: &str) -> Envelope<bool>;
    /// Removal is positional: the same track may appear at several positions.
    async fn remove_playlist_track(&self, playlist_id: &str, position: u32) -> Envelope<bool>;

    // -- user --
    async fn add_to_history(&self, track_id: &str, progress: u32) -> Envelope<bool>;
    async fn track_history(&self, query: PageQuery) -> Envelope<Paged<HistoryEntry>>;
    async fn favorite_tracks(&self, query: PageQuery) -> Envelope<Paged<Track>>;
    async fn favorite_albums(&self, query: PageQuery) -> Envelope<Paged<Album>>;
    async fn like_track(&self, id: &str) -> Envelope<bool>;
    async fn unlike_track(&self, id: &str) -> Envelope<bool>;
    async fn like_album(&self, id: &str) -> Envelope<bool>;
    async fn unlike_album(&self, id: &str) -> Envelope<bool>;
    async fn user_list(&self) -> Envelope<Vec<User>>;

    // -- auth --
    /// `data` is `None` when the backend reports a non-200 `code` (a denied
    /// login is a recoverable outcome carried in the envelope, not an error).
    async fn login(&self, credentials: Credentials) -> Envelope<Option<AuthSession>>;
    async fn register(&self, credentials: Credentials) -> Envelope<Option<AuthSession>>;
    /// Connectivity check. `false` is a reachable-but-unhealthy server;
    /// transport failures surface as errors.
    async fn check(&self) -> Envelope<bool>;
    /// Greeting probe for the settings screen.
    async fn hello(&self) -> Envelope<String>;
}
