use serde::{Deserialize, Serialize};

// Canonical, backend-agnostic domain types. Both sources map into these; the
// UI layer never sees a backend-specific shape.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    /// Playback duration in seconds.
    #[serde(default)]
    pub duration: u32,
    /// Playable location: absolute URL or backend-relative path.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub cover: Option<String>,
    /// Timestamped-line lyrics text. `None` when the backend has none,
    /// never an empty string.
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover: Option<String>,
}

/// Track order is significant: one track may legally appear more than once,
/// so removal operates by position, not by track identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub track_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub track: Track,
    #[serde(default)]
    pub played_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Application-level envelope shared by every adapter call. `code == 200`
/// means success; any other code (notably 401) is a recoverable
/// application-level outcome carried as data, not a transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

/// Cumulative "load more" page. `load_count` strictly increases across
/// successive pages of the same query; `has_more == false` is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub page_size: u32,
    pub load_count: u32,
    pub list: Vec<T>,
    pub total: u32,
    pub has_more: bool,
}

/// Offset-based table page. `total` is `None` where the backend cannot
/// report an authoritative count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<T> {
    pub page_size: u32,
    pub current: u32,
    pub list: Vec<T>,
    pub total: Option<u64>,
}

/// Window into an album's song list: the slice plus the album's full count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSlice {
    pub list: Vec<Track>,
    pub total: u32,
}
