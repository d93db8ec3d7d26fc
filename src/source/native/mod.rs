pub mod client;

pub use client::{NativeClient, NativeConfig};

use crate::source::contract::{
    AlbumDraft, AlbumPatch, AlbumTracksQuery, ArtistDraft, ArtistPatch, Credentials, Envelope,
    MusicSource, PageQuery, SortOrder, TableQuery, TrackDraft, TrackPatch,
};
use crate::source::models::{
    Album, Artist, AuthSession, HistoryEntry, Paged, Playlist, TablePage, Track, TrackSlice, User,
};
use async_trait::async_trait;
use serde_json::json;

/// Thin pass-through adapter for the proprietary backend: one HTTP call per
/// contract method, no response mapping.
pub struct NativeAdapter {
    client: NativeClient,
}

impl NativeAdapter {
    pub fn new(config: NativeConfig) -> Self {
        Self {
            client: NativeClient::new(config),
        }
    }
}

fn page_params(query: PageQuery) -> Vec<(&'static str, String)> {
    vec![
        ("pageSize", query.page_size.to_string()),
        ("loadCount", query.load_count.to_string()),
    ]
}

fn table_params(query: TableQuery) -> Vec<(&'static str, String)> {
    vec![
        ("pageSize", query.page_size.to_string()),
        ("current", query.current.to_string()),
    ]
}

fn listing_params(
    kind: Option<&str>,
    random: bool,
    page_size: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("random", random.to_string())];
    if let Some(kind) = kind {
        params.push(("type", kind.to_string()));
    }
    if let Some(page_size) = page_size {
        params.push(("pageSize", page_size.to_string()));
    }
    params
}

#[async_trait]
impl MusicSource for NativeAdapter {
    // -- tracks --

    async fn track_list(&self) -> Envelope<Vec<Track>> {
        self.client.get("/track/list", &[]).await
    }

    async fn track_table_list(&self, query: TableQuery) -> Envelope<TablePage<Track>> {
        self.client
            .get("/track/table-list", &table_params(query))
            .await
    }

    async fn load_more_tracks(&self, query: PageQuery) -> Envelope<Paged<Track>> {
        self.client
            .get("/track/load-more", &page_params(query))
            .await
    }

    async fn create_track(&self, draft: TrackDraft) -> Envelope<Track> {
        self.client.post("/track", &draft).await
    }

    async fn update_track(&self, id: &str, patch: TrackPatch) -> Envelope<Track> {
        self.client.put(&format!("/track/{id}"), &patch).await
    }

    async fn delete_track(&self, id: &str, delete_album: bool) -> Envelope<bool> {
        self.client
            .delete(
                &format!("/track/{id}"),
                &[("deleteAlbum", delete_album.to_string())],
            )
            .await
    }

    async fn batch_create_tracks(&self, drafts: Vec<TrackDraft>) -> Envelope<bool> {
        self.client.post("/track/batch-create", &drafts).await
    }

    async fn batch_delete_tracks(&self, ids: Vec<String>) -> Envelope<bool> {
        self.client.delete_with_body("/track/batch-delete", &ids).await
    }

    async fn latest_tracks(
        &self,
        kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Track>> {
        self.client
            .get("/track/latest", &listing_params(kind, random, page_size))
            .await
    }

    async fn tracks_by_artist(&self, artist: &str) -> Envelope<Vec<Track>> {
        self.client
            .get("/track/artist", &[("artist", artist.to_string())])
            .await
    }

    // -- albums --

    async fn album_list(&self) -> Envelope<Vec<Album>> {
        self.client.get("/album/list", &[]).await
    }

    async fn album_table_list(&self, query: TableQuery) -> Envelope<TablePage<Album>> {
        self.client
            .get("/album/table-list", &table_params(query))
            .await
    }

    async fn load_more_albums(
        &self,
        query: PageQuery,
        kind: Option<&str>,
    ) -> Envelope<Paged<Album>> {
        let mut params = page_params(query);
        if let Some(kind) = kind {
            params.push(("type", kind.to_string()));
        }
        self.client.get("/album/load-more", &params).await
    }

    async fn create_album(&self, draft: AlbumDraft) -> Envelope<Album> {
        self.client.post("/album", &draft).await
    }

    async fn update_album(&self, id: &str, patch: AlbumPatch) -> Envelope<Album> {
        self.client.put(&format!("/album/{id}"), &patch).await
    }

    async fn delete_album(&self, id: &str) -> Envelope<bool> {
        self.client.delete(&format!("/album/{id}"), &[]).await
    }

    async fn batch_create_albums(&self, drafts: Vec<AlbumDraft>) -> Envelope<bool> {
        self.client.post("/album/batch-create", &drafts).await
    }

    async fn batch_delete_albums(&self, ids: Vec<String>) -> Envelope<bool> {
        self.client.delete_with_body("/album/batch-delete", &ids).await
    }

    async fn recommended_albums(
        &self,
        kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Album>> {
        self.client
            .get("/album/recommend", &listing_params(kind, random, page_size))
            .await
    }

    async fn recent_albums(
        &self,
        kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Album>> {
        self.client
            .get("/album/latest", &listing_params(kind, random, page_size))
            .await
    }

    async fn album_by_id(&self, id: &str) -> Envelope<Album> {
        self.client.get(&format!("/album/{id}"), &[]).await
    }

    async fn album_tracks(&self, id: &str, query: AlbumTracksQuery) -> Envelope<TrackSlice> {
        let mut params = vec![
            ("pageSize", query.page_size.to_string()),
            ("skip", query.skip.to_string()),
            (
                "sort",
                match query.sort {
                    SortOrder::Asc => "asc".to_string(),
                    SortOrder::Desc => "desc".to_string(),
                },
            ),
        ];
        if let Some(keyword) = query.keyword {
            params.push(("keyword", keyword));
        }
        self.client
            .get(&format!("/album/{id}/tracks"), &params)
            .await
    }

    async fn albums_by_artist(&self, artist: &str) -> Envelope<Vec<Album>> {
        self.client
            .get(
                &format!("/album/artist/{}", urlencoding::encode(artist)),
                &[],
            )
            .await
    }

    // -- artists --

    async fn artist_list(&self, query: PageQuery) -> Envelope<Paged<Artist>> {
        self.client.get("/artist/list", &page_params(query)).await
    }

    async fn artist_table_list(&self, query: TableQuery) -> Envelope<TablePage<Artist>> {
        self.client
            .get("/artist/table-list", &table_params(query))
            .await
    }

    async fn load_more_artists(&self, query: PageQuery) -> Envelope<Paged<Artist>> {
        self.client
            .get("/artist/load-more", &page_params(query))
            .await
    }

    async fn create_artist(&self, draft: ArtistDraft) -> Envelope<Artist> {
        self.client.post("/artist", &draft).await
    }

    async fn update_artist(&self, id: &str, patch: ArtistPatch) -> Envelope<Artist> {
        self.client.put(&format!("/artist/{id}"), &patch).await
    }

    async fn delete_artist(&self, id: &str) -> Envelope<bool> {
        self.client.delete(&format!("/artist/{id}"), &[]).await
    }

    async fn batch_create_artists(&self, drafts: Vec<ArtistDraft>) -> Envelope<bool> {
        self.client.post("/artist/batch-create", &drafts).await
    }

    async fn batch_delete_artists(&self, ids: Vec<String>) -> Envelope<bool> {
        self.client
            .delete_with_body("/artist/batch-delete", &ids)
            .await
    }

    async fn artist_by_id(&self, id: &str) -> Envelope<Artist> {
        self.client.get(&format!("/artist/{id}"), &[]).await
    }

    async fn latest_artists(
        &self,
        kind: Option<&str>,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Artist>> {
        self.client
            .get("/artist/latest", &listing_params(kind, false, page_size))
            .await
    }

    // -- playlists --

    async fn playlists(&self) -> Envelope<Vec<Playlist>> {
        self.client.get("/playlist/list", &[]).await
    }

    async fn playlist_by_id(&self, id: &str) -> Envelope<Playlist> {
        self.client.get(&format!("/playlist/{id}"), &[]).await
    }

    async fn create_playlist(&self, name: &str) -> Envelope<Playlist> {
        self.client.post("/playlist", &json!({ "name": name })).await
    }

    async fn rename_playlist(&self, id: &str, name: &str) -> Envelope<Playlist> {
        self.client
            .put(&format!("/playlist/{id}"), &json!({ "name": name }))
            .await
    }

    async fn delete_playlist(&self, id: &str) -> Envelope<bool> {
        self.client.delete(&format!("/playlist/{id}"), &[]).await
    }

    async fn add_track_to_playlist(&self, playlist_id: &str, track_id: &str) -> Envelope<bool> {
        self.client
            .post(
                &format!("/playlist/{playlist_id}/tracks"),
                &json!({ "trackId": track_id }),
            )
            .await
    }

    async fn remove_playlist_track(&self, playlist_id: &str, position: u32) -> Envelope<bool> {
        self.client
            .delete(&format!("/playlist/{playlist_id}/tracks/{position}"), &[])
            .await
    }

    // -- user --

    async fn add_to_history(&self, track_id: &str, progress: u32) -> Envelope<bool> {
        self.client
            .post(
                "/user/history",
                &json!({ "trackId": track_id, "progress": progress }),
            )
            .await
    }

    async fn track_history(&self, query: PageQuery) -> Envelope<Paged<HistoryEntry>> {
        self.client.get("/user/history", &page_params(query)).await
    }

    async fn favorite_tracks(&self, query: PageQuery) -> Envelope<Paged<Track>> {
        self.client
            .get("/user/favorite/tracks", &page_params(query))
            .await
    }

    async fn favorite_albums(&self, query: PageQuery) -> Envelope<Paged<Album>> {
        self.client
            .get("/user/favorite/albums", &page_params(query))
            .await
    }

    async fn like_track(&self, id: &str) -> Envelope<bool> {
        self.client
            .post(&format!("/user/like/track/{id}"), &json!({}))
            .await
    }

    async fn unlike_track(&self, id: &str) -> Envelope<bool> {
        self.client
            .delete(&format!("/user/like/track/{id}"), &[])
            .await
    }

    async fn like_album(&self, id: &str) -> Envelope<bool> {
        self.client
            .post(&format!("/user/like/album/{id}"), &json!({}))
            .await
    }

    async fn unlike_album(&self, id: &str) -> Envelope<bool> {
        self.client
            .delete(&format!("/user/like/album/{id}"), &[])
            .await
    }

    async fn user_list(&self) -> Envelope<Vec<User>> {
        self.client.get("/user/list", &[]).await
    }

    // -- auth --

    async fn login(&self, credentials: Credentials) -> Envelope<Option<AuthSession>> {
        self.client.post("/auth/login", &credentials).await
    }

    async fn register(&self, credentials: Credentials) -> Envelope<Option<AuthSession>> {
        self.client.post("/auth/register", &credentials).await
    }

    async fn check(&self) -> Envelope<bool> {
        self.client.get("/auth/check", &[]).await
    }

    async fn hello(&self) -> Envelope<String> {
        self.client.get("/auth/hello", &[]).await
    }
}
