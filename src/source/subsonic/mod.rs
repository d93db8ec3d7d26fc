pub mod client;
mod mapper;
mod wire;

pub use client::{SubsonicClient, SubsonicConfig};

use crate::error::{AppError, AppResult};
use crate::source::contract::{
    AlbumDraft, AlbumPatch, AlbumTracksQuery, ArtistDraft, ArtistPatch, Credentials, Envelope,
    MusicSource, PageQuery, TableQuery, TrackDraft, TrackPatch,
};
use crate::source::models::{
    Album, Artist, AuthSession, HistoryEntry, Paged, Playlist, SuccessResponse, TablePage, Track,
    TrackSlice, User,
};
use async_trait::async_trait;
use futures_util::future::join_all;
use mapper::{
    format_lyrics, map_album, map_artist, map_playlist, map_song, map_user, page_album_songs,
    page_window,
};
use wire::{
    AlbumListResponse, AlbumResponse, ArtistResponse, ArtistsResponse, LyricsResponse,
    PingResponse, PlaylistResponse, PlaylistsResponse, RandomSongsResponse, SearchResponse,
    StarredResponse, SubsonicArtist, SubsonicSong, UserResponse, UsersResponse,
};

/// Largest page the protocol accepts. Used to pull a full candidate set in
/// one request for endpoints without real offset paging.
const FULL_PAGE: u32 = 500;

/// Adapter over a Subsonic-family server (Navidrome and friends). Read-only
/// for library entities: track/album/artist writes are rejected up front.
pub struct SubsonicAdapter {
    client: SubsonicClient,
}

impl SubsonicAdapter {
    pub fn new(config: SubsonicConfig) -> Self {
        Self {
            client: SubsonicClient::new(config),
        }
    }

    async fn album_list2(
        &self,
        kind: &str,
        size: u32,
        offset: Option<u32>,
    ) -> AppResult<Vec<wire::SubsonicAlbum>> {
        let mut params = vec![
            ("type", kind.to_string()),
            ("size", size.to_string()),
        ];
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        let response: AlbumListResponse = self.client.get("getAlbumList2", &params).await?;
        Ok(response
            .album_list2
            .and_then(|list| list.album)
            .unwrap_or_default())
    }

    async fn all_artists(&self) -> AppResult<Vec<SubsonicArtist>> {
        let response: ArtistsResponse = self.client.get("getArtists", &[]).await?;
        let mut artists = Vec::new();
        for index in response
            .artists
            .and_then(|wrapper| wrapper.index)
            .unwrap_or_default()
        {
            artists.extend(index.artist.unwrap_or_default());
        }
        Ok(artists)
    }

    /// Several queries need an artist id but callers only have a name.
    /// Best-effort search; `None` when the name cannot be resolved.
    async fn resolve_artist_by_name(&self, name: &str) -> Option<SubsonicArtist> {
        let params = [
            ("query", name.to_string()),
            ("artistCount", "1".to_string()),
            ("albumCount", "0".to_string()),
            ("songCount", "0".to_string()),
        ];
        match self.client.get::<SearchResponse>("search3", &params).await {
            Ok(response) => response
                .search_result3
                .and_then(|result| result.artist)
                .and_then(|artists| artists.into_iter().next()),
            Err(err) => {
                log::warn!("Artist lookup for {:?} failed: {}", name, err);
                None
            }
        }
    }

    async fn artist_albums(&self, artist_id: &str) -> AppResult<Vec<wire::SubsonicAlbum>> {
        let response: ArtistResponse = self
            .client
            .get("getArtist", &[("id", artist_id.to_string())])
            .await?;
        Ok(response.artist.album.unwrap_or_default())
    }

    /// Per-track, best-effort: a failed lyrics lookup degrades to `None`
    /// for that track and never fails the batch.
    async fn track_lyrics(&self, song_id: &str) -> Option<String> {
        match self
            .client
            .get::<LyricsResponse>("getLyricsBySongId", &[("id", song_id.to_string())])
            .await
        {
            Ok(response) => format_lyrics(&response),
            Err(err) => {
                log::debug!("Lyrics lookup failed for {}: {}", song_id, err);
                None
            }
        }
    }

    /// One lyrics request per track, issued concurrently.
    async fn map_songs_with_lyrics(&self, songs: Vec<SubsonicSong>) -> Vec<Track> {
        let mapped = songs.into_iter().map(|song| async move {
            let lyrics = self.track_lyrics(&song.id).await;
            map_song(song, &self.client, lyrics)
        });
        join_all(mapped).await
    }

    fn map_songs(&self, songs: Vec<SubsonicSong>) -> Vec<Track> {
        songs
            .into_iter()
            .map(|song| map_song(song, &self.client, None))
            .collect()
    }

    fn artist_page(&self, artists: Vec<SubsonicArtist>, query: PageQuery) -> Paged<Artist> {
        let total = artists.len() as u32;
        let slice = page_window(
            artists,
            query.load_count as usize,
            query.page_size as usize,
        );
        let list: Vec<Artist> = slice
            .into_iter()
            .map(|artist| map_artist(artist, &self.client))
            .collect();
        let load_count = query.load_count + list.len() as u32;
        Paged {
            page_size: query.page_size,
            load_count,
            list,
            total,
            has_more: load_count < total,
        }
    }
}

#[async_trait]
impl MusicSource for SubsonicAdapter {
    // -- tracks --

    async fn track_list(&self) -> Envelope<Vec<Track>> {
        let params = [
            ("query", String::new()),
            ("songCount", FULL_PAGE.to_string()),
            ("artistCount", "0".to_string()),
            ("albumCount", "0".to_string()),
        ];
        let response: SearchResponse = self.client.get("search3", &params).await?;
        let songs = response
            .search_result3
            .and_then(|result| result.song)
            .unwrap_or_default();
        Ok(SuccessResponse::ok(self.map_songs(songs)))
    }

    async fn track_table_list(&self, query: TableQuery) -> Envelope<TablePage<Track>> {
        let params = [
            ("query", String::new()),
            ("songCount", query.page_size.to_string()),
            ("songOffset", query.offset().to_string()),
            ("artistCount", "0".to_string()),
            ("albumCount", "0".to_string()),
        ];
        let response: SearchResponse = self.client.get("search3", &params).await?;
        let songs = response
            .search_result3
            .and_then(|result| result.song)
            .unwrap_or_default();
        // No authoritative count for this view.
        Ok(SuccessResponse::ok(TablePage {
            page_size: query.page_size,
            current: query.current,
            list: self.map_songs(songs),
            total: None,
        }))
    }

    async fn load_more_tracks(&self, query: PageQuery) -> Envelope<Paged<Track>> {
        let params = [
            ("query", String::new()),
            ("songCount", FULL_PAGE.to_string()),
            ("artistCount", "0".to_string()),
            ("albumCount", "0".to_string()),
        ];
        let response: SearchResponse = self.client.get("search3", &params).await?;
        let songs = response
            .search_result3
            .and_then(|result| result.song)
            .unwrap_or_default();
        let list = self.map_songs(songs);
        Ok(SuccessResponse::ok(Paged {
            page_size: query.page_size,
            load_count: query.load_count + list.len() as u32,
            total: list.len() as u32,
            has_more: false,
            list,
        }))
    }

    async fn create_track(&self, _draft: TrackDraft) -> Envelope<Track> {
        Err(AppError::Unsupported("create track"))
    }

    async fn update_track(&self, _id: &str, _patch: TrackPatch) -> Envelope<Track> {
        Err(AppError::Unsupported("update track"))
    }

    async fn delete_track(&self, _id: &str, _delete_album: bool) -> Envelope<bool> {
        Err(AppError::Unsupported("delete track"))
    }

    async fn batch_create_tracks(&self, _drafts: Vec<TrackDraft>) -> Envelope<bool> {
        Err(AppError::Unsupported("batch create tracks"))
    }

    async fn batch_delete_tracks(&self, _ids: Vec<String>) -> Envelope<bool> {
        Err(AppError::Unsupported("batch delete tracks"))
    }

    async fn latest_tracks(
        &self,
        _kind: Option<&str>,
        random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Track>> {
        let size = page_size.unwrap_or(10);
        if random {
            let response: RandomSongsResponse = self
                .client
                .get("getRandomSongs", &[("size", size.to_string())])
                .await?;
            let songs = response
                .random_songs
                .and_then(|list| list.song)
                .unwrap_or_default();
            return Ok(SuccessResponse::ok(self.map_songs(songs)));
        }

        // Newest albums, flattened until the window is filled.
        let albums = self.album_list2("newest", 5, None).await?;
        let mut tracks = Vec::new();
        for album in albums {
            if tracks.len() as u32 >= size {
                break;
            }
            let response: AlbumResponse = self
                .client
                .get("getAlbum", &[("id", album.id.clone())])
                .await?;
            tracks.extend(self.map_songs(response.album.song.unwrap_or_default()));
        }
        tracks.truncate(size as usize);
        Ok(SuccessResponse::ok(tracks))
    }

    async fn tracks_by_artist(&self, artist: &str) -> Envelope<Vec<Track>> {
        let Some(found) = self.resolve_artist_by_name(artist).await else {
            return Ok(SuccessResponse::ok(Vec::new()));
        };

        let albums = self.artist_albums(&found.id).await?;
        let fetches = albums.into_iter().map(|album| async move {
            let params = [("id", album.id)];
            self.client.get::<AlbumResponse>("getAlbum", &params).await
        });
        let mut tracks = Vec::new();
        for result in join_all(fetches).await {
            match result {
                Ok(response) => {
                    tracks.extend(self.map_songs(response.album.song.unwrap_or_default()))
                }
                Err(err) => log::warn!("Album fetch for artist {:?} failed: {}", artist, err),
            }
        }
        Ok(SuccessResponse::ok(tracks))
    }

    // -- albums --

    async fn album_list(&self) -> Envelope<Vec<Album>> {
        let albums = self.album_list2("newest", 50, None).await?;
        Ok(SuccessResponse::ok(
            albums
                .into_iter()
                .map(|album| map_album(album, &self.client))
                .collect(),
        ))
    }

    async fn album_table_list(&self, query: TableQuery) -> Envelope<TablePage<Album>> {
        let albums = self
            .album_list2("alphabeticalByName", query.page_size, Some(query.offset()))
            .await?;
        Ok(SuccessResponse::ok(TablePage {
            page_size: query.page_size,
            current: query.current,
            list: albums
                .into_iter()
                .map(|album| map_album(album, &self.client))
                .collect(),
            total: None,
        }))
    }

    async fn load_more_albums(
        &self,
        query: PageQuery,
        _kind: Option<&str>,
    ) -> Envelope<Paged<Album>> {
        // One full fetch; there is no reliable offset+total pair for this
        // listing, so the whole set arrives in a single terminal page.
        let albums = self.album_list2("alphabeticalByName", FULL_PAGE, None).await?;
        let list: Vec<Album> = albums
            .into_iter()
            .map(|album| map_album(album, &self.client))
            .collect();
        Ok(SuccessResponse::ok(Paged {
            page_size: query.page_size,
            load_count: query.load_count + list.len() as u32,
            total: list.len() as u32,
            has_more: false,
            list,
        }))
    }

    async fn create_album(&self, _draft: AlbumDraft) -> Envelope<Album> {
        Err(AppError::Unsupported("create album"))
    }

    async fn update_album(&self, _id: &str, _patch: AlbumPatch) -> Envelope<Album> {
        Err(AppError::Unsupported("update album"))
    }

    async fn delete_album(&self, _id: &str) -> Envelope<bool> {
        Err(AppError::Unsupported("delete album"))
    }

    async fn batch_create_albums(&self, _drafts: Vec<AlbumDraft>) -> Envelope<bool> {
        Err(AppError::Unsupported("batch create albums"))
    }

    async fn batch_delete_albums(&self, _ids: Vec<String>) -> Envelope<bool> {
        Err(AppError::Unsupported("batch delete albums"))
    }

    async fn recommended_albums(
        &self,
        _kind: Option<&str>,
        _random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Album>> {
        let albums = self
            .album_list2("frequent", page_size.unwrap_or(10), None)
            .await?;
        Ok(SuccessResponse::ok(
            albums
                .into_iter()
                .map(|album| map_album(album, &self.client))
                .collect(),
        ))
    }

    async fn recent_albums(
        &self,
        _kind: Option<&str>,
        _random: bool,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Album>> {
        let albums = self
            .album_list2("recent", page_size.unwrap_or(10), None)
            .await?;
        Ok(SuccessResponse::ok(
            albums
                .into_iter()
                .map(|album| map_album(album, &self.client))
                .collect(),
        ))
    }

    async fn album_by_id(&self, id: &str) -> Envelope<Album> {
        let response: AlbumResponse = self
            .client
            .get("getAlbum", &[("id", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(map_album(response.album, &self.client)))
    }

    async fn album_tracks(&self, id: &str, query: AlbumTracksQuery) -> Envelope<TrackSlice> {
        let response: AlbumResponse = self
            .client
            .get("getAlbum", &[("id", id.to_string())])
            .await?;
        let songs = response.album.song.unwrap_or_default();
        let (window, total) = page_album_songs(songs, &query);
        let list = self.map_songs_with_lyrics(window).await;
        Ok(SuccessResponse::ok(TrackSlice { list, total }))
    }

    async fn albums_by_artist(&self, artist: &str) -> Envelope<Vec<Album>> {
        let Some(found) = self.resolve_artist_by_name(artist).await else {
            return Ok(SuccessResponse::ok(Vec::new()));
        };
        let albums = self.artist_albums(&found.id).await?;
        Ok(SuccessResponse::ok(
            albums
                .into_iter()
                .map(|album| map_album(album, &self.client))
                .collect(),
        ))
    }

    // -- artists --

    async fn artist_list(&self, query: PageQuery) -> Envelope<Paged<Artist>> {
        let artists = self.all_artists().await?;
        Ok(SuccessResponse::ok(self.artist_page(artists, query)))
    }

    async fn artist_table_list(&self, query: TableQuery) -> Envelope<TablePage<Artist>> {
        let artists = self.all_artists().await?;
        let total = artists.len() as u64;
        let slice = page_window(artists, query.offset() as usize, query.page_size as usize);
        Ok(SuccessResponse::ok(TablePage {
            page_size: query.page_size,
            current: query.current,
            list: slice
                .into_iter()
                .map(|artist| map_artist(artist, &self.client))
                .collect(),
            total: Some(total),
        }))
    }

    async fn load_more_artists(&self, query: PageQuery) -> Envelope<Paged<Artist>> {
        self.artist_list(query).await
    }

    async fn create_artist(&self, _draft: ArtistDraft) -> Envelope<Artist> {
        Err(AppError::Unsupported("create artist"))
    }

    async fn update_artist(&self, _id: &str, _patch: ArtistPatch) -> Envelope<Artist> {
        Err(AppError::Unsupported("update artist"))
    }

    async fn delete_artist(&self, _id: &str) -> Envelope<bool> {
        Err(AppError::Unsupported("delete artist"))
    }

    async fn batch_create_artists(&self, _drafts: Vec<ArtistDraft>) -> Envelope<bool> {
        Err(AppError::Unsupported("batch create artists"))
    }

    async fn batch_delete_artists(&self, _ids: Vec<String>) -> Envelope<bool> {
        Err(AppError::Unsupported("batch delete artists"))
    }

    async fn artist_by_id(&self, id: &str) -> Envelope<Artist> {
        let response: ArtistResponse = self
            .client
            .get("getArtist", &[("id", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(map_artist(
            response.artist,
            &self.client,
        )))
    }

    async fn latest_artists(
        &self,
        _kind: Option<&str>,
        page_size: Option<u32>,
    ) -> Envelope<Vec<Artist>> {
        // Derived from a random album sample; de-duplicated by artist id.
        let albums = self
            .album_list2("random", page_size.unwrap_or(10), None)
            .await?;
        let mut seen = std::collections::HashSet::new();
        let mut artists = Vec::new();
        for album in albums {
            let name = album.artist.clone().unwrap_or_default();
            let id = album.artist.clone().unwrap_or_else(|| album.id.clone());
            if !seen.insert(id.clone()) {
                continue;
            }
            let cover_id = album.cover_art.as_deref().unwrap_or(album.id.as_str());
            artists.push(Artist {
                id,
                name,
                cover: Some(self.client.cover_art_url(cover_id)),
            });
        }
        Ok(SuccessResponse::ok(artists))
    }

    // -- playlists --

    async fn playlists(&self) -> Envelope<Vec<Playlist>> {
        let response: PlaylistsResponse = self.client.get("getPlaylists", &[]).await?;
        let playlists = response
            .playlists
            .and_then(|list| list.playlist)
            .unwrap_or_default();
        Ok(SuccessResponse::ok(
            playlists
                .into_iter()
                .map(|playlist| map_playlist(playlist, Vec::new()))
                .collect(),
        ))
    }

    async fn playlist_by_id(&self, id: &str) -> Envelope<Playlist> {
        let response: PlaylistResponse = self
            .client
            .get("getPlaylist", &[("id", id.to_string())])
            .await?;
        let mut playlist = response.playlist;
        let entries = playlist.entry.take().unwrap_or_default();
        let tracks = self.map_songs_with_lyrics(entries).await;
        Ok(SuccessResponse::ok(map_playlist(playlist, tracks)))
    }

    async fn create_playlist(&self, name: &str) -> Envelope<Playlist> {
        let response: PlaylistResponse = self
            .client
            .get("createPlaylist", &[("name", name.to_string())])
            .await?;
        Ok(SuccessResponse::ok(map_playlist(
            response.playlist,
            Vec::new(),
        )))
    }

    async fn rename_playlist(&self, id: &str, name: &str) -> Envelope<Playlist> {
        self.client
            .post::<PingResponse>(
                "updatePlaylist",
                &[("playlistId", id.to_string()), ("name", name.to_string())],
            )
            .await?;
        self.playlist_by_id(id).await
    }

    async fn delete_playlist(&self, id: &str) -> Envelope<bool> {
        self.client
            .post::<PingResponse>("deletePlaylist", &[("id", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn add_track_to_playlist(&self, playlist_id: &str, track_id: &str) -> Envelope<bool> {
        self.client
            .post::<PingResponse>(
                "updatePlaylist",
                &[
                    ("playlistId", playlist_id.to_string()),
                    ("songIdToAdd", track_id.to_string()),
                ],
            )
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn remove_playlist_track(&self, playlist_id: &str, position: u32) -> Envelope<bool> {
        self.client
            .post::<PingResponse>(
                "updatePlaylist",
                &[
                    ("playlistId", playlist_id.to_string()),
                    ("songIndexToRemove", position.to_string()),
                ],
            )
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    // -- user --

    async fn add_to_history(&self, track_id: &str, _progress: u32) -> Envelope<bool> {
        self.client
            .get::<PingResponse>(
                "scrobble",
                &[
                    ("id", track_id.to_string()),
                    ("submission", "true".to_string()),
                ],
            )
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn track_history(&self, query: PageQuery) -> Envelope<Paged<HistoryEntry>> {
        // The protocol offers no play history listing; an empty terminal
        // page is the correct "nothing found" shape.
        Ok(SuccessResponse::ok(Paged {
            page_size: query.page_size,
            load_count: query.load_count,
            list: Vec::new(),
            total: 0,
            has_more: false,
        }))
    }

    async fn favorite_tracks(&self, query: PageQuery) -> Envelope<Paged<Track>> {
        let response: StarredResponse = self.client.get("getStarred", &[]).await?;
        let songs = response
            .starred
            .and_then(|starred| starred.song)
            .unwrap_or_default();
        let list = self.map_songs(songs);
        Ok(SuccessResponse::ok(Paged {
            page_size: query.page_size,
            load_count: query.load_count + list.len() as u32,
            total: list.len() as u32,
            has_more: false,
            list,
        }))
    }

    async fn favorite_albums(&self, query: PageQuery) -> Envelope<Paged<Album>> {
        let response: StarredResponse = self.client.get("getStarred", &[]).await?;
        let albums = response
            .starred
            .and_then(|starred| starred.album)
            .unwrap_or_default();
        let list: Vec<Album> = albums
            .into_iter()
            .map(|album| map_album(album, &self.client))
            .collect();
        Ok(SuccessResponse::ok(Paged {
            page_size: query.page_size,
            load_count: query.load_count + list.len() as u32,
            total: list.len() as u32,
            has_more: false,
            list,
        }))
    }

    async fn like_track(&self, id: &str) -> Envelope<bool> {
        self.client
            .get::<PingResponse>("star", &[("id", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn unlike_track(&self, id: &str) -> Envelope<bool> {
        self.client
            .get::<PingResponse>("unstar", &[("id", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn like_album(&self, id: &str) -> Envelope<bool> {
        self.client
            .get::<PingResponse>("star", &[("albumId", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn unlike_album(&self, id: &str) -> Envelope<bool> {
        self.client
            .get::<PingResponse>("unstar", &[("albumId", id.to_string())])
            .await?;
        Ok(SuccessResponse::ok(true))
    }

    async fn user_list(&self) -> Envelope<Vec<User>> {
        let response: UsersResponse = self.client.get("getUsers", &[]).await?;
        let users = response
            .users
            .and_then(|list| list.user)
            .unwrap_or_default();
        Ok(SuccessResponse::ok(
            users.into_iter().map(map_user).collect(),
        ))
    }

    // -- auth --

    async fn login(&self, credentials: Credentials) -> Envelope<Option<AuthSession>> {
        // The real authentication happens per request; login is a reachability
        // check plus a best-effort profile fetch.
        self.client.get::<PingResponse>("ping", &[]).await?;

        let username = if credentials.username.is_empty() {
            self.client.config().username.clone()
        } else {
            credentials.username
        };

        let user = match self
            .client
            .get::<UserResponse>("getUser", &[("username", username.clone())])
            .await
        {
            Ok(response) => map_user(response.user),
            Err(err) => {
                log::debug!("getUser failed, falling back to configured name: {}", err);
                User {
                    id: username.clone(),
                    username,
                    email: None,
                    is_admin: false,
                }
            }
        };

        Ok(SuccessResponse::ok(Some(AuthSession {
            user,
            token: None,
            device_name: credentials.device_name,
        })))
    }

    async fn register(&self, _credentials: Credentials) -> Envelope<Option<AuthSession>> {
        Err(AppError::Unsupported("register"))
    }

    async fn check(&self) -> Envelope<bool> {
        match self.client.get::<PingResponse>("ping", &[]).await {
            Ok(_) => Ok(SuccessResponse::ok(true)),
            Err(err) => {
                log::debug!("Subsonic ping failed: {}", err);
                Ok(SuccessResponse::ok(false))
            }
        }
    }

    async fn hello(&self) -> Envelope<String> {
        Ok(SuccessResponse::ok(
            "Hello from the Subsonic source".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> SubsonicAdapter {
        SubsonicAdapter::new(SubsonicConfig {
            base_url: "http://music.invalid".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            client_name: None,
        })
    }

    // Writes must reject before any network I/O: these all resolve
    // immediately even though the configured host does not exist.

    #[tokio::test]
    async fn track_writes_are_unsupported() {
        let adapter = adapter();
        assert!(matches!(
            adapter.create_track(TrackDraft::default()).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.update_track("1", TrackPatch::default()).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.delete_track("1", false).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.batch_create_tracks(Vec::new()).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.batch_delete_tracks(Vec::new()).await,
            Err(AppError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn album_and_artist_writes_are_unsupported() {
        let adapter = adapter();
        assert!(matches!(
            adapter.create_album(AlbumDraft::default()).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.delete_album("1").await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.batch_delete_albums(Vec::new()).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.create_artist(ArtistDraft::default()).await,
            Err(AppError::Unsupported(_))
        ));
        assert!(matches!(
            adapter.update_artist("1", ArtistPatch::default()).await,
            Err(AppError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn register_is_unsupported_and_distinct_from_transport() {
        let adapter = adapter();
        let err = adapter
            .register(Credentials::default())
            .await
            .expect_err("register must reject");
        assert_eq!(err.kind(), "unsupported");
    }

    #[test]
    fn artist_paging_is_monotonic_and_terminal() {
        let adapter = adapter();
        let artists: Vec<SubsonicArtist> = (0..25)
            .map(|number| SubsonicArtist {
                id: format!("ar-{number}"),
                name: format!("Artist {number}"),
                ..SubsonicArtist::default()
            })
            .collect();

        let first = adapter.artist_page(
            artists.clone(),
            PageQuery {
                page_size: 10,
                load_count: 0,
            },
        );
        assert_eq!(first.list.len(), 10);
        assert_eq!(first.load_count, 10);
        assert_eq!(first.total, 25);
        assert!(first.has_more);

        let last = adapter.artist_page(
            artists,
            PageQuery {
                page_size: 10,
                load_count: 20,
            },
        );
        assert_eq!(last.list.len(), 5);
        assert_eq!(last.load_count, 25);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn login_against_unreachable_server_is_a_transport_error() {
        // Grab a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let adapter = SubsonicAdapter::new(SubsonicConfig {
            base_url: format!("http://{addr}"),
            username: "a".to_string(),
            password: "b".to_string(),
            client_name: None,
        });

        let err = adapter
            .login(Credentials {
                username: "a".to_string(),
                password: "b".to_string(),
                device_name: None,
            })
            .await
            .expect_err("unreachable server must fail");
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn history_listing_is_an_empty_terminal_page() {
        let adapter = adapter();
        let page = adapter
            .track_history(PageQuery {
                page_size: 20,
                load_count: 40,
            })
            .await
            .unwrap()
            .data;
        assert!(page.list.is_empty());
        assert_eq!(page.total, 0);
        assert!(!page.has_more);
        assert!(page.load_count >= 40);
    }
}
