use crate::source::contract::{AlbumTracksQuery, SortOrder};
use crate::source::models::{Album, Artist, Playlist, Track, User};
use crate::source::subsonic::client::SubsonicClient;
use crate::source::subsonic::wire::{
    LyricsResponse, SubsonicAlbum, SubsonicArtist, SubsonicPlaylist, SubsonicSong, SubsonicUser,
};

pub fn map_song(song: SubsonicSong, client: &SubsonicClient, lyrics: Option<String>) -> Track {
    let cover = song
        .cover_art
        .as_deref()
        .or(song.album_id.as_deref())
        .map(|id| client.cover_art_url(id));

    Track {
        path: client.stream_url(&song.id),
        id: song.id,
        name: song.title,
        artist: song.artist.unwrap_or_default(),
        album: song.album,
        album_id: song.album_id,
        duration: song.duration.unwrap_or(0),
        cover,
        lyrics,
        liked: song.starred.is_some(),
    }
}

pub fn map_album(album: SubsonicAlbum, client: &SubsonicClient) -> Album {
    let cover_id = album.cover_art.as_deref().unwrap_or(album.id.as_str());
    let cover = Some(client.cover_art_url(cover_id));
    Album {
        id: album.id,
        name: album.name,
        artist: album.artist.unwrap_or_default(),
        cover,
    }
}

pub fn map_artist(artist: SubsonicArtist, client: &SubsonicClient) -> Artist {
    let cover = artist
        .cover_art
        .as_deref()
        .map(|id| client.cover_art_url(id))
        .or(artist.artist_image_url);
    Artist {
        id: artist.id,
        name: artist.name,
        cover,
    }
}

pub fn map_playlist(playlist: SubsonicPlaylist, tracks: Vec<Track>) -> Playlist {
    Playlist {
        track_count: playlist.song_count.unwrap_or(tracks.len() as u32),
        id: playlist.id,
        name: playlist.name,
        tracks,
    }
}

/// Subsonic has no numeric user ids; the username is the identity.
pub fn map_user(user: SubsonicUser) -> User {
    User {
        id: user.username.clone(),
        username: user.username,
        email: user.email,
        is_admin: user.admin_role.unwrap_or(false),
    }
}

/// Canonical lyrics text: one `[mm:ss.mmm]text` line per structured entry,
/// or the legacy plain blob. `None` when nothing usable is present — never
/// an empty string.
pub fn format_lyrics(response: &LyricsResponse) -> Option<String> {
    let structured = response
        .lyrics_list
        .as_ref()
        .and_then(|list| list.structured_lyrics.as_ref())
        .and_then(|all| all.first())
        .and_then(|lyrics| lyrics.line.as_ref());

    if let Some(lines) = structured {
        let rendered = lines
            .iter()
            .map(|line| {
                format!(
                    "{}{}",
                    format_timestamp(line.start.unwrap_or(0)),
                    line.value.as_deref().unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        if !rendered.is_empty() {
            return Some(rendered);
        }
    }

    response
        .lyrics
        .as_ref()
        .and_then(|legacy| legacy.value.clone())
        .filter(|text| !text.trim().is_empty())
}

/// `[mm:ss.mmm]` tag from a millisecond offset, fields padded to 2/2/3.
fn format_timestamp(total_ms: u64) -> String {
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;
    format!("[{:02}:{:02}.{:03}]", minutes, seconds, millis)
}

pub fn page_window<T>(items: Vec<T>, skip: usize, page_size: usize) -> Vec<T> {
    items.into_iter().skip(skip).take(page_size).collect()
}

/// `getAlbum` always returns the full song list, so the window is cut
/// locally. `total` is the album's full song count, reported before any
/// keyword filtering.
pub fn page_album_songs(
    songs: Vec<SubsonicSong>,
    query: &AlbumTracksQuery,
) -> (Vec<SubsonicSong>, u32) {
    let total = songs.len() as u32;

    let mut songs = songs;
    if let Some(keyword) = query
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
    {
        let needle = keyword.to_lowercase();
        songs.retain(|song| song.title.to_lowercase().contains(&needle));
    }

    songs.sort_by_key(|song| song.track.unwrap_or(u32::MAX));
    if query.sort == SortOrder::Desc {
        songs.reverse();
    }

    let list = page_window(songs, query.skip as usize, query.page_size as usize);
    (list, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::subsonic::wire::{LyricLine, LyricsList, StructuredLyrics};

    fn structured(lines: Vec<(u64, &str)>) -> LyricsResponse {
        LyricsResponse {
            lyrics_list: Some(LyricsList {
                structured_lyrics: Some(vec![StructuredLyrics {
                    line: Some(
                        lines
                            .into_iter()
                            .map(|(start, value)| LyricLine {
                                start: Some(start),
                                value: Some(value.to_string()),
                            })
                            .collect(),
                    ),
                }]),
            }),
            lyrics: None,
        }
    }

    #[test]
    fn structured_lyrics_get_timestamp_tags() {
        let result = format_lyrics(&structured(vec![(61_234, "hello")]));
        assert_eq!(result.as_deref(), Some("[01:01.234]hello"));
    }

    #[test]
    fn structured_lyrics_pad_every_field() {
        let result = format_lyrics(&structured(vec![(0, "intro"), (754_009, "outro")]));
        assert_eq!(result.as_deref(), Some("[00:00.000]intro\n[12:34.009]outro"));
    }

    #[test]
    fn legacy_blob_passes_through() {
        let response = LyricsResponse {
            lyrics_list: None,
            lyrics: Some(crate::source::subsonic::wire::LegacyLyrics {
                value: Some("just words".to_string()),
            }),
        };
        assert_eq!(format_lyrics(&response).as_deref(), Some("just words"));
    }

    #[test]
    fn missing_lyrics_are_none_not_empty() {
        assert_eq!(format_lyrics(&LyricsResponse::default()), None);

        let blank = LyricsResponse {
            lyrics_list: None,
            lyrics: Some(crate::source::subsonic::wire::LegacyLyrics {
                value: Some("   ".to_string()),
            }),
        };
        assert_eq!(format_lyrics(&blank), None);
    }

    fn songs(count: u32) -> Vec<SubsonicSong> {
        (1..=count)
            .map(|number| SubsonicSong {
                id: format!("tr-{number}"),
                title: format!("Song {number}"),
                track: Some(number),
                ..SubsonicSong::default()
            })
            .collect()
    }

    #[test]
    fn album_song_window_reports_full_total() {
        let query = AlbumTracksQuery {
            page_size: 20,
            skip: 20,
            sort: SortOrder::Asc,
            keyword: None,
        };
        let (list, total) = page_album_songs(songs(35), &query);

        assert_eq!(total, 35);
        assert_eq!(list.len(), 15);
        assert_eq!(list.first().map(|song| song.track), Some(Some(21)));
        assert_eq!(list.last().map(|song| song.track), Some(Some(35)));
    }

    #[test]
    fn album_song_window_sorts_descending() {
        let query = AlbumTracksQuery {
            page_size: 3,
            skip: 0,
            sort: SortOrder::Desc,
            keyword: None,
        };
        let (list, total) = page_album_songs(songs(10), &query);
        assert_eq!(total, 10);
        let numbers: Vec<_> = list.iter().map(|song| song.track.unwrap()).collect();
        assert_eq!(numbers, vec![10, 9, 8]);
    }

    #[test]
    fn keyword_filter_narrows_list_but_not_total() {
        let query = AlbumTracksQuery {
            page_size: 50,
            skip: 0,
            sort: SortOrder::Asc,
            keyword: Some("song 1".to_string()),
        };
        let (list, total) = page_album_songs(songs(12), &query);
        assert_eq!(total, 12);
        // "Song 1" plus "Song 10".."Song 12"
        assert_eq!(list.len(), 4);
    }
}
