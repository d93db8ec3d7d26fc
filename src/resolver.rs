use crate::cache::{cache_key, CacheManager};
use crate::source::models::Track;
use crate::source::SourceKind;

pub struct ResolveOptions {
    pub cache_enabled: bool,
    pub base_url: String,
    pub token: Option<String>,
}

/// Outcome of resolving a track to a playable URI. The URI is usable
/// immediately; `download` is the optional background cache fill, which the
/// caller may await or drop.
pub struct ResolvedTrack {
    pub uri: String,
    pub download: Option<tauri::async_runtime::JoinHandle<Option<String>>>,
}

/// Resolve a track for playback without ever blocking on the network: a
/// cache hit yields the local URI, a miss yields the remote URI right away
/// while the cache fills in the background. Cache trouble degrades to
/// remote streaming, it is never surfaced to the playback path.
pub fn resolve_track_uri(
    cache: &CacheManager,
    kind: SourceKind,
    track: &Track,
    options: &ResolveOptions,
) -> ResolvedTrack {
    if track.path.is_empty() {
        log::warn!("Track {} has no playable path", track.id);
        return ResolvedTrack {
            uri: String::new(),
            download: None,
        };
    }

    let remote = remote_uri(&options.base_url, &track.path);
    if !options.cache_enabled || track.id.is_empty() {
        return ResolvedTrack {
            uri: remote,
            download: None,
        };
    }

    let key = cache_key(kind, &track.id);
    if let Some(local) = cache.check(&key, &track.path) {
        return ResolvedTrack {
            uri: local,
            download: None,
        };
    }

    let cache = cache.clone();
    let url = remote.clone();
    let token = options.token.clone();
    let handle = tauri::async_runtime::spawn(async move {
        let result = cache.download(&key, &url, token).await;
        if result.is_none() {
            log::debug!("Background cache fill for {} produced no entry", key);
        }
        result
    });

    ResolvedTrack {
        uri: remote,
        download: Some(handle),
    }
}

fn remote_uri(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, path: &str) -> Track {
        Track {
            id: id.to_string(),
            name: "Song".to_string(),
            artist: String::new(),
            album: None,
            album_id: None,
            duration: 0,
            path: path.to_string(),
            cover: None,
            lyrics: None,
            liked: false,
        }
    }

    fn temp_cache() -> CacheManager {
        let dir = std::env::temp_dir().join(format!("echoplay-resolver-{}", uuid::Uuid::new_v4()));
        CacheManager::new(dir).unwrap()
    }

    #[test]
    fn relative_paths_join_the_base_url() {
        assert_eq!(
            remote_uri("http://api.local:3000/", "/music/1.mp3"),
            "http://api.local:3000/music/1.mp3"
        );
        assert_eq!(
            remote_uri("http://api.local:3000", "music/1.mp3"),
            "http://api.local:3000/music/1.mp3"
        );
        assert_eq!(
            remote_uri("http://api.local", "https://cdn.local/1.mp3"),
            "https://cdn.local/1.mp3"
        );
    }

    #[test]
    fn disabled_cache_resolves_straight_to_remote() {
        let cache = temp_cache();
        let options = ResolveOptions {
            cache_enabled: false,
            base_url: "http://api.local".to_string(),
            token: None,
        };
        let resolved = resolve_track_uri(&cache, SourceKind::Native, &track("1", "/m/1.mp3"), &options);
        assert_eq!(resolved.uri, "http://api.local/m/1.mp3");
        assert!(resolved.download.is_none());
    }

    #[test]
    fn cache_hit_resolves_locally_without_a_download() {
        let cache = temp_cache();
        std::fs::write(cache.dir().join("native-9.mp3"), b"audio").unwrap();

        let options = ResolveOptions {
            cache_enabled: true,
            base_url: "http://api.local".to_string(),
            token: None,
        };
        let resolved = resolve_track_uri(&cache, SourceKind::Native, &track("9", "/m/9.mp3"), &options);
        assert_eq!(resolved.uri, "media://native-9.mp3");
        assert!(resolved.download.is_none());
    }

    #[test]
    fn missing_path_resolves_to_nothing() {
        let cache = temp_cache();
        let options = ResolveOptions {
            cache_enabled: true,
            base_url: "http://api.local".to_string(),
            token: None,
        };
        let resolved = resolve_track_uri(&cache, SourceKind::Native, &track("3", ""), &options);
        assert_eq!(resolved.uri, "");
        assert!(resolved.download.is_none());
    }
}
