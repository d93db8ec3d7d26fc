use crate::error::{AppError, AppResult};
use crate::source::SourceKind;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use futures_util::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;

const DEFAULT_EXTENSION: &str = ".mp3";
const USER_AGENT: &str = "Echoplay-Desktop";

type DownloadFuture = Shared<BoxFuture<'static, Option<String>>>;

/// Cache keys are namespaced by source so a Subsonic string id and a native
/// integer id can never collide across a backend switch.
pub fn cache_key(kind: SourceKind, track_id: &str) -> String {
    format!("{}-{}", kind.as_str(), sanitize(track_id))
}

fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

fn media_uri(file_name: &str) -> String {
    format!("media://{file_name}")
}

/// File extension of the track's original path, with a sane default.
fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Same, but for the remote URL: the extension lives on the URL path, not
/// in the query string.
fn remote_extension(url: &str) -> String {
    url::Url::parse(url)
        .map(|parsed| extension_of(parsed.path()))
        .unwrap_or_else(|_| DEFAULT_EXTENSION.to_string())
}

pub fn content_type(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "flac" => "audio/flac",
        "ogg" | "oga" | "opus" => "audio/ogg",
        "m4a" | "mp4" | "m4b" => "audio/mp4",
        "aac" => "audio/aac",
        "wav" => "audio/wav",
        _ => "audio/mpeg",
    }
}

struct CacheInner {
    dir: PathBuf,
    http: reqwest::Client,
    /// At-most-one transfer per key: concurrent callers for the same key
    /// are handed the same in-flight completion.
    in_flight: Mutex<HashMap<String, DownloadFuture>>,
}

/// On-disk audio cache. Downloads stage into `<final>.tmp` and only an
/// atomic rename of a confirmed non-empty file produces a cache entry, so a
/// failure at any point leaves no artifact behind.
#[derive(Clone)]
pub struct CacheManager {
    inner: Arc<CacheInner>,
}

impl CacheManager {
    pub fn new(dir: PathBuf) -> AppResult<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            inner: Arc::new(CacheInner {
                dir,
                http: reqwest::Client::new(),
                in_flight: Mutex::new(HashMap::new()),
            }),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Local URI for a cached track, or `None` on a miss. A zero-byte file
    /// counts as a miss: a crash mid-write must not poison playback.
    pub fn check(&self, key: &str, original_path: &str) -> Option<String> {
        let file_name = format!("{key}{}", extension_of(original_path));
        let path = self.inner.dir.join(&file_name);
        let hit = std::fs::metadata(&path)
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false);
        log::debug!(
            "Cache check for {}: {}",
            key,
            if hit { "HIT" } else { "MISS" }
        );
        hit.then(|| media_uri(&file_name))
    }

    /// Fetch `url` into the cache under `key`. Resolves to the local URI on
    /// success and `None` on any failure — callers fall back to the remote
    /// URL, so a cache problem is never a playback error. Concurrent calls
    /// for one key share a single transfer; the in-flight registration is
    /// dropped once the operation settles either way.
    pub async fn download(&self, key: &str, url: &str, token: Option<String>) -> Option<String> {
        let pending = {
            let mut in_flight = self.inner.in_flight.lock().unwrap();
            if let Some(existing) = in_flight.get(key) {
                log::debug!("Joining in-flight download for {}", key);
                existing.clone()
            } else {
                let manager = self.clone();
                let key_owned = key.to_string();
                let url = url.to_string();
                let future: DownloadFuture = async move {
                    let outcome = match manager.transfer(&key_owned, &url, token.as_deref()).await
                    {
                        Ok(uri) => Some(uri),
                        Err(err) => {
                            log::error!("Cache download failed for {}: {}", key_owned, err);
                            None
                        }
                    };
                    manager
                        .inner
                        .in_flight
                        .lock()
                        .unwrap()
                        .remove(&key_owned);
                    outcome
                }
                .boxed()
                .shared();
                in_flight.insert(key.to_string(), future.clone());
                future
            }
        };
        pending.await
    }

    async fn transfer(&self, key: &str, url: &str, token: Option<&str>) -> AppResult<String> {
        let file_name = format!("{key}{}", remote_extension(url));
        let final_path = self.inner.dir.join(&file_name);
        if final_path.exists() {
            return Ok(media_uri(&file_name));
        }

        let tmp_path = self.inner.dir.join(format!("{file_name}.tmp"));
        log::info!("Starting cache download for {}: {}", key, url);

        let staged = self.fetch_to_temp(url, token, &tmp_path).await;
        let finished = match staged {
            Ok(written) => tokio::fs::rename(&tmp_path, &final_path)
                .await
                .map_err(AppError::from)
                .map(|_| written),
            Err(err) => Err(err),
        };

        match finished {
            Ok(written) => {
                log::info!("Cached {} ({} bytes)", file_name, written);
                Ok(media_uri(&file_name))
            }
            Err(err) => {
                let _ = tokio::fs::remove_file(&tmp_path).await;
                Err(err)
            }
        }
    }

    async fn fetch_to_temp(
        &self,
        url: &str,
        token: Option<&str>,
        tmp_path: &Path,
    ) -> AppResult<u64> {
        let mut request = self
            .inner
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: format!("Audio fetch failed with status {status}"),
            });
        }

        let mut file = tokio::fs::File::create(tmp_path).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);

        if written == 0 {
            return Err(AppError::Cache("Downloaded file is empty".to_string()));
        }
        Ok(written)
    }

    /// Total bytes on disk. There is no partial eviction: the cache grows
    /// until the user clears it.
    pub fn size(&self) -> u64 {
        let Ok(entries) = std::fs::read_dir(&self.inner.dir) else {
            return 0;
        };
        entries
            .flatten()
            .filter_map(|entry| entry.metadata().ok())
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
            .sum()
    }

    pub fn clear(&self) -> AppResult<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.inner.dir)?.flatten() {
            let path = entry.path();
            if path.is_file() && std::fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        log::info!("Cleared audio cache ({} files)", removed);
        Ok(removed)
    }

    /// Resolve a `media://` resource name to its cache file. Anything that
    /// is not a plain file name inside the cache directory is rejected.
    pub fn resolve(&self, resource: &str) -> Option<PathBuf> {
        let name = resource.trim_matches('/');
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        let path = self.inner.dir.join(name);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt as _};

    fn temp_cache() -> CacheManager {
        let dir = std::env::temp_dir().join(format!("echoplay-cache-{}", uuid::Uuid::new_v4()));
        CacheManager::new(dir).unwrap()
    }

    fn entries_for(cache: &CacheManager, key: &str) -> Vec<String> {
        std::fs::read_dir(cache.dir())
            .unwrap()
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(key))
            .collect()
    }

    /// Minimal HTTP responder; counts accepted connections.
    async fn serve(body: Vec<u8>, hits: Arc<AtomicUsize>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                hits.fetch_add(1, Ordering::SeqCst);
                let body = body.clone();
                tokio::spawn(async move {
                    let mut buffer = [0u8; 2048];
                    let _ = socket.read(&mut buffer).await;
                    let header = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = socket.write_all(header.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{addr}/stream/track.mp3")
    }

    #[test]
    fn cache_keys_are_namespaced_by_source() {
        assert_eq!(cache_key(SourceKind::Native, "42"), "native-42");
        assert_eq!(cache_key(SourceKind::Subsonic, "tr/42"), "subsonic-tr_42");
        assert_ne!(
            cache_key(SourceKind::Native, "42"),
            cache_key(SourceKind::Subsonic, "42")
        );
    }

    #[test]
    fn zero_byte_file_is_a_miss() {
        let cache = temp_cache();
        let path = cache.dir().join("native-1.mp3");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(cache.check("native-1", "/music/1.mp3"), None);

        std::fs::write(&path, b"audio").unwrap();
        assert_eq!(
            cache.check("native-1", "/music/1.mp3").as_deref(),
            Some("media://native-1.mp3")
        );
    }

    #[test]
    fn extension_follows_the_original_path() {
        let cache = temp_cache();
        std::fs::write(cache.dir().join("native-2.flac"), b"audio").unwrap();
        assert_eq!(
            cache.check("native-2", "/library/2.flac").as_deref(),
            Some("media://native-2.flac")
        );
        // No extension on the path falls back to .mp3.
        assert_eq!(cache.check("native-2", "/library/2"), None);
    }

    #[tokio::test]
    async fn concurrent_downloads_for_one_key_share_a_transfer() {
        let cache = temp_cache();
        let hits = Arc::new(AtomicUsize::new(0));
        let url = serve(b"audio-bytes".to_vec(), Arc::clone(&hits)).await;

        let (first, second) = tokio::join!(
            cache.download("subsonic-tr9", &url, None),
            cache.download("subsonic-tr9", &url, None)
        );

        assert_eq!(first.as_deref(), Some("media://subsonic-tr9.mp3"));
        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let cached = std::fs::read(cache.dir().join("subsonic-tr9.mp3")).unwrap();
        assert_eq!(cached, b"audio-bytes");
        assert!(cache.inner.in_flight.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_body_leaves_no_artifacts() {
        let cache = temp_cache();
        let hits = Arc::new(AtomicUsize::new(0));
        let url = serve(Vec::new(), Arc::clone(&hits)).await;

        let result = cache.download("native-7", &url, None).await;
        assert_eq!(result, None);
        assert!(entries_for(&cache, "native-7").is_empty());
        assert!(cache.inner.in_flight.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_leaves_no_artifacts() {
        let cache = temp_cache();
        // Grab a port that nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/track.mp3");
        let result = cache.download("native-8", &url, Some("token".to_string())).await;
        assert_eq!(result, None);
        assert!(entries_for(&cache, "native-8").is_empty());
    }

    #[tokio::test]
    async fn repeat_download_reuses_the_cache_entry() {
        let cache = temp_cache();
        let hits = Arc::new(AtomicUsize::new(0));
        let url = serve(b"bytes".to_vec(), Arc::clone(&hits)).await;

        let first = cache.download("native-3", &url, None).await;
        let second = cache.download("native-3", &url, None).await;
        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn size_and_clear_cover_the_whole_directory() {
        let cache = temp_cache();
        std::fs::write(cache.dir().join("native-4.mp3"), vec![0u8; 100]).unwrap();
        std::fs::write(cache.dir().join("subsonic-a.flac"), vec![0u8; 50]).unwrap();
        assert_eq!(cache.size(), 150);

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn media_resolution_rejects_escapes() {
        let cache = temp_cache();
        std::fs::write(cache.dir().join("native-5.mp3"), b"audio").unwrap();

        assert!(cache.resolve("native-5.mp3").is_some());
        assert!(cache.resolve("/native-5.mp3").is_some());
        assert!(cache.resolve("missing.mp3").is_none());
        assert!(cache.resolve("../config.json").is_none());
        assert!(cache.resolve("a/b.mp3").is_none());
    }
}
