mod cache;
mod commands;
mod config;
mod error;
mod events;
mod resolver;
mod source;

use cache::CacheManager;
use config::{AppConfig, SourceKind};
use source::manager;
use source::native::NativeConfig;
use source::subsonic::SubsonicConfig;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<AppConfig>>,
    pub cache: CacheManager,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("echoplay=info"))
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        let default_config = AppConfig::default();
        // Save defaults so the config file exists for next launch
        if let Err(save_err) = default_config.save() {
            log::error!("Failed to save default config: {}", save_err);
        }
        default_config
    });

    // Bind the source recorded in config before the UI issues its first call.
    match config.source {
        SourceKind::Native => manager::bind_native(NativeConfig {
            base_url: config.native_base_url.clone(),
            token: config.native_token.clone(),
        }),
        SourceKind::Subsonic => manager::bind_subsonic(SubsonicConfig {
            base_url: config.subsonic_base_url.clone(),
            username: config.subsonic_username.clone(),
            password: config.subsonic_password.clone(),
            client_name: Some(config.client_name.clone()),
        }),
    }

    let cache_dir = AppConfig::cache_dir().expect("Cache directory is unavailable");
    let cache = CacheManager::new(cache_dir).expect("Failed to initialize the audio cache");
    log::info!("Audio cache at {}", cache.dir().display());

    let app_state = AppState {
        config: Arc::new(RwLock::new(config)),
        cache: cache.clone(),
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(app_state)
        .register_uri_scheme_protocol("media", move |_ctx, request| serve_media(&cache, request))
        .invoke_handler(tauri::generate_handler![
            // Tracks
            commands::source_commands::get_track_list,
            commands::source_commands::get_track_table_list,
            commands::source_commands::load_more_tracks,
            commands::source_commands::create_track,
            commands::source_commands::update_track,
            commands::source_commands::delete_track,
            commands::source_commands::batch_create_tracks,
            commands::source_commands::batch_delete_tracks,
            commands::source_commands::get_latest_tracks,
            commands::source_commands::get_tracks_by_artist,
            // Albums
            commands::source_commands::get_album_list,
            commands::source_commands::get_album_table_list,
            commands::source_commands::load_more_albums,
            commands::source_commands::create_album,
            commands::source_commands::update_album,
            commands::source_commands::delete_album,
            commands::source_commands::batch_create_albums,
            commands::source_commands::batch_delete_albums,
            commands::source_commands::get_recommended_albums,
            commands::source_commands::get_recent_albums,
            commands::source_commands::get_album_by_id,
            commands::source_commands::get_album_tracks,
            commands::source_commands::get_albums_by_artist,
            // Artists
            commands::source_commands::get_artist_list,
            commands::source_commands::get_artist_table_list,
            commands::source_commands::load_more_artists,
            commands::source_commands::create_artist,
            commands::source_commands::update_artist,
            commands::source_commands::delete_artist,
            commands::source_commands::batch_create_artists,
            commands::source_commands::batch_delete_artists,
            commands::source_commands::get_artist_by_id,
            commands::source_commands::get_latest_artists,
            // Playlists
            commands::playlist_commands::get_playlists,
            commands::playlist_commands::get_playlist,
            commands::playlist_commands::create_playlist,
            commands::playlist_commands::rename_playlist,
            commands::playlist_commands::delete_playlist,
            commands::playlist_commands::add_to_playlist,
            commands::playlist_commands::remove_from_playlist,
            // User
            commands::user_commands::add_to_history,
            commands::user_commands::get_track_history,
            commands::user_commands::get_favorite_tracks,
            commands::user_commands::get_favorite_albums,
            commands::user_commands::like_track,
            commands::user_commands::unlike_track,
            commands::user_commands::like_album,
            commands::user_commands::unlike_album,
            commands::user_commands::get_user_list,
            // Auth + source switching
            commands::auth_commands::login,
            commands::auth_commands::register,
            commands::auth_commands::logout,
            commands::auth_commands::probe_server,
            commands::auth_commands::server_greeting,
            commands::auth_commands::get_active_source,
            commands::auth_commands::use_native_source,
            commands::auth_commands::use_subsonic_source,
            // Cache
            commands::cache_commands::check_cache,
            commands::cache_commands::download_track,
            commands::cache_commands::get_cache_size,
            commands::cache_commands::clear_cache,
            commands::cache_commands::resolve_track,
            // Player relay
            commands::player_commands::update_player_state,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// `media://{key}{ext}` maps to the corresponding cache file. Missing
/// entries answer 404 so a stale URI degrades instead of crashing the
/// audio element.
fn serve_media(
    cache: &CacheManager,
    request: tauri::http::Request<Vec<u8>>,
) -> tauri::http::Response<Vec<u8>> {
    let uri = request.uri();
    // The file name arrives as the host on some platforms and as the path
    // on others.
    let raw = format!("{}{}", uri.host().unwrap_or_default(), uri.path());
    let resource = urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw);

    let Some(file) = cache.resolve(&resource) else {
        log::warn!("Media file not found: {}", resource);
        return tauri::http::Response::builder()
            .status(404)
            .body(b"File Not Found".to_vec())
            .unwrap_or_default();
    };

    match std::fs::read(&file) {
        Ok(bytes) => tauri::http::Response::builder()
            .status(200)
            .header("Content-Type", cache::content_type(&resource))
            .body(bytes)
            .unwrap_or_default(),
        Err(err) => {
            log::error!("Failed to read cached media {}: {}", file.display(), err);
            tauri::http::Response::builder()
                .status(404)
                .body(Vec::new())
                .unwrap_or_default()
        }
    }
}
