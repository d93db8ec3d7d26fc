use crate::source::models::Track;
use serde::{Deserialize, Serialize};

pub const PLAYER_STATE_CHANGED: &str = "player:state-changed";
pub const PLAYER_TRACK_CHANGED: &str = "player:track-changed";
pub const AUTH_STATE_CHANGED: &str = "auth:state-changed";

/// Fire-and-forget player/tray state relayed between shell windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatePayload {
    pub is_playing: bool,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackChangedPayload {
    pub track_id: String,
    pub name: String,
    pub artist: String,
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthStatePayload {
    pub authenticated: bool,
    pub username: Option<String>,
}
