use crate::error::AppError;
use crate::events;
use tauri::{AppHandle, Emitter};

/// Fire-and-forget relay: the playing window reports its state and every
/// other window (tray, mini player, lyrics) hears about it.
#[tauri::command]
pub async fn update_player_state(
    app: AppHandle,
    payload: events::PlayerStatePayload,
) -> Result<(), AppError> {
    if let Some(track) = &payload.track {
        let _ = app.emit(
            events::PLAYER_TRACK_CHANGED,
            events::TrackChangedPayload {
                track_id: track.id.clone(),
                name: track.name.clone(),
                artist: track.artist.clone(),
                duration: track.duration,
            },
        );
    }
    let _ = app.emit(events::PLAYER_STATE_CHANGED, payload);
    Ok(())
}
