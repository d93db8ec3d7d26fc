use crate::config::SourceKind;
use crate::error::AppError;
use crate::events;
use crate::source::contract::Credentials;
use crate::source::manager;
use crate::source::models::{AuthSession, SuccessResponse};
use crate::source::native::NativeConfig;
use crate::source::subsonic::SubsonicConfig;
use crate::AppState;
use serde::Serialize;
use std::time::Duration;
use tauri::{AppHandle, Emitter, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeState {
    Validating,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub state: ProbeState,
    pub message: Option<String>,
}

#[tauri::command]
pub async fn login(
    app: AppHandle,
    state: State<'_, AppState>,
    credentials: Credentials,
) -> Result<SuccessResponse<Option<AuthSession>>, AppError> {
    let mut credentials = credentials;
    if credentials.device_name.is_none() {
        credentials.device_name = Some(format!("Echoplay-{}", uuid::Uuid::new_v4()));
    }
    let response = manager::adapter().login(credentials).await?;

    if response.code == 401 {
        // Denied access forces a logout instead of a silent retry.
        log::warn!("Login rejected by the server, clearing session");
        let mut config = state.config.write().await;
        config.clear_session();
        if let Err(err) = config.save() {
            log::error!("Failed to persist cleared session: {}", err);
        }
        let _ = app.emit(
            events::AUTH_STATE_CHANGED,
            events::AuthStatePayload {
                authenticated: false,
                username: None,
            },
        );
        return Ok(response);
    }

    if let Some(session) = response.data.as_ref().filter(|_| response.is_ok()) {
        let mut config = state.config.write().await;
        if config.source == SourceKind::Native {
            config.native_token = session.token.clone();
            // Rebind so subsequent calls carry the fresh session token.
            manager::bind_native(NativeConfig {
                base_url: config.native_base_url.clone(),
                token: config.native_token.clone(),
            });
        }
        if let Err(err) = config.save() {
            log::error!("Failed to persist session: {}", err);
        }
        let _ = app.emit(
            events::AUTH_STATE_CHANGED,
            events::AuthStatePayload {
                authenticated: true,
                username: Some(session.user.username.clone()),
            },
        );
    }

    Ok(response)
}

#[tauri::command]
pub async fn register(
    credentials: Credentials,
) -> Result<SuccessResponse<Option<AuthSession>>, AppError> {
    manager::adapter().register(credentials).await
}

#[tauri::command]
pub async fn logout(app: AppHandle, state: State<'_, AppState>) -> Result<(), AppError> {
    let mut config = state.config.write().await;
    config.clear_session();
    config.save()?;
    let _ = app.emit(
        events::AUTH_STATE_CHANGED,
        events::AuthStatePayload {
            authenticated: false,
            username: None,
        },
    );
    Ok(())
}

/// Connectivity probe with a bounded wait. The UI shows validating while
/// this runs, then whichever terminal state comes back.
#[tauri::command]
pub async fn probe_server(timeout_secs: Option<u64>) -> Result<ProbeResult, AppError> {
    let wait = Duration::from_secs(timeout_secs.unwrap_or(5).clamp(1, 30));
    match tokio::time::timeout(wait, manager::adapter().check()).await {
        Err(_) => Ok(ProbeResult {
            state: ProbeState::Error,
            message: Some("Connection timed out".to_string()),
        }),
        Ok(Err(err)) => Ok(ProbeResult {
            state: ProbeState::Error,
            message: Some(err.to_string()),
        }),
        Ok(Ok(response)) if response.data => Ok(ProbeResult {
            state: ProbeState::Success,
            message: None,
        }),
        Ok(Ok(response)) => Ok(ProbeResult {
            state: ProbeState::Error,
            message: Some(response.message),
        }),
    }
}

#[tauri::command]
pub async fn server_greeting() -> Result<SuccessResponse<String>, AppError> {
    manager::adapter().hello().await
}

#[tauri::command]
pub async fn get_active_source() -> Result<SourceKind, AppError> {
    Ok(manager::active_kind())
}

#[tauri::command]
pub async fn use_native_source(
    state: State<'_, AppState>,
    base_url: String,
) -> Result<SourceKind, AppError> {
    let mut config = state.config.write().await;
    config.source = SourceKind::Native;
    config.native_base_url = base_url.clone();
    config.save()?;

    manager::bind_native(NativeConfig {
        base_url,
        token: config.native_token.clone(),
    });
    Ok(SourceKind::Native)
}

#[tauri::command]
pub async fn use_subsonic_source(
    state: State<'_, AppState>,
    base_url: String,
    username: String,
    password: String,
) -> Result<SourceKind, AppError> {
    let mut config = state.config.write().await;
    config.source = SourceKind::Subsonic;
    config.subsonic_base_url = base_url.clone();
    config.subsonic_username = username.clone();
    config.subsonic_password = password.clone();
    config.save()?;

    manager::bind_subsonic(SubsonicConfig {
        base_url,
        username,
        password,
        client_name: Some(config.client_name.clone()),
    });
    Ok(SourceKind::Subsonic)
}
