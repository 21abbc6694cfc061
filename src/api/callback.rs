use axum::{
    Extension, Json,
    extract::{Query, rejection::QueryRejection},
    response::{Html, IntoResponse, Redirect, Response},
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    server::AppState,
    spotify,
    types::LoginOrigin,
    warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

pub async fn login(Extension(state): Extension<AppState>) -> Result<Redirect> {
    let url = spotify::auth::begin_login(
        &state.settings.spotify,
        &state.pending_logins,
        LoginOrigin::Browser,
    )
    .await?;
    Ok(Redirect::to(url.as_str()))
}

pub async fn callback(
    Query(params): Query<CallbackQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Response> {
    if let Some(error) = params.error {
        return Err(Error::BadRequest(format!("authorization denied: {error}")));
    }
    let (Some(code), Some(login_state)) = (params.code, params.state) else {
        return Err(Error::BadRequest("missing code or state".into()));
    };

    // Take the verifier so each login can complete once
    let Some(pending) = state.pending_logins.lock().await.remove(&login_state) else {
        return Err(Error::BadRequest("unknown login state".into()));
    };
    if pending.created_at.elapsed() > spotify::auth::PENDING_LOGIN_TTL {
        return Err(Error::BadRequest("login expired, start again".into()));
    }

    let token = spotify::auth::exchange_code_pkce(
        &state.http,
        &state.settings.spotify,
        &code,
        &pending.code_verifier,
    )
    .await
    .map_err(|e| {
        warning!("Token exchange failed: {}", e);
        Error::Spotify(e)
    })?;

    match pending.origin {
        LoginOrigin::Cli => {
            *state.cli_token.lock().await = Some(token);
            Ok(
                Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
                    .into_response(),
            )
        }
        LoginOrigin::Browser => {
            let home = format!("{}/home", state.settings.frontend_url.trim_end_matches('/'));
            let url = Url::parse_with_params(
                &home,
                &[
                    ("access_token", token.access_token.as_str()),
                    ("refresh_token", token.refresh_token.as_str()),
                ],
            )
            .map_err(|e| Error::Config(format!("invalid frontend url: {e}")))?;
            Ok(Redirect::to(url.as_str()).into_response())
        }
    }
}

/// Acknowledges a logout. Tokens live only in the client, so there is nothing to revoke.
pub async fn logout() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "logged out" }))
}

pub async fn refresh(
    params: std::result::Result<Query<RefreshQuery>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> Result<Json<RefreshResponse>> {
    let Query(params) = params?;
    let token =
        spotify::auth::refresh_token(&state.http, &state.settings.spotify, &params.refresh_token)
            .await
            .map_err(Error::from_spotify)?;

    Ok(Json(RefreshResponse {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_in: token.expires_in,
    }))
}
