use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config::SpotifySettings,
    error::{Error, Result},
    info,
    management::TokenManager,
    server::{self, AppState},
    success,
    types::{LoginOrigin, PendingLogin, Token, TokenResponse},
    utils, warning,
};

/// Logins without a callback after this long are forgotten.
pub const PENDING_LOGIN_TTL: Duration = Duration::from_secs(10 * 60);

/// Builds the Spotify authorization URL for a PKCE login.
///
/// # Arguments
///
/// * `settings` - Client id, redirect URI, scope and authorize endpoint
/// * `state` - Opaque value echoed back on the callback, used to find the verifier
/// * `code_challenge` - S256 challenge derived from the login's code verifier
///
/// # Errors
///
/// Fails with [`Error::Config`] when the configured authorize URL is not a URL.
pub fn authorize_url(settings: &SpotifySettings, state: &str, code_challenge: &str) -> Result<Url> {
    Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", settings.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorize url: {e}")))
}

/// Registers a pending login and returns the URL the user must visit.
///
/// Generates a fresh state and code verifier, remembers the verifier under the
/// state in `pending`, and derives the authorize URL from the verifier's
/// challenge. The callback handler later looks the verifier up by state.
/// Logins older than [`PENDING_LOGIN_TTL`] are dropped on every call.
pub async fn begin_login(
    settings: &SpotifySettings,
    pending: &Mutex<HashMap<String, PendingLogin>>,
    origin: LoginOrigin,
) -> Result<Url> {
    let state = utils::generate_state();
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let url = authorize_url(settings, &state, &code_challenge)?;
    let mut pending = pending.lock().await;
    prune_pending_logins(&mut pending, PENDING_LOGIN_TTL);
    pending.insert(
        state,
        PendingLogin {
            code_verifier,
            origin,
            created_at: Instant::now(),
        },
    );
    Ok(url)
}

/// Removes logins that have waited longer than `max_age` for their callback.
pub fn prune_pending_logins(pending: &mut HashMap<String, PendingLogin>, max_age: Duration) {
    pending.retain(|_, login| login.created_at.elapsed() <= max_age);
}

/// Runs the complete OAuth 2.0 PKCE flow for the command line.
///
/// This function orchestrates the entire authentication process including:
/// 1. Starting the HTTP server so `/callback` is reachable
/// 2. Registering a CLI login with a fresh verifier and state
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the callback to deliver a token
/// 5. Persisting the token for future CLI commands
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - A missing token after the wait period is reported as [`Error::Auth`]
/// - Token persistence failures are reported as [`Error::Store`]
pub async fn auth(state: AppState) -> Result<Token> {
    let server_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_api_server(server_state).await {
            warning!("Login server stopped: {}", e);
        }
    });

    let auth_url =
        begin_login(&state.settings.spotify, &state.pending_logins, LoginOrigin::Cli).await?;

    // Open the authorization URL in the default browser
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for Spotify authorization in the browser...");
    }

    let Some(token) = wait_for_token(Arc::clone(&state.cli_token)).await else {
        return Err(Error::Auth("authentication failed or timed out".into()));
    };

    TokenManager::new(token.clone()).persist().await?;
    success!("Authentication successful!");
    Ok(token)
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared slot once a second for at most 60 seconds. The callback
/// handler fills the slot after a successful exchange of a CLI login.
async fn wait_for_token(slot: Arc<Mutex<Option<Token>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let mut lock = slot.lock().await;
        if let Some(token) = lock.take() {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Refreshes an expired access token using a refresh token.
///
/// Exchanges a refresh token for a new access token when the current token
/// has expired. This allows the application to maintain authenticated access
/// without requiring the user to re-authorize.
///
/// # Token Response
///
/// Spotify may or may not rotate the refresh token. When the response carries
/// none, the one passed in is kept.
///
/// # API Documentation
///
/// Uses Spotify's token endpoint with the `refresh_token` grant type as
/// specified in the OAuth 2.0 specification.
pub async fn refresh_token(
    http: &Client,
    settings: &SpotifySettings,
    refresh_token: &str,
) -> std::result::Result<Token, reqwest::Error> {
    let response = http
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, refresh_token))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received from the callback for an access token. This is the final step
/// in the authentication process.
///
/// # PKCE Security
///
/// The code verifier proves that the same client that initiated the auth flow
/// is completing it, preventing authorization code interception attacks. The
/// verifier must match the challenge that was sent in the initial auth request.
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly (typically 10 minutes).
/// The exchange should happen immediately after receiving the code.
pub async fn exchange_code_pkce(
    http: &Client,
    settings: &SpotifySettings,
    code: &str,
    verifier: &str,
) -> std::result::Result<Token, reqwest::Error> {
    let response = http
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, ""))
}

fn into_token(response: TokenResponse, previous_refresh_token: &str) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .unwrap_or_else(|| previous_refresh_token.to_string()),
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
