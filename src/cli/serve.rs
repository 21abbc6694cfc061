use crate::{error, info, server, warning};

pub async fn serve(open: bool) {
    let state = super::load_state().await;
    info!(
        "Liked songs are stored in {}",
        state.likes.path().display()
    );

    if open {
        let login_url = format!("http://{}/login", state.settings.server_addr);
        if webbrowser::open(&login_url).is_err() {
            warning!("Failed to open browser. Visit {} to log in.", login_url);
        }
    }

    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped: {}", e);
    }
}
