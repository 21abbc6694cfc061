use crate::{error, spotify};

pub async fn auth() {
    let state = super::load_state().await;
    if let Err(e) = spotify::auth::auth(state).await {
        error!("{}", e);
    }
}
