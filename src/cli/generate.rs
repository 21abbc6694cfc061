use crate::{
    error, info, pipeline, success,
    types::{PromptRequest, SkipReason},
    warning,
};

pub async fn generate(
    prompt: String,
    name: Option<String>,
    description: Option<String>,
    token: Option<String>,
) {
    if prompt.trim().is_empty() {
        error!("Prompt must not be empty");
    }

    let state = super::load_state().await;
    let spotify = super::spotify_client(&state, token).await;
    let request = PromptRequest {
        prompt,
        playlist_name: name,
        playlist_description: description,
    };

    let pb = super::spinner("Generating playlist...");
    let result =
        pipeline::build_from_prompt(&spotify, &state.completion, &request, state.retry).await;
    pb.finish_and_clear();

    let generated = match result {
        Ok(generated) => generated,
        Err(e) => error!("Failed to generate playlist: {}", e),
    };

    for skipped in &generated.skipped {
        let reason = match &skipped.reason {
            SkipReason::NotFound => "not found".to_string(),
            SkipReason::ResolutionFailed(e) => format!("search failed: {e}"),
            SkipReason::AttachFailed(e) => format!("could not be added: {e}"),
        };
        warning!(
            "Skipped \"{}\" by {} ({})",
            skipped.song.title,
            skipped.song.artist,
            reason
        );
    }

    info!("{} tracks added", generated.added.len());
    success!("Playlist \"{}\": {}", generated.name, generated.url);
}
