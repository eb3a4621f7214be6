//! Audio player plugin.
//!
//! Hooks three stages:
//! - `$type`: tag `AudioPlaying` events as `AUDIOPLAYER`
//! - `$session`: reset the player state on launch
//! - `$output`: project a playable state into `_JOVO_AUDIO_`

use crate::nested::PathSegment;
use crate::pipeline::{Pipeline, Plugin, Stage};
use crate::request_type::{RequestKind, RequestType};
use crate::session::Capsule;

/// Directive value the platform sends while audio is playing.
pub const AUDIO_PLAYING_DIRECTIVE: &str = "AudioPlaying";
/// Subtype recorded for [`AUDIO_PLAYING_DIRECTIVE`] requests.
pub const AUDIO_PLAYING_SUB_TYPE: &str = "BixbyCapsule.AudioPlaying";
/// Response key carrying the serialized player state.
pub const AUDIO_RESPONSE_KEY: &str = "_JOVO_AUDIO_";

#[derive(Clone, Copy, Debug, Default)]
pub struct AudioPlayerPlugin;

impl AudioPlayerPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for AudioPlayerPlugin {
    fn name(&self) -> &'static str {
        "bixby-audio-player"
    }

    fn install(&self, pipeline: &mut Pipeline) {
        pipeline.middleware(Stage::Type).use_fn(classify_audio_event);
        pipeline.middleware(Stage::Session).use_fn(reset_on_launch);
        pipeline.middleware(Stage::Output).use_fn(project_audio_player);
    }
}

/// Tag the turn as `AUDIOPLAYER` when the request carries the audio playing
/// directive. Any other directive leaves the classification alone.
pub fn classify_audio_event(capsule: &mut Capsule<'_>) {
    if !capsule.request.has_directive(AUDIO_PLAYING_DIRECTIVE) {
        return;
    }
    capsule.request_type = Some(RequestType::with_sub_type(
        RequestKind::AudioPlayer,
        AUDIO_PLAYING_SUB_TYPE,
    ));
    capsule.audio_player();
    tracing::debug!(
        session_id = %capsule.session.id,
        sub_type = AUDIO_PLAYING_SUB_TYPE,
        "classified audio player event"
    );
}

/// Replace the session's player state with a fresh one on launch.
pub fn reset_on_launch(capsule: &mut Capsule<'_>) {
    if !capsule.is_type(RequestKind::Launch) {
        return;
    }
    let had_streams = capsule
        .session
        .audio_player()
        .is_some_and(|state| state.has_streams());
    capsule.session.reset_audio_player();
    tracing::debug!(
        session_id = %capsule.session.id,
        discarded_streams = had_streams,
        "reset audio player on launch"
    );
}

/// Write the player state into the response when it has something to play.
///
/// The response is created first if no earlier stage built one. A state
/// without streams is never projected.
pub fn project_audio_player(capsule: &mut Capsule<'_>) {
    capsule.response_mut();

    let Some(state) = capsule.session.audio_player() else {
        tracing::trace!("no audio player state; skipping projection");
        return;
    };
    if !state.has_streams() {
        tracing::trace!("audio player has no streams; skipping projection");
        return;
    }
    let streams = state.streams().len();
    let value = match serde_json::to_value(state) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize audio player state");
            return;
        }
    };
    capsule
        .response_mut()
        .set_field_at(&[PathSegment::from(AUDIO_RESPONSE_KEY)], value);
    tracing::debug!(
        session_id = %capsule.session.id,
        streams,
        "projected audio player into response"
    );
}
