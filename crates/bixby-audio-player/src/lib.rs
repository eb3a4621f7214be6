//! Audio player support for the Bixby capsule pipeline.
//!
//! [`AudioPlayerPlugin`] recognizes `AudioPlaying` events, resets the
//! per-session [`AudioPlayerState`] on launch and projects it into the
//! response under `_JOVO_AUDIO_`.

pub mod audio_player;
pub mod config;
pub mod nested;
pub mod pipeline;
pub mod request;
pub mod request_type;
pub mod response;
pub mod session;

pub use audio_player::AudioPlayerPlugin;
pub use bixby_audio_types::{AudioItem, AudioMetadata, AudioPlayerState, RepeatMode, Stream};
pub use pipeline::{Pipeline, Plugin, Stage};
pub use request::BixbyRequest;
pub use request_type::{RequestKind, RequestType};
pub use response::BixbyResponse;
pub use session::{Capsule, Session};
