//! Session and per-turn context.
//!
//! A [`Session`] lives across turns; a [`Capsule`] borrows it for exactly one
//! turn together with that turn's request, classification and response.

use bixby_audio_types::AudioPlayerState;

use crate::request::BixbyRequest;
use crate::request_type::{RequestKind, RequestType};
use crate::response::BixbyResponse;

/// Long-lived conversation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// Platform session id.
    pub id: String,
    /// Audio player state; `None` until first needed.
    pub audio_player: Option<AudioPlayerState>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            audio_player: None,
        }
    }

    /// Current audio player state without creating one.
    pub fn audio_player(&self) -> Option<&AudioPlayerState> {
        self.audio_player.as_ref()
    }

    /// Audio player state, created with defaults on first access.
    pub fn audio_player_mut(&mut self) -> &mut AudioPlayerState {
        self.audio_player.get_or_insert_with(AudioPlayerState::default)
    }

    /// Discard any existing state and install a fresh default one.
    pub fn reset_audio_player(&mut self) -> &mut AudioPlayerState {
        self.audio_player.insert(AudioPlayerState::default())
    }
}

/// Context for a single turn.
#[derive(Debug)]
pub struct Capsule<'s> {
    pub request: BixbyRequest,
    pub request_type: Option<RequestType>,
    pub response: Option<BixbyResponse>,
    pub session: &'s mut Session,
}

impl<'s> Capsule<'s> {
    pub fn new(session: &'s mut Session, request: BixbyRequest) -> Self {
        Self {
            request,
            request_type: None,
            response: None,
            session,
        }
    }

    /// Fluent access to the session's audio player (created on first use).
    pub fn audio_player(&mut self) -> &mut AudioPlayerState {
        self.session.audio_player_mut()
    }

    /// `true` when the turn has been classified as `kind`.
    pub fn is_type(&self, kind: RequestKind) -> bool {
        self.request_type.as_ref().is_some_and(|ty| ty.is(kind))
    }

    /// Response for this turn, created empty when no stage built one yet.
    pub fn response_mut(&mut self) -> &mut BixbyResponse {
        self.response.get_or_insert_with(BixbyResponse::new)
    }

    pub fn into_response(self) -> Option<BixbyResponse> {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bixby_audio_types::Stream;

    #[test]
    fn audio_player_is_created_lazily() {
        let mut session = Session::new("s-1");
        assert!(session.audio_player().is_none());
        session.audio_player_mut().set_title("T");
        assert_eq!(session.audio_player().unwrap().audio_item.title, "T");
    }

    #[test]
    fn reset_discards_previous_state() {
        let mut session = Session::new("s-1");
        session
            .audio_player_mut()
            .add_audio_stream(Stream::new("a.mp3", "mp3"))
            .set_display_name("Old");
        session.reset_audio_player();
        assert_eq!(session.audio_player(), Some(&AudioPlayerState::default()));
    }

    #[test]
    fn sessions_do_not_share_state() {
        let mut first = Session::new("a");
        let second = Session::new("b");
        first.audio_player_mut().set_title("only first");
        assert!(second.audio_player().is_none());
    }

    #[test]
    fn capsule_writes_through_to_session() {
        let mut session = Session::new("s-1");
        {
            let mut capsule = Capsule::new(&mut session, BixbyRequest::default());
            capsule.audio_player().play(Stream::new("a.mp3", "mp3"));
            assert!(!capsule.is_type(RequestKind::Launch));
            assert!(capsule.response.is_none());
            capsule.response_mut();
            assert!(capsule.into_response().is_some());
        }
        assert!(session.audio_player().unwrap().has_streams());
    }
}
