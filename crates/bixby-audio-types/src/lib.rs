//! Wire types for the Bixby audio player directive.
//!
//! The serialized [`AudioPlayerState`] is what ends up under `_JOVO_AUDIO_`
//! in the capsule response, so field names follow the platform's camelCase.

use serde::{Deserialize, Serialize};

/// Playback category reported for every audio player directive.
pub const AUDIO_CATEGORY: &str = "MUSIC";

/// Repeat behavior for the queued audio item(s).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum RepeatMode {
    Off,
    All,
    One,
}

/// One playable media reference.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Media URL.
    pub url: String,
    /// Media format label (for example `mp3`).
    pub format: String,
    /// Opaque token identifying the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Start offset in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_in_milliseconds: Option<i64>,
}

impl Stream {
    /// Build a stream from a url and format, leaving token/offset unset.
    pub fn new(url: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: format.into(),
            token: None,
            offset_in_milliseconds: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_offset(mut self, offset_ms: i64) -> Self {
        self.offset_in_milliseconds = Some(offset_ms);
        self
    }
}

/// A playable track plus its display metadata.
///
/// `streams` stays `None` until the first stream is added; on the wire it is
/// the `stream` array.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AudioItem {
    /// Track id. Empty string means unset.
    pub id: String,
    /// Queued streams, in play order.
    #[serde(rename = "stream", default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<Stream>>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub artist: String,
    pub album_art_url: String,
    /// Track duration as supplied by the caller; not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
}

impl AudioItem {
    /// `true` when at least one stream is queued.
    pub fn has_streams(&self) -> bool {
        self.streams.as_ref().is_some_and(|streams| !streams.is_empty())
    }

    /// Shallow-merge `data` into this item; absent fields are left untouched.
    pub fn merge(&mut self, data: AudioMetadata) {
        let AudioMetadata {
            id,
            streams,
            title,
            subtitle,
            artist,
            album_art_url,
            duration,
            album_name,
        } = data;
        if let Some(id) = id {
            self.id = id;
        }
        if let Some(streams) = streams {
            self.streams = Some(streams);
        }
        if let Some(title) = title {
            self.title = title;
        }
        if subtitle.is_some() {
            self.subtitle = subtitle;
        }
        if let Some(artist) = artist {
            self.artist = artist;
        }
        if let Some(album_art_url) = album_art_url {
            self.album_art_url = album_art_url;
        }
        if duration.is_some() {
            self.duration = duration;
        }
        if album_name.is_some() {
            self.album_name = album_name;
        }
    }
}

/// Partial [`AudioItem`] used by [`AudioPlayerState::set_metadata`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AudioMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "stream", default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<Stream>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
}

fn default_category() -> String {
    AUDIO_CATEGORY.to_string()
}

/// Per-session audio player directive.
///
/// Mutators return `&mut Self` so calls can be chained on the instance held
/// by the session. Nothing is validated: negative durations or out-of-range
/// indexes are stored as given.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerState {
    /// Always [`AUDIO_CATEGORY`]; incoming values are ignored.
    #[serde(skip_deserializing, default = "default_category")]
    category: String,
    pub audio_item: AudioItem,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "doNotWaitForTTS", default)]
    pub do_not_wait_for_tts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_mode: Option<RepeatMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_audio_item_index: Option<i64>,
}

impl Default for AudioPlayerState {
    fn default() -> Self {
        Self {
            category: default_category(),
            audio_item: AudioItem::default(),
            display_name: String::new(),
            do_not_wait_for_tts: false,
            repeat_mode: None,
            start_audio_item_index: None,
        }
    }
}

impl AudioPlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playback category; always [`AUDIO_CATEGORY`].
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Queued streams, empty when none were added yet.
    pub fn streams(&self) -> &[Stream] {
        self.audio_item.streams.as_deref().unwrap_or(&[])
    }

    pub fn has_streams(&self) -> bool {
        self.audio_item.has_streams()
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) -> &mut Self {
        self.repeat_mode = Some(mode);
        self
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.display_name = name.into();
        self
    }

    /// Whether playback waits for the preceding speech; stored inverted as
    /// `doNotWaitForTTS`.
    pub fn wait_for_tts(&mut self, wait: bool) -> &mut Self {
        self.set_do_not_wait_for_tts(!wait)
    }

    pub fn set_do_not_wait_for_tts(&mut self, do_not_wait: bool) -> &mut Self {
        self.do_not_wait_for_tts = do_not_wait;
        self
    }

    pub fn set_start_audio_item_index(&mut self, index: i64) -> &mut Self {
        self.start_audio_item_index = Some(index);
        self
    }

    /// Replace the queue with `stream`.
    pub fn play(&mut self, stream: Stream) -> &mut Self {
        self.set_audio_stream(stream)
    }

    /// Append `stream` to the queue.
    pub fn enqueue(&mut self, stream: Stream) -> &mut Self {
        self.add_audio_stream(stream)
    }

    pub fn add_audio_stream(&mut self, stream: Stream) -> &mut Self {
        self.audio_item
            .streams
            .get_or_insert_with(Vec::new)
            .push(stream);
        self
    }

    /// Append every stream in order. The stream list is initialized even when
    /// `streams` is empty.
    pub fn add_audio_streams<I>(&mut self, streams: I) -> &mut Self
    where
        I: IntoIterator<Item = Stream>,
    {
        self.audio_item
            .streams
            .get_or_insert_with(Vec::new)
            .extend(streams);
        self
    }

    pub fn set_audio_stream(&mut self, stream: Stream) -> &mut Self {
        self.audio_item.streams = Some(vec![stream]);
        self
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.audio_item.id = id.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.audio_item.title = title.into();
        self
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.audio_item.subtitle = Some(subtitle.into());
        self
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) -> &mut Self {
        self.audio_item.artist = artist.into();
        self
    }

    pub fn set_album_art(&mut self, url: impl Into<String>) -> &mut Self {
        self.audio_item.album_art_url = url.into();
        self
    }

    pub fn set_album_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.audio_item.album_name = Some(name.into());
        self
    }

    pub fn set_duration(&mut self, duration: i64) -> &mut Self {
        self.audio_item.duration = Some(duration);
        self
    }

    /// Shallow-merge `data` into the audio item.
    pub fn set_metadata(&mut self, data: AudioMetadata) -> &mut Self {
        self.audio_item.merge(data);
        self
    }
}
