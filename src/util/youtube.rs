//! YouTube video id parsing and the looping background player.
//!
//! Video screens show a muted, autoplaying, endlessly looping embed. The
//! page only knows the URL an operator pasted, so the id has to be dug out
//! of whichever link shape they used.

#[cfg(test)]
#[path = "youtube_test.rs"]
mod youtube_test;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Shown in place of the player when the configured URL has no usable id.
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";
/// Script that defines the global `YT` namespace.
pub const IFRAME_API_URL: &str = "https://www.youtube.com/iframe_api";

const VIDEO_ID_LEN: usize = 11;

// Group 7 holds the candidate id after any recognized path marker. The
// channel-user segment is an ASCII word character only.
static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*((youtu.be/)|(v/)|(/u/(?-u:\w)/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*").expect("valid regex")
});

/// Extract the 11-character video id from short, `/v/`, channel-user, embed
/// or watch links. `None` when nothing matches or the capture has the wrong
/// length, counted in UTF-16 code units as the page scripts count it.
pub fn parse_video_id(url: &str) -> Option<String> {
    let captures = VIDEO_URL.captures(url)?;
    let id = captures.get(7)?.as_str();
    (id.encode_utf16().count() == VIDEO_ID_LEN).then(|| id.to_owned())
}

/// `playerVars` for a muted, chrome-less, looping autoplay embed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerVars {
    pub autoplay: u8,
    pub mute: u8,
    pub controls: u8,
    pub showinfo: u8,
    pub rel: u8,
    pub modestbranding: u8,
    #[serde(rename = "loop")]
    pub loop_video: u8,
    /// Looping a single video requires it to be its own playlist.
    pub playlist: String,
}

impl PlayerVars {
    pub fn looping(video_id: &str) -> Self {
        Self {
            autoplay: 1,
            mute: 1,
            controls: 0,
            showinfo: 0,
            rel: 0,
            modestbranding: 1,
            loop_video: 1,
            playlist: video_id.to_owned(),
        }
    }
}

#[cfg(feature = "hydrate")]
pub use self::embed::{load_iframe_api, mount_player};

#[cfg(feature = "hydrate")]
mod embed {
    use js_sys::{Array, Function, JSON, Object, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    use super::{IFRAME_API_URL, INVALID_URL_MESSAGE, PlayerVars, parse_video_id};
    use crate::error::ClientError;
    use crate::ui::projector::{PLAYER, UiProjector};

    /// `YT.PlayerState.ENDED`.
    const PLAYER_STATE_ENDED: f64 = 0.0;

    /// Append the iframe API script; it calls `onYouTubeIframeAPIReady` once loaded.
    pub fn load_iframe_api(document: &web_sys::Document) -> Result<(), ClientError> {
        let script = document.create_element("script").map_err(|e| ClientError::from_js(&e))?;
        script.set_attribute("src", IFRAME_API_URL).map_err(|e| ClientError::from_js(&e))?;
        let body = document.body().ok_or_else(|| ClientError::Browser("document has no body".to_owned()))?;
        body.append_child(&script).map_err(|e| ClientError::from_js(&e))?;
        Ok(())
    }

    /// Build the player in the `player` element, or print the invalid-URL
    /// notice there when `video_url` has no usable id.
    pub fn mount_player<P: UiProjector>(video_url: Option<&str>, projector: &mut P) -> Result<(), ClientError> {
        let Some(video_id) = video_url.and_then(parse_video_id) else {
            log::warn!("no usable video id in {video_url:?}");
            projector.set_text(PLAYER, INVALID_URL_MESSAGE);
            return Ok(());
        };

        let window = web_sys::window().ok_or_else(|| ClientError::Browser("no window".to_owned()))?;
        let yt = Reflect::get(&window, &JsValue::from_str("YT")).map_err(|e| ClientError::from_js(&e))?;
        let player_ctor: Function = Reflect::get(&yt, &JsValue::from_str("Player"))
            .map_err(|e| ClientError::from_js(&e))?
            .dyn_into()
            .map_err(|v| ClientError::from_js(&v))?;

        let vars = JSON::parse(&serde_json::to_string(&PlayerVars::looping(&video_id))?)
            .map_err(|e| ClientError::from_js(&e))?;

        let on_ready = Closure::<dyn FnMut(JsValue)>::new(|event: JsValue| {
            log::info!("video player ready");
            play(&event);
        });
        let on_state_change = Closure::<dyn FnMut(JsValue)>::new(|event: JsValue| {
            let state = Reflect::get(&event, &JsValue::from_str("data")).ok().and_then(|v| v.as_f64());
            // Backup for `loop`, which some embeds ignore.
            if state == Some(PLAYER_STATE_ENDED) {
                play(&event);
            }
        });

        let events = Object::new();
        set(&events, "onReady", on_ready.as_ref())?;
        set(&events, "onStateChange", on_state_change.as_ref())?;
        on_ready.forget();
        on_state_change.forget();

        let options = Object::new();
        set(&options, "videoId", &JsValue::from_str(&video_id))?;
        set(&options, "playerVars", &vars)?;
        set(&options, "events", &events)?;

        Reflect::construct(&player_ctor, &Array::of2(&JsValue::from_str(PLAYER), &options))
            .map_err(|e| ClientError::from_js(&e))?;
        log::info!("video player created for {video_id}");
        Ok(())
    }

    fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), ClientError> {
        Reflect::set(target, &JsValue::from_str(key), value).map_err(|e| ClientError::from_js(&e))?;
        Ok(())
    }

    fn play(event: &JsValue) {
        let Ok(player) = Reflect::get(event, &JsValue::from_str("target")) else {
            return;
        };
        let play_video = Reflect::get(&player, &JsValue::from_str("playVideo")).and_then(|value| value.dyn_into::<Function>());
        if let Ok(play_video) = play_video {
            let _ = play_video.call0(&player);
        }
    }
}
