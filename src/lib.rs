//! reelkiosk is a kiosk-style vertical video player.
//!
//! It cycles through category folders of video files, fits every frame into a fixed portrait
//! canvas, slides between videos on swipe or key press and draws a small HUD on top.
//!
//! - Build a [`Library`] of [`Category`] folders
//! - Create a [`Player`] with a [`VideoBackend`] and an [`Overlay`]
//! - Drive it with [`Player::run`] against any [`Presenter`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod nav;
pub(crate) mod overlay;
pub(crate) mod playback;
pub(crate) mod present;
pub(crate) mod render;

pub use crate::foundation::core::{Canvas, DEFAULT_FPS, Fps, FrameIndex, Rect};
pub use crate::foundation::error::{PlayerError, PlayerResult};

pub use crate::animation::ease::Ease;
pub use crate::assets::catalog::{
    Category, DirEnumerator, FileEnumerator, Library, VIDEO_EXTENSIONS, VideoEntry,
    has_video_extension,
};
pub use crate::assets::media::{
    FfmpegBackend, VideoBackend, VideoSource, VideoSourceInfo, is_ffmpeg_on_path, probe_video,
};
pub use crate::config::{PlayerConfig, TransitionConfig};
pub use crate::effects::transitions::{
    SlideConfig, SlideDir, TransitionKind, TransitionRun, parse_transition_kind_params,
    render_slide,
};
pub use crate::nav::input::{InputEvent, KeyBindings, KeySym};
pub use crate::nav::state::{
    GestureConfig, Intent, NavPhase, NavigationState, PlaybackState, PointerDragState,
};
pub use crate::overlay::hud::HudOverlay;
pub use crate::overlay::text::{SYSTEM_FONT_CANDIDATES, TextPainter, find_system_font};
pub use crate::overlay::{NoOverlay, Overlay, OverlayModel};
pub use crate::playback::player::{PlaybackStats, Player, PlayerOpts};
pub use crate::present::Presenter;
pub use crate::present::scripted::ScriptedPresenter;
#[cfg(feature = "sdl2")]
pub use crate::present::sdl::SdlPresenter;
pub use crate::render::fit::{fit, scaled_size};
pub use crate::render::frame::Frame;
