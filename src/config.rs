//! JSON player configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::assets::catalog::Category;
use crate::effects::transitions::{TransitionKind, parse_transition_kind_params};
use crate::foundation::core::{Canvas, DEFAULT_FPS};
use crate::foundation::error::{PlayerError, PlayerResult};
use crate::nav::input::KeyBindings;
use crate::nav::state::GestureConfig;
use crate::overlay::hud::HudOverlay;
use crate::playback::player::PlayerOpts;

/// Transition settings as written in the config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Transition name, e.g. `"slide"` or `"slide-up"`.
    pub kind: String,
    /// Kind-specific parameters, e.g. `{"dir": "down"}`.
    pub params: serde_json::Value,
    /// Intermediate frames per transition.
    pub steps: u32,
    /// Progress curve.
    pub ease: Ease,
    /// Pause after each intermediate frame, in milliseconds.
    pub step_delay_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            kind: "slide".to_string(),
            params: serde_json::json!({ "dir": "down" }),
            steps: 20,
            ease: Ease::OutCubic,
            step_delay_ms: 16,
        }
    }
}

impl TransitionConfig {
    /// Resolve the configured name and params into a [`TransitionKind`].
    pub fn kind(&self) -> PlayerResult<TransitionKind> {
        parse_transition_kind_params(&self.kind, &self.params)
    }
}

/// Top-level player configuration. Every field has a default, so `{}` is a valid file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Directory holding one sub-folder per category.
    pub video_root: PathBuf,
    /// Categories in button order.
    pub categories: Vec<Category>,
    /// Presentation size.
    pub canvas: Canvas,
    /// Whether the overlay starts visible.
    pub show_ui: bool,
    /// Frame rate used when a video reports none.
    pub default_fps: u32,
    /// Transition settings.
    pub transition: TransitionConfig,
    /// Gesture thresholds.
    pub gesture: GestureConfig,
    /// Font file for HUD labels. System fonts are searched when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            video_root: PathBuf::from("videos"),
            categories: vec![
                Category::new("시연디스플레이", "DEMO"),
                Category::new("신동디스플레이", "SD"),
            ],
            canvas: Canvas {
                width: 720,
                height: 1280,
            },
            show_ui: true,
            default_fps: DEFAULT_FPS,
            transition: TransitionConfig::default(),
            gesture: GestureConfig::default(),
            font_path: None,
        }
    }
}

impl PlayerConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PlayerResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PlayerError::serde(format!("parse player config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PlayerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open player config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject configurations the player cannot run with.
    pub fn validate(&self) -> PlayerResult<()> {
        if self.categories.is_empty() {
            return Err(PlayerError::validation("at least one category is required"));
        }
        if let Some(c) = self.categories.iter().find(|c| c.folder.trim().is_empty()) {
            return Err(PlayerError::validation(format!(
                "category '{}' has an empty folder name",
                c.label
            )));
        }
        self.canvas.validate()?;
        if self.transition.steps == 0 {
            return Err(PlayerError::validation("transition.steps must be > 0"));
        }
        if self.default_fps == 0 {
            return Err(PlayerError::validation("default_fps must be > 0"));
        }
        if self.gesture.tap_tolerance_px > self.gesture.swipe_threshold_px {
            return Err(PlayerError::validation(format!(
                "gesture.tap_tolerance_px ({}) must not exceed gesture.swipe_threshold_px ({})",
                self.gesture.tap_tolerance_px, self.gesture.swipe_threshold_px
            )));
        }
        self.transition.kind()?;
        Ok(())
    }

    /// Validate and convert into loop options.
    pub fn player_opts(&self) -> PlayerResult<PlayerOpts> {
        self.validate()?;
        Ok(PlayerOpts {
            canvas: self.canvas,
            transition: self.transition.kind()?,
            ease: self.transition.ease,
            transition_steps: self.transition.steps,
            step_delay: Duration::from_millis(self.transition.step_delay_ms),
            gesture: self.gesture,
            bindings: KeyBindings::default(),
            show_ui: self.show_ui,
            default_fps: self.default_fps,
        })
    }

    /// Build the HUD, loading `font_path` when set. A configured font that fails to load is an
    /// error; without one the first usable system font is taken.
    pub fn overlay(&self) -> PlayerResult<HudOverlay> {
        match &self.font_path {
            Some(path) => HudOverlay::with_font_file(path),
            None => Ok(HudOverlay::new()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
