use crate::{
    animation::ease::Ease,
    foundation::error::{PlayerError, PlayerResult},
    render::frame::Frame,
};

/// Vertical travel direction of a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDir {
    /// The outgoing frame exits through the top, the incoming one rises from the bottom.
    #[default]
    Down,
    /// The outgoing frame exits through the bottom, the incoming one drops from the top.
    Up,
}

impl SlideDir {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

/// Fixed configuration of the slide transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlideConfig {
    /// Travel direction.
    pub dir: SlideDir,
}

/// Closed set of transition kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Vertical displacement of both frames.
    Slide(SlideConfig),
}

impl Default for TransitionKind {
    fn default() -> Self {
        Self::Slide(SlideConfig::default())
    }
}

impl TransitionKind {
    /// Configured travel direction.
    pub fn dir(&self) -> SlideDir {
        match self {
            Self::Slide(cfg) => cfg.dir,
        }
    }

    /// The same kind, travelling in `dir`.
    pub fn with_dir(self, dir: SlideDir) -> Self {
        match self {
            Self::Slide(_) => Self::Slide(SlideConfig { dir }),
        }
    }

    /// Blend `from` into `to` at `progress`.
    pub fn render(&self, from: &Frame, to: &Frame, progress: f64) -> PlayerResult<Frame> {
        match self {
            Self::Slide(cfg) => render_slide(from, to, progress, cfg.dir),
        }
    }
}

/// Parse a transition from its configured name and JSON params.
///
/// Accepted names: `slide`, `slide-down`, `slide_down`, `slide-up`, `slide_up`.
/// `params.dir` (`"down"` / `"up"`) overrides the direction implied by the name.
pub fn parse_transition_kind_params(
    kind: &str,
    params: &serde_json::Value,
) -> PlayerResult<TransitionKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(PlayerError::validation("transition kind must be non-empty"));
    }

    let named_dir = match kind.as_str() {
        "slide" | "slide-down" | "slide_down" => SlideDir::Down,
        "slide-up" | "slide_up" => SlideDir::Up,
        _ => {
            return Err(PlayerError::validation(format!(
                "unknown transition kind '{kind}'"
            )));
        }
    };

    let params = if params.is_null() {
        None
    } else {
        Some(
            params
                .as_object()
                .ok_or_else(|| PlayerError::validation("slide params must be an object"))?,
        )
    };

    let dir = match params.and_then(|p| p.get("dir")).and_then(|v| v.as_str()) {
        None => named_dir,
        Some(s) => match s.trim().to_ascii_lowercase().as_str() {
            "down" => SlideDir::Down,
            "up" => SlideDir::Up,
            other => {
                return Err(PlayerError::validation(format!(
                    "unknown slide.dir '{other}'"
                )));
            }
        },
    };

    Ok(TransitionKind::Slide(SlideConfig { dir }))
}

/// Compose one slide frame.
///
/// `progress` is clamped to `[0, 1]` and the split row is `floor(height * progress)`. Rows not
/// covered by either input stay black.
pub fn render_slide(
    from: &Frame,
    to: &Frame,
    progress: f64,
    dir: SlideDir,
) -> PlayerResult<Frame> {
    if from.width != to.width || from.height != to.height {
        return Err(PlayerError::DimensionMismatch {
            left_width: from.width,
            left_height: from.height,
            right_width: to.width,
            right_height: to.height,
        });
    }
    from.check_len()?;
    to.check_len()?;

    let h = from.height as usize;
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let offset = ((h as f64 * p).floor() as usize).min(h);
    let stride = from.row_bytes();
    let mut out = Frame::black(from.width, from.height);

    let keep = h - offset;
    match dir {
        SlideDir::Down => {
            out.data[..keep * stride].copy_from_slice(&from.data[offset * stride..]);
            out.data[keep * stride..].copy_from_slice(&to.data[..offset * stride]);
        }
        SlideDir::Up => {
            out.data[offset * stride..].copy_from_slice(&from.data[..keep * stride]);
            out.data[..offset * stride].copy_from_slice(&to.data[keep * stride..]);
        }
    }
    Ok(out)
}

/// Progress schedule of one transition: `steps` eased samples ending exactly at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRun {
    steps: u32,
    ease: Ease,
}

impl TransitionRun {
    /// Create a schedule; `steps` must be non-zero.
    pub fn new(steps: u32, ease: Ease) -> PlayerResult<Self> {
        if steps == 0 {
            return Err(PlayerError::validation("transition steps must be > 0"));
        }
        Ok(Self { steps, ease })
    }

    /// Number of intermediate frames.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Eased progress of step `i` (1-based): `ease(i / steps)`.
    pub fn progress_at(&self, i: u32) -> f64 {
        self.ease
            .apply(f64::from(i.min(self.steps)) / f64::from(self.steps))
    }

    /// Progress values for steps `1..=steps`.
    pub fn progress(&self) -> impl Iterator<Item = f64> + '_ {
        (1..=self.steps).map(|i| self.progress_at(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
