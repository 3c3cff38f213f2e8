/// Deceleration curves used to shape transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// No shaping.
    Linear,
    /// `1 - (1 - t)^2`.
    OutQuad,
    /// `1 - (1 - t)^3`.
    #[default]
    OutCubic,
    /// `1 - (1 - t)^4`.
    OutQuart,
}

impl Ease {
    /// Map normalized progress `t` to eased progress. `t` is clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
