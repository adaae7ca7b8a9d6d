//! Parser configuration.

/// Options applied to parsed commands before they are assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOptions {
    /// Multiplier applied to every y-bearing argument.
    ///
    /// Path data is authored in a y-down space; `-1.0` maps it into a
    /// y-up destination.
    pub y_axis_sign: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self { y_axis_sign: 1.0 }
    }
}

impl PathOptions {
    /// Options for a y-up destination space.
    pub fn y_up() -> Self {
        Self { y_axis_sign: -1.0 }
    }

    /// Set the y-axis multiplier.
    pub fn with_y_axis_sign(mut self, sign: f64) -> Self {
        self.y_axis_sign = sign;
        self
    }

    /// Whether any y flipping or scaling is requested.
    pub fn is_identity(&self) -> bool {
        self.y_axis_sign == 1.0
    }
}
