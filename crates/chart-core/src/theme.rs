// File: crates/chart-core/src/theme.rs
// Summary: The user's theme colors, which seed the default chart fill and line colors.

use tracing::warn;

use crate::color::RgbColor;

/// Environment variable holding the user's colors as `"<stroke>,<fill>"`.
pub const USER_COLOR_ENV: &str = "SIMPLEGRAPH_USER_COLOR";

/// A user's stroke (secondary) and fill (accent) colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserColors {
    pub stroke: RgbColor,
    pub fill: RgbColor,
}

impl UserColors {
    /// Parse the `"<stroke>,<fill>"` form, e.g. `"#ff2b34,#005fe4"`.
    pub fn parse(spec: &str) -> Option<Self> {
        let (stroke, fill) = spec.split_once(',')?;
        Some(Self {
            stroke: RgbColor::from_hex(stroke).ok()?,
            fill: RgbColor::from_hex(fill).ok()?,
        })
    }

    /// Read [`USER_COLOR_ENV`], falling back to the defaults when unset or malformed.
    pub fn from_env() -> Self {
        match std::env::var(USER_COLOR_ENV) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "ignoring malformed {USER_COLOR_ENV}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Default chart (fill) color.
    pub fn chart_color(&self) -> RgbColor { self.fill }
    /// Default line (stroke) color.
    pub fn line_color(&self) -> RgbColor { self.stroke }
}

impl Default for UserColors {
    fn default() -> Self {
        Self {
            stroke: RgbColor::new(0x00, 0x58, 0x8c),
            fill: RgbColor::new(0x1e, 0x90, 0xff),
        }
    }
}
