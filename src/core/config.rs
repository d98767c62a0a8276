use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error returned when a [`NetworkConfig`] or a color string is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `max_connections` must be at least 1.
    ZeroMaxConnections,
    /// Width or height is negative, NaN or infinite.
    InvalidDimensions { width: f32, height: f32 },
    /// Pointer radius is not a positive finite number.
    InvalidPointerRadius(f32),
    /// Color is not `#RRGGBB`.
    InvalidColor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxConnections => write!(f, "max_connections must be >= 1"),
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "dimensions must be finite and >= 0 (got {width}x{height})")
            }
            ConfigError::InvalidPointerRadius(r) => {
                write!(f, "pointer_radius must be finite and > 0 (got {r})")
            }
            ConfigError::InvalidColor(s) => write!(f, "expected #RRGGBB color, got {s:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// 8-bit RGB color. Alpha is applied per draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Teal used by the portfolio hero.
    pub const TEAL: Color = Color::rgb(0x4F, 0xD1, 0xC5);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` string with the given alpha in `[0, 1]`.
    pub fn to_css_rgba(self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Surface background: left untouched (transparent) or filled every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Background {
    #[default]
    Transparent,
    Solid(Color),
}

impl FromStr for Background {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("transparent") {
            return Ok(Background::Transparent);
        }
        s.parse().map(Background::Solid)
    }
}

impl TryFrom<String> for Background {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Background> for String {
    fn from(b: Background) -> Self {
        match b {
            Background::Transparent => "transparent".to_string(),
            Background::Solid(c) => c.to_hex(),
        }
    }
}

/// Renderer configuration.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct NetworkConfig {
    pub width: f32,
    pub height: f32,
    pub neuron_count: usize,
    pub color: Color,
    pub background: Background,
    /// Upper bound on a neuron's connection set size.
    pub max_connections: usize,
    /// Track the pointer and apply proximity boosts/repulsion.
    pub interactive: bool,
    /// Distance within which the pointer affects neurons and connections.
    pub pointer_radius: f32,
    pub pulse_enabled: bool,
    /// PRNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            neuron_count: 40,
            color: Color::TEAL,
            background: Background::Transparent,
            max_connections: 3,
            interactive: true,
            pointer_radius: 150.0,
            pulse_enabled: true,
            seed: None,
        }
    }
}

impl NetworkConfig {
    /// Full-bleed hero banner background.
    pub fn hero(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            neuron_count: 100,
            max_connections: 5,
            pointer_radius: 180.0,
            ..Default::default()
        }
    }

    /// Quieter footer strip; ignores the pointer.
    pub fn footer(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            interactive: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::ZeroMaxConnections);
        }
        let dim_ok = |v: f32| v.is_finite() && v >= 0.0;
        if !dim_ok(self.width) || !dim_ok(self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.pointer_radius.is_finite() || self.pointer_radius <= 0.0 {
            return Err(ConfigError::InvalidPointerRadius(self.pointer_radius));
        }
        Ok(())
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_neuron_count(mut self, count: usize) -> Self {
        self.neuron_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_pulse(mut self, enabled: bool) -> Self {
        self.pulse_enabled = enabled;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// True when there is no area to draw into.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
