use crate::foundation::error::{PlexusError, PlexusResult};

pub use kurbo::{Affine, Point, Vec2};

/// Duration in seconds of scene time.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Zero duration.
    pub const ZERO: Self = Self(0.0);

    /// Validate that the duration is finite and non-negative.
    pub fn validate(self, what: &str) -> PlexusResult<()> {
        if !self.0.is_finite() || self.0 < 0.0 {
            return Err(PlexusError::configuration(format!(
                "{what} must be a finite, non-negative duration (got {})",
                self.0
            )));
        }
        Ok(())
    }
}

impl std::ops::Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Zero-based index of an output frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> PlexusResult<Self> {
        if den == 0 {
            return Err(PlexusError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PlexusError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Scene time at which frame `idx` is sampled.
    pub fn frame_time(self, idx: u64) -> Seconds {
        Seconds((idx as f64) * f64::from(self.den) / f64::from(self.num))
    }

    /// Number of frames needed to cover `duration`, including the final frame.
    pub fn frames_for(self, duration: Seconds) -> u64 {
        (duration.0.max(0.0) * self.as_f64()).ceil() as u64 + 1
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Straight-alpha RGBA8 color.
///
/// Serialized as a `#RRGGBB` / `#RRGGBBAA` hex string so style files stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> PlexusResult<Self> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PlexusError::configuration(format!(
                "invalid hex color '{raw}'"
            )));
        }

        let byte = |i: usize| -> PlexusResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| PlexusError::configuration(format!("invalid hex color '{raw}': {e}")))
        };

        match hex.len() {
            3 => {
                let nib = |i: usize| -> PlexusResult<u8> {
                    let v = u8::from_str_radix(&hex[i..i + 1], 16).map_err(|e| {
                        PlexusError::configuration(format!("invalid hex color '{raw}': {e}"))
                    })?;
                    Ok(v * 17)
                };
                Ok(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(PlexusError::configuration(format!(
                "hex color '{raw}' must have 3, 6 or 8 digits"
            ))),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
