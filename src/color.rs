use palette::{LinSrgb, Srgb};

use crate::error::{Result, ThemeError};

/// An sRGB triple with 8-bit channels.
///
/// Channels are `u8`, so a `Color` is always in range. Untyped integer input
/// goes through [`Color::from_channels`], which rejects out-of-range values
/// instead of masking them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color packed as `(r << 16) | (g << 8) | b`.
///
/// Ordering is numeric on the packed value and is used to break ties between
/// equally close matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedColor(u32);

/// Largest valid packed value (`#ffffff`).
pub const MAX_PACKED: u32 = 0x00ff_ffff;

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from untyped integer channels.
    ///
    /// Fails with a domain error if any channel is outside `0..=255`.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self> {
        fn channel(name: &str, value: i64) -> Result<u8> {
            u8::try_from(value).map_err(|_| {
                ThemeError::domain(format!("{name} channel {value} is outside 0..=255"))
            })
        }
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    /// Parse a hex color string like `#ff8800` or `FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::domain(format!(
                "invalid hex color '{hex}': expected 6 hex digits"
            )));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| ThemeError::domain(format!("invalid hex color '{hex}': {e}")))?;
        Ok(PackedColor(value).unpack())
    }

    /// Pack into a 24-bit integer.
    pub const fn pack(self) -> PackedColor {
        PackedColor(((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32)
    }

    pub fn to_hex(self) -> String {
        self.pack().to_string()
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Euclidean distance to `other` in RGB space.
    pub fn distance(self, other: Color) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(self) -> f32 {
        let linear: LinSrgb<f32> = self.to_srgb_u8().into_format::<f32>().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pack())
    }
}

impl PackedColor {
    /// Wrap a raw packed value, rejecting anything above `0xffffff`.
    pub fn new(value: u32) -> Result<Self> {
        if value > MAX_PACKED {
            return Err(ThemeError::domain(format!(
                "packed value {value:#x} exceeds {MAX_PACKED:#08x}"
            )));
        }
        Ok(Self(value))
    }

    /// Used for compile-time tables whose values are known to fit in 24 bits.
    pub(crate) const fn from_u24(value: u32) -> Self {
        Self(value & MAX_PACKED)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Extract the channels. Total.
    pub const fn unpack(self) -> Color {
        Color {
            r: ((self.0 >> 16) & 0xff) as u8,
            g: ((self.0 >> 8) & 0xff) as u8,
            b: (self.0 & 0xff) as u8,
        }
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for PackedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl From<Color> for PackedColor {
    fn from(color: Color) -> Self {
        color.pack()
    }
}

impl From<PackedColor> for Color {
    fn from(packed: PackedColor) -> Self {
        packed.unpack()
    }
}

pub fn pack(color: Color) -> PackedColor {
    color.pack()
}

pub fn unpack(packed: PackedColor) -> Color {
    packed.unpack()
}

/// Lowercase `#rrggbb`, always seven characters.
pub fn format_hex(packed: PackedColor) -> String {
    packed.to_string()
}

/// Euclidean RGB distance, in `[0, 441.67]`.
pub fn distance(a: Color, b: Color) -> f64 {
    a.distance(b)
}
