/// An 8-bit per channel RGBA color, the way paint contexts store fill and stroke colors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, u8::MAX)
    }

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Builds a color from channel values that may lie outside of `0..=255`.
    ///
    /// Fractions are truncated toward zero, then every channel is clamped.
    pub fn from_channels(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        fn channel(v: f64) -> u8 {
            // `as` saturates and maps NaN to 0.
            v.trunc() as u8
        }
        Self::new(channel(red), channel(green), channel(blue), channel(alpha))
    }

    /// Channel-wise sum, with each color channel clamped to `255`.
    ///
    /// The result is always fully opaque.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self::rgb(
            self.red.saturating_add(rhs.red),
            self.green.saturating_add(rhs.green),
            self.blue.saturating_add(rhs.blue),
        )
    }
}
