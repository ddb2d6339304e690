/// One 24-bit BMP pixel, stored in on-disk channel order (blue, green, red).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr8 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr8 {
    pub const BLACK: Bgr8 = Bgr8::gray(0);
    pub const WHITE: Bgr8 = Bgr8::gray(255);

    /// Build a pixel from red, green, blue (argument order is RGB, storage is BGR).
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// All three channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self { b: v, g: v, r: v }
    }

    /// Integer luma `0.299 R + 0.587 G + 0.114 B`, truncated toward zero.
    ///
    /// Evaluated as `(299 R + 587 G + 114 B) / 1000`, so gray input maps to itself.
    #[inline]
    pub fn luma(self) -> u8 {
        let weighted = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        (weighted / 1000) as u8
    }

    /// Each channel `c` becomes `255 - c`.
    #[inline]
    pub fn inverted(self) -> Self {
        Self {
            b: 255 - self.b,
            g: 255 - self.g,
            r: 255 - self.r,
        }
    }

    /// Channels as `[b, g, r]`, the order they appear in a BMP row.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Bgr8 {
    fn from(p: rgb::RGB8) -> Self {
        Self::new(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Bgr8> for rgb::RGB8 {
    fn from(p: Bgr8) -> Self {
        rgb::RGB8::new(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGR8> for Bgr8 {
    fn from(p: rgb::alt::BGR8) -> Self {
        Self {
            b: p.b,
            g: p.g,
            r: p.r,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<Bgr8> for rgb::alt::BGR8 {
    fn from(p: Bgr8) -> Self {
        rgb::alt::BGR8 {
            b: p.b,
            g: p.g,
            r: p.r,
        }
    }
}
