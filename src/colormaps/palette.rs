//! Fixed categorical palettes.
//!
//! A palette has no interpolation: the unit interval is split into one bucket
//! per color and `t` picks bucket `floor(t * N)`.

use super::colormap::{unit_rgb, Colormap};

/// Discrete colormap over a small fixed list of colors
pub struct ListedColormap {
    name: &'static str,
    colors: &'static [[u8; 3]],
}

impl ListedColormap {
    pub const fn new(name: &'static str, colors: &'static [[u8; 3]]) -> Self {
        Self { name, colors }
    }

    /// Number of colors in the palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Colormap for ListedColormap {
    fn rgba(&self, value: f64) -> [f64; 4] {
        let n = self.colors.len();
        let index = ((value.clamp(0.0, 1.0) * n as f64).floor() as usize).min(n - 1);
        let [r, g, b] = unit_rgb(self.colors[index]);
        [r, g, b, 1.0]
    }

    fn name(&self) -> &str {
        self.name
    }
}

const TAB10: &[[u8; 3]] = &[
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

const SET1: &[[u8; 3]] = &[
    [0xe4, 0x1a, 0x1c],
    [0x37, 0x7e, 0xb8],
    [0x4d, 0xaf, 0x4a],
    [0x98, 0x4e, 0xa3],
    [0xff, 0x7f, 0x00],
    [0xff, 0xff, 0x33],
    [0xa6, 0x56, 0x28],
    [0xf7, 0x81, 0xbf],
    [0x99, 0x99, 0x99],
];

pub fn tab10() -> ListedColormap {
    ListedColormap::new("tab10", TAB10)
}

pub fn set1() -> ListedColormap {
    ListedColormap::new("set1", SET1)
}
