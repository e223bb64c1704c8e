//! Diverging colormaps defined by explicit color tables.
//!
//! These ramps have no `colorgrad` preset, so they are stored as evenly spaced
//! anchor colors and interpolated linearly between neighbours.

use super::colormap::{lerp_color, unit_rgb, Colormap};

/// Colormap interpolated from a table of evenly spaced anchors
pub struct TableColormap {
    name: &'static str,
    colors: &'static [[u8; 3]],
}

impl TableColormap {
    pub const fn new(name: &'static str, colors: &'static [[u8; 3]]) -> Self {
        Self { name, colors }
    }
}

impl Colormap for TableColormap {
    fn rgba(&self, value: f64) -> [f64; 4] {
        let last = self.colors.len() - 1;
        let position = value.clamp(0.0, 1.0) * last as f64;
        let index = position.floor() as usize;

        if index >= last {
            let [r, g, b] = unit_rgb(self.colors[last]);
            return [r, g, b, 1.0];
        }

        let t = position - index as f64;
        let [r, g, b] = lerp_color(
            unit_rgb(self.colors[index]),
            unit_rgb(self.colors[index + 1]),
            t,
        );
        [r, g, b, 1.0]
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Blue to light grey to red, for anomalies around a meaningful center
const COOLWARM: &[[u8; 3]] = &[
    [59, 76, 192],
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221],
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47],
];

/// Dark blue through white to dark red
const SEISMIC: &[[u8; 3]] = &[
    [0, 0, 76],
    [0, 0, 255],
    [255, 255, 255],
    [255, 0, 0],
    [127, 0, 0],
];

pub fn coolwarm() -> TableColormap {
    TableColormap::new("coolwarm", COOLWARM)
}

pub fn seismic() -> TableColormap {
    TableColormap::new("seismic", SEISMIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_names() {
        assert_eq!(coolwarm().name(), "coolwarm");
        assert_eq!(seismic().name(), "seismic");
    }

    #[test]
    fn test_coolwarm_bounds() {
        let colormap = coolwarm();

        let blue = colormap.map_normalized(0.0);
        let red = colormap.map_normalized(1.0);
        assert!(blue[2] > blue[0]);
        assert!(red[0] > red[2]);

        // Between the two grey anchors in the middle
        let middle = colormap.map_normalized(0.5);
        assert!(middle[0] > 200);
        assert!(middle[1] > 200);
        assert!(middle[2] > 200);
    }

    #[test]
    fn test_seismic_middle_is_white() {
        assert_eq!(seismic().map_normalized(0.5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_saturates_outside_unit_interval() {
        let colormap = seismic();
        assert_eq!(colormap.rgba(-1.0), colormap.rgba(0.0));
        assert_eq!(colormap.rgba(2.0), colormap.rgba(1.0));
    }
}
