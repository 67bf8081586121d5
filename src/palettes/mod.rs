//! Built-in palette data for the palette picker.
//!
//! Sequential schemes come from Matplotlib ([`struct@VIRIDIS`],
//! [`struct@MAGMA`], [`struct@PLASMA`]), the diverging one
//! ([`struct@SPECTRAL`]) from the schemes by Cynthia Brewer
//! (<https://colorbrewer2.org/>).

use lazy_static::lazy_static;
use rgb::RGB;

mod ty;
pub use ty::{PaletteData, PaletteKind};

/// Color from integer channels in \[0, 255\].
fn c(r: f64, g: f64, b: f64) -> RGB<f64> {
    RGB { r: r / 255., g: g / 255., b: b / 255. }
}

lazy_static! {
    /// Matplotlib viridis color scheme (9 stops).
    pub static ref VIRIDIS: PaletteData = PaletteData {
        name: "viridis",
        kind: PaletteKind::Seq,
        rgb: vec![c(68., 1., 84.), c(72., 40., 120.), c(62., 74., 137.),
                  c(49., 104., 142.), c(38., 130., 142.), c(31., 158., 137.),
                  c(53., 183., 121.), c(109., 205., 89.), c(253., 231., 37.)],
    };

    /// Matplotlib magma color scheme (9 stops).
    pub static ref MAGMA: PaletteData = PaletteData {
        name: "magma",
        kind: PaletteKind::Seq,
        rgb: vec![c(0., 0., 4.), c(28., 16., 68.), c(79., 18., 123.),
                  c(129., 37., 129.), c(181., 54., 122.), c(229., 80., 100.),
                  c(251., 135., 97.), c(254., 194., 135.), c(252., 253., 191.)],
    };

    /// Matplotlib plasma color scheme (9 stops).
    pub static ref PLASMA: PaletteData = PaletteData {
        name: "plasma",
        kind: PaletteKind::Seq,
        rgb: vec![c(13., 8., 135.), c(84., 2., 163.), c(139., 10., 165.),
                  c(185., 50., 137.), c(219., 92., 104.), c(244., 136., 73.),
                  c(254., 188., 43.), c(240., 249., 33.)],
    };

    /// Brewer "Dark red, orange, light yellow, green, dark blue"
    /// diverging scheme.
    pub static ref SPECTRAL: PaletteData = PaletteData {
        name: "spectral",
        kind: PaletteKind::Div,
        rgb: vec![c(158., 1., 66.), c(213., 62., 79.), c(244., 109., 67.),
                  c(253., 174., 97.), c(254., 224., 139.), c(255., 255., 191.),
                  c(230., 245., 152.), c(171., 221., 164.), c(102., 194., 165.),
                  c(50., 136., 189.), c(94., 79., 162.)],
    };

    /// All built-in palettes, in picker order.
    pub static ref ALL: Vec<&'static PaletteData> =
        vec![&VIRIDIS, &MAGMA, &PLASMA, &SPECTRAL];
}

/// Look a built-in palette up by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static PaletteData> {
    ALL.iter().copied().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_normalized() {
        for p in ALL.iter() {
            assert!(p.len() >= 2, "{}", p.name);
            for color in &p.rgb {
                for x in [color.r, color.g, color.b] {
                    assert!((0. ..=1.).contains(&x), "{}", p.name);
                }
            }
        }
    }

    #[test]
    fn find_by_name() {
        assert!(find("viridis").is_some());
        assert!(find("Spectral").is_some());
        assert!(find("no-such-palette").is_none());
    }

    #[test]
    fn viridis_endpoints() {
        let p = VIRIDIS.discrete();
        assert_eq!(p.resolve(0., 1., false), "rgba(68, 1, 84, 1)");
        assert_eq!(p.resolve(1., 1., false), "rgba(253, 231, 37, 1)");
        // the ramp hits the same endpoints
        let r = VIRIDIS.ramp();
        assert_eq!(r.resolve(0., 1., false), "rgba(68, 1, 84, 1)");
        assert_eq!(r.resolve(1., 1., false), "rgba(253, 231, 37, 1)");
    }
}
