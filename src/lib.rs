//! Per-feature coloring for vector tile scenes.
//!
//! - [`Palette`] and [`ColorRamp`]
//! - [`ColorMode`] and [`Strategy`]
//! - [`ColorState`]
//!
//! A rendering pipeline selects a [`ColorMode`], builds a [`ColorState`]
//! whenever display settings change, and then calls the mode's color
//! function once per feature with that feature's attribute value.  Every
//! color function is pure and self-contained: it reads nothing but its two
//! arguments, so calls can run on any thread, in any order, far away from
//! where the state was assembled.
//!
//! Failures never surface.  A missing property, an unparseable number, a
//! malformed palette all degrade to the same [`NEUTRAL_GRAY`] sentinel so a
//! bad value can never crash or blank a feature.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use rgb::{RGB, RGB8};

mod hash;
mod parse;
mod state;
mod strategies;
pub mod palettes;

pub use hash::color_hash;
pub use parse::{extract_number, parse_number};
pub use state::{lookup_property, ColorState};
pub use strategies::{ColorFn, ColorMode, Strategy};
pub use palettes::{PaletteData, PaletteKind};

/// Fallback color substituted whenever a color computation cannot proceed.
pub const NEUTRAL_GRAY: &str = "rgba(128, 128, 128, 0.5)";

/// A “continuous” palette parametrized by reals in \[0, 1\].
///
/// Implementors must be cheap to evaluate and must not panic: a ramp is
/// invoked once per feature, potentially many thousands of times per render
/// pass.  Any closure `Fn(f64, f64) -> String` works as a ramp.
pub trait ColorRamp: Send + Sync {
    /// Returns the CSS color corresponding to `t` ∈ \[0., 1.\] with the
    /// given alpha.
    fn color(&self, t: f64, alpha: f64) -> String;
}

impl<F> ColorRamp for F
where F: Fn(f64, f64) -> String + Send + Sync {
    fn color(&self, t: f64, alpha: f64) -> String { self(t, alpha) }
}

/// A palette: either a discrete ordered list of RGB triples (each channel
/// in \[0, 1\]) or a continuous [`ColorRamp`].
#[derive(Clone)]
pub enum Palette {
    /// Ordered colors, resolved by nearest index.
    Discrete(Vec<RGB<f64>>),
    /// Ramp evaluated directly at the requested position.
    Continuous(Arc<dyn ColorRamp>),
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::Discrete(colors) =>
                f.debug_tuple("Discrete").field(colors).finish(),
            Palette::Continuous(_) => f.write_str("Continuous(..)"),
        }
    }
}

impl Palette {
    /// Wrap a [`ColorRamp`] as a continuous palette.
    pub fn continuous(ramp: impl ColorRamp + 'static) -> Self {
        Palette::Continuous(Arc::new(ramp))
    }

    /// Map a normalized `ratio` to a CSS color string.
    ///
    /// The ratio is clamped to \[0, 1\] and reversed when `flip` is set.
    /// Discrete palettes pick the color at index `round(ratio × (len−1))`
    /// and scale each channel by 255; continuous palettes are delegated to
    /// as-is.  Never panics: a non-finite ratio, an empty palette or an
    /// out-of-range lookup all return [`NEUTRAL_GRAY`].
    pub fn resolve(&self, ratio: f64, alpha: f64, flip: bool) -> String {
        if !ratio.is_finite() {
            return NEUTRAL_GRAY.to_string();
        }
        let mut ratio = ratio.clamp(0., 1.);
        if flip {
            ratio = 1. - ratio;
        }
        match self {
            Palette::Continuous(ramp) => ramp.color(ratio, alpha),
            Palette::Discrete(colors) => {
                if colors.is_empty() {
                    return NEUTRAL_GRAY.to_string();
                }
                let index = (ratio * (colors.len() - 1) as f64).round() as usize;
                match colors.get(index) {
                    Some(c) => rgba_string(
                        RGB { r: c.r * 255., g: c.g * 255., b: c.b * 255. },
                        alpha),
                    None => NEUTRAL_GRAY.to_string(),
                }
            }
        }
    }
}

/// Format a color with channels in \[0, 255\] as `rgba(r, g, b, a)`.
fn rgba_string(c: RGB<f64>, alpha: f64) -> String {
    format!("rgba({}, {}, {}, {})",
            channel(c.r), channel(c.g), channel(c.b), alpha)
}

#[inline]
fn channel(x: f64) -> u8 {
    x.clamp(0., 255.).round() as u8
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point.  This color space is CIE L*a*b* with polar
/// coordinates.
#[derive(Clone, Copy)]
struct Lch {
    /// The lightness.
    l: f64,
    /// The chroma, in the range 0. to 181.02, but less in practice.
    c: f64,
    /// The hue in degrees in the range 0. to 2π.
    h: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;
const TWO_PI: f64 = 2. * PI;

impl Lch {
    fn from_rgb(c: RGB<f64>) -> Lch {
        // See https://github.com/dbuenzli/gg/blob/b8704687d669d139bb4ac7a54115afc7e5caaa55/src/gg.ml#L2926
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let xr = 0.4522795 * c.r + 0.3993744 * c.g + 0.1483460 * c.b;
        let yr = 0.2225105 * c.r + 0.7168863 * c.g + 0.0606032 * c.b;
        let zr = 0.0168820 * c.r + 0.1176865 * c.g + 0.8654315 * c.b;
        let fx = if xr > EPS { xr.powf(C0) } else { C1 * xr + C2 };
        let fy = if yr > EPS { yr.powf(C0) } else { C1 * yr + C2 };
        let fz = if zr > EPS { zr.powf(C0) } else { C1 * zr + C2 };
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = { let h = b.atan2(a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l, c: a.hypot(b), h }
    }

    fn to_rgb(&self) -> RGB<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let fx1 = if fx > EPS0 { fx * fx * fx } else { C0 * (fx - C1) };
        let fy1 = if fy > EPS0 { fy * fy * fy } else { C0 * (fy - C1) };
        let fz1 = if fz > EPS0 { fz * fz * fz } else { C0 * (fz - C1) };
        let r = 3.0215932  * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906  * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        RGB { r, g, b }
    }
}

/// Continuous ramp interpolating between two colors in LCh space.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use feature_colors::{ColorRamp, Gradient};
/// let red = RGB8::new(255, 0, 0);
/// let blue = RGB8::new(0, 0, 255);
/// let grad = Gradient::new(red, blue);
/// let css = grad.color(0.5, 1.);
/// ```
pub struct Gradient {
    c0: Lch, // first color
    dc: Lch, // last - first color
}

impl Gradient {
    /// Ramp from color `c0` to color `c1`.
    pub fn new(c0: RGB8, c1: RGB8) -> Gradient {
        Gradient::between(
            RGB { r: c0.r as f64, g: c0.g as f64, b: c0.b as f64 },
            RGB { r: c1.r as f64, g: c1.g as f64, b: c1.b as f64 })
    }

    /// Same, from colors with channels in \[0, 255\].
    fn between(c0: RGB<f64>, c1: RGB<f64>) -> Gradient {
        let lch0 = Lch::from_rgb(c0);
        let lch1 = Lch::from_rgb(c1);
        let h0 = lch0.h;
        let h1 = lch1.h;
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c,
                             h: dh } }
    }

    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does not
    /// check the latter condition.
    #[inline]
    fn rgb_unsafe(&self, t: f64) -> RGB<f64> {
        Lch { l: self.c0.l + t * self.dc.l,
              c: self.c0.c + t * self.dc.c,
              h: self.c0.h + t * self.dc.h }
            .to_rgb()
    }
}

impl ColorRamp for Gradient {
    fn color(&self, t: f64, alpha: f64) -> String {
        rgba_string(self.rgb_unsafe(t.clamp(0., 1.)), alpha)
    }
}

/// Continuous ramp sweeping the full hue circle.
pub struct Hue;

impl ColorRamp for Hue {
    fn color(&self, t: f64, alpha: f64) -> String {
        let t = 6. * t.clamp(0., 1.);
        let f = 255. * t.fract();
        let ti = t.trunc().rem_euclid(6.);
        let rgb = {
            if ti == 0.      { RGB { r: 255., g: f,         b: 0. } }
            else if ti == 1. { RGB { r: 255. - f, g: 255.,  b: 0. } }
            else if ti == 2. { RGB { r: 0.,   g: 255.,      b: f } }
            else if ti == 3. { RGB { r: 0.,   g: 255. - f,  b: 255. } }
            else if ti == 4. { RGB { r: f,    g: 0.,        b: 255. } }
            else             { RGB { r: 255., g: 0.,        b: 255. - f } }
        };
        rgba_string(rgb, alpha)
    }
}

/// Continuous ramp built from the stops of a discrete palette, one
/// [`Gradient`] per pair of adjacent colors.
pub struct PaletteRamp {
    gradients: Vec<Gradient>,
}

impl PaletteRamp {
    /// Build a ramp over `colors` (channels in \[0, 1\], at least 2 stops
    /// for a non-degenerate ramp).
    pub fn new(colors: &[RGB<f64>]) -> Self {
        PaletteRamp {
            gradients: colors.windows(2)
                .map(|c| Gradient::between(
                    RGB { r: c[0].r * 255., g: c[0].g * 255., b: c[0].b * 255. },
                    RGB { r: c[1].r * 255., g: c[1].g * 255., b: c[1].b * 255. }))
                .collect() }
    }
}

impl ColorRamp for PaletteRamp {
    fn color(&self, t: f64, alpha: f64) -> String {
        let n = self.gradients.len();
        if n == 0 {
            return NEUTRAL_GRAY.to_string();
        }
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { rgba_string(self.gradients[i].rgb_unsafe(tn.fract()), alpha) }
        else { rgba_string(self.gradients[n - 1].rgb_unsafe(1.), alpha) }
    }
}
