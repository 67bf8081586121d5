use std::sync::Arc;
use rgb::RGB;
use crate::{Palette, PaletteRamp};

/// A named colormap, channels in \[0, 1\].
pub struct PaletteData {
    pub name: &'static str,
    pub kind: PaletteKind,
    pub rgb: Vec<RGB<f64>>, // Invariant: length ≥ 2
}

/// Kind of palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteKind {
    /// Sequential color scheme, suited to ordered data that progress
    /// from low to high.
    Seq,
    /// Divergent color scheme, emphasizing mid-range critical values and
    /// extremes at both ends of the data range.
    Div,
    /// Qualitative color scheme, best suited to nominal or categorical
    /// data.
    Qual,
}

impl PaletteData {
    /// Returns the number of colors in the palette.
    pub fn len(&self) -> usize { self.rgb.len() }

    pub fn is_empty(&self) -> bool { self.rgb.is_empty() }

    /// The palette as a discrete [`Palette`], resolved by nearest index.
    pub fn discrete(&self) -> Palette {
        Palette::Discrete(self.rgb.clone())
    }

    /// A continuous [`Palette`] interpolating between the stops.
    /// It only makes sense for sequential and some diverging palettes.
    pub fn ramp(&self) -> Palette {
        Palette::Continuous(Arc::new(PaletteRamp::new(&self.rgb)))
    }
}
