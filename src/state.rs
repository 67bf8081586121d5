//! Shared coloring context and safe feature-property access.

use serde_json::Value;
use crate::Palette;

/// Snapshot of the display configuration consumed by every strategy call.
///
/// Built once by the configuration layer whenever display settings change
/// and treated as immutable for the lifetime of a render pass, so color
/// functions can read it from any thread without coordination.
///
/// # Example
///
/// ```
/// use feature_colors::{ColorState, palettes};
/// let state = ColorState::new()
///     .property_path(vec!["properties".into(), "height".into()])
///     .filters(Some(0.), Some(250.))
///     .palette(palettes::VIRIDIS.discrete());
/// ```
#[derive(Clone, Default)]
pub struct ColorState {
    /// Ordered key path selecting the feature property to color by.
    pub property_path: Option<Vec<String>>,
    /// Lower bound for range normalization.
    pub min_filter: Option<f64>,
    /// Upper bound for range normalization.
    pub max_filter: Option<f64>,
    pub palette: Option<Palette>,
    /// Reverse the palette direction.
    pub palette_flip: bool,
    /// (value, occurrences) pairs sorted by descending count; nulls are
    /// skipped during ranking.
    pub value_counts: Vec<(Value, u64)>,
    /// Read by the configuration layer, not by the strategies.
    pub hide_outliers: bool,
}

impl ColorState {
    pub fn new() -> Self { Self::default() }

    pub fn property_path(mut self, path: Vec<String>) -> Self {
        self.property_path = Some(path);
        self
    }

    pub fn filters(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_filter = min;
        self.max_filter = max;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn palette_flip(mut self, flip: bool) -> Self {
        self.palette_flip = flip;
        self
    }

    pub fn value_counts(mut self, counts: Vec<(Value, u64)>) -> Self {
        self.value_counts = counts;
        self
    }

    pub fn hide_outliers(mut self, hide: bool) -> Self {
        self.hide_outliers = hide;
        self
    }

    /// Resolve the selected property path against a feature's attributes.
    pub fn property_value<'a>(&self, feature: &'a Value) -> Option<&'a Value> {
        lookup_property(feature, self.property_path.as_deref()?)
    }
}

/// Walk an ordered key path into a feature's attributes.
///
/// Objects are indexed by key, arrays by numeric string.  Returns `None` on
/// any missing segment or type mismatch rather than erroring, so features
/// lacking a nested property simply fall through to the gray sentinel.
pub fn lookup_property<'a>(feature: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = feature;
    for key in path {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
