//! The fixed set of feature-coloring strategies.

use serde_json::Value;
use crate::hash::color_hash;
use crate::parse::parse_number;
use crate::state::ColorState;
use crate::NEUTRAL_GRAY;

/// A strategy's per-feature color function.
///
/// Plain `fn` pointers only: these run once per feature, potentially on a
/// worker far away from where the [`ColorState`] was built, and must not
/// capture anything beyond their two parameters.
pub type ColorFn = fn(&Value, &ColorState) -> String;

/// One named coloring algorithm.  The set is closed: the configuration
/// layer selects a mode by name, no dynamic registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// No color function; the caller keeps its default/static coloring.
    Xray,
    /// Hash of the entire feature value.
    Hash,
    /// Hash of the selected property's value.
    Property,
    /// Linear normalization of the selected property between the state's
    /// min/max filters.
    Range,
    /// Normalization by the property value's frequency rank.
    Rank,
}

/// What a strategy needs from the configuration layer, and how it colors.
#[derive(Clone, Copy)]
pub struct Strategy {
    /// A feature property must be selected before this mode applies.
    pub uses_property: bool,
    /// A palette must be chosen before this mode applies.
    pub uses_palette: bool,
    /// A min/max filter step applies to this mode.
    pub limits_range: bool,
    /// Per-feature color function; `None` means the caller falls back to
    /// its default coloring.
    pub color: Option<ColorFn>,
}

impl ColorMode {
    /// All modes, useful for UI pickers.
    pub const ALL: &'static [ColorMode] = &[
        ColorMode::Xray,
        ColorMode::Hash,
        ColorMode::Property,
        ColorMode::Range,
        ColorMode::Rank,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Xray => "xray",
            ColorMode::Hash => "hash",
            ColorMode::Property => "property",
            ColorMode::Range => "range",
            ColorMode::Rank => "rank",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorMode> {
        match name {
            "xray" => Some(ColorMode::Xray),
            "hash" => Some(ColorMode::Hash),
            "property" => Some(ColorMode::Property),
            "range" => Some(ColorMode::Range),
            "rank" => Some(ColorMode::Rank),
            _ => None,
        }
    }

    /// The fixed record for this mode.
    pub fn strategy(&self) -> Strategy {
        match self {
            ColorMode::Xray => Strategy {
                uses_property: false,
                uses_palette: false,
                limits_range: false,
                color: None,
            },
            ColorMode::Hash => Strategy {
                uses_property: false,
                uses_palette: false,
                limits_range: false,
                color: Some(hash_color),
            },
            ColorMode::Property => Strategy {
                uses_property: true,
                uses_palette: false,
                limits_range: false,
                color: Some(hash_color),
            },
            ColorMode::Range => Strategy {
                uses_property: true,
                uses_palette: true,
                limits_range: true,
                color: Some(range_color),
            },
            ColorMode::Rank => Strategy {
                uses_property: true,
                uses_palette: true,
                limits_range: false,
                color: Some(rank_color),
            },
        }
    }
}

/// Hash of the value itself; serves both whole-feature and per-property
/// coloring.
fn hash_color(value: &Value, _state: &ColorState) -> String {
    color_hash(value)
}

/// Color by the property's numeric value within the min/max filter range.
fn range_color(value: &Value, state: &ColorState) -> String {
    let (Some(min), Some(max)) = (state.min_filter, state.max_filter) else {
        return NEUTRAL_GRAY.to_string();
    };
    let Some(number) = parse_number(value) else {
        return NEUTRAL_GRAY.to_string();
    };
    let Some(palette) = &state.palette else {
        return NEUTRAL_GRAY.to_string();
    };
    let delta = max - min;
    let ratio = if delta == 0. {
        1.
    } else {
        // min maps to 0, max to 1
        (1. - (max - number) / delta).clamp(0., 1.)
    };
    palette.resolve(ratio, 0.75, state.palette_flip)
}

/// Color by the property value's frequency rank among observed values.
fn rank_color(value: &Value, state: &ColorState) -> String {
    let counts: Vec<&(Value, u64)> = state.value_counts.iter()
        .filter(|entry| !entry.0.is_null())
        .collect();
    // exact match, no coercion: 5 and "5" rank separately
    let Some(rank) = counts.iter().position(|entry| entry.0 == *value) else {
        return NEUTRAL_GRAY.to_string();
    };
    let Some(palette) = &state.palette else {
        return NEUTRAL_GRAY.to_string();
    };
    let ratio = if counts.len() <= 1 {
        1.
    } else {
        // most frequent value (rank 0) maps to 1, rarest to 0
        (1. - rank as f64 / (counts.len() - 1) as f64).clamp(0., 1.)
    };
    palette.resolve(ratio, 0.75, state.palette_flip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB;
    use serde_json::json;
    use crate::Palette;

    fn bw() -> Palette {
        Palette::Discrete(vec![RGB { r: 0., g: 0., b: 0. },
                               RGB { r: 1., g: 1., b: 1. }])
    }

    fn range_state() -> ColorState {
        ColorState::new()
            .filters(Some(0.), Some(10.))
            .palette(bw())
    }

    #[test]
    fn registry_flags() {
        assert!(ColorMode::Xray.strategy().color.is_none());
        assert!(!ColorMode::Hash.strategy().uses_property);
        assert!(ColorMode::Property.strategy().uses_property);
        assert!(!ColorMode::Property.strategy().uses_palette);
        assert!(ColorMode::Range.strategy().uses_palette);
        assert!(ColorMode::Range.strategy().limits_range);
        assert!(ColorMode::Rank.strategy().uses_palette);
        assert!(!ColorMode::Rank.strategy().limits_range);
    }

    #[test]
    fn names_round_trip() {
        for &mode in ColorMode::ALL {
            assert_eq!(ColorMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(ColorMode::from_name("heatmap"), None);
    }

    #[test]
    fn range_midpoint() {
        let state = range_state();
        assert_eq!(range_color(&json!("5"), &state),
                   bw().resolve(0.5, 0.75, false));
        // formatted strings parse the same way
        assert_eq!(range_color(&json!("5 meters"), &state),
                   range_color(&json!(5), &state));
    }

    #[test]
    fn range_endpoints() {
        let state = range_state();
        assert_eq!(range_color(&json!(0), &state), bw().resolve(0., 0.75, false));
        assert_eq!(range_color(&json!(10), &state), bw().resolve(1., 0.75, false));
        // values beyond the filters clamp
        assert_eq!(range_color(&json!(-5), &state), bw().resolve(0., 0.75, false));
        assert_eq!(range_color(&json!(99), &state), bw().resolve(1., 0.75, false));
    }

    #[test]
    fn range_degenerate_bounds() {
        let state = ColorState::new().filters(Some(7.), Some(7.)).palette(bw());
        // delta of zero always lands on ratio 1
        assert_eq!(range_color(&json!(3), &state), bw().resolve(1., 0.75, false));
        assert_eq!(range_color(&json!(7), &state), bw().resolve(1., 0.75, false));
    }

    #[test]
    fn range_bad_inputs_are_gray() {
        let state = range_state();
        assert_eq!(range_color(&Value::Null, &state), NEUTRAL_GRAY);
        assert_eq!(range_color(&json!("abc"), &state), NEUTRAL_GRAY);
        let unbounded = ColorState::new().palette(bw());
        assert_eq!(range_color(&json!(5), &unbounded), NEUTRAL_GRAY);
        let no_palette = ColorState::new().filters(Some(0.), Some(10.));
        assert_eq!(range_color(&json!(5), &no_palette), NEUTRAL_GRAY);
    }

    #[test]
    fn range_respects_flip() {
        let state = range_state().palette_flip(true);
        assert_eq!(range_color(&json!(10), &state), bw().resolve(1., 0.75, true));
        assert_eq!(range_color(&json!(10), &state), bw().resolve(0., 0.75, false));
    }

    fn rank_state() -> ColorState {
        ColorState::new()
            .palette(bw())
            .value_counts(vec![(json!("a"), 5), (json!("b"), 3), (json!("c"), 1)])
    }

    #[test]
    fn rank_positions() {
        let state = rank_state();
        assert_eq!(rank_color(&json!("a"), &state),
                   bw().resolve(1., 0.75, false));
        assert_eq!(rank_color(&json!("b"), &state),
                   bw().resolve(0.5, 0.75, false));
        assert_eq!(rank_color(&json!("c"), &state),
                   bw().resolve(0., 0.75, false));
        assert_eq!(rank_color(&json!("z"), &state), NEUTRAL_GRAY);
    }

    #[test]
    fn rank_skips_null_entries() {
        let state = ColorState::new()
            .palette(bw())
            .value_counts(vec![(Value::Null, 9), (json!("a"), 5), (json!("b"), 1)]);
        // "a" ranks first once the null entry is dropped
        assert_eq!(rank_color(&json!("a"), &state),
                   bw().resolve(1., 0.75, false));
        assert_eq!(rank_color(&Value::Null, &state), NEUTRAL_GRAY);
    }

    #[test]
    fn rank_single_entry_is_full_ratio() {
        let state = ColorState::new()
            .palette(bw())
            .value_counts(vec![(json!("only"), 4)]);
        assert_eq!(rank_color(&json!("only"), &state),
                   bw().resolve(1., 0.75, false));
    }

    #[test]
    fn rank_matches_exactly() {
        let state = ColorState::new()
            .palette(bw())
            .value_counts(vec![(json!(5), 2), (json!("5"), 1)]);
        assert_eq!(rank_color(&json!(5), &state),
                   bw().resolve(1., 0.75, false));
        assert_eq!(rank_color(&json!("5"), &state),
                   bw().resolve(0., 0.75, false));
    }

    #[test]
    fn color_functions_are_idempotent() {
        let state = rank_state().filters(Some(0.), Some(10.));
        for &mode in ColorMode::ALL {
            if let Some(color) = mode.strategy().color {
                let v = json!("a");
                assert_eq!(color(&v, &state), color(&v, &state), "{}", mode.name());
            }
        }
    }
}
