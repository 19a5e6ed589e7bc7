//! Slider position-to-value mapping.

use crate::field::SliderAttrs;
use crate::value::FieldValue;

const MAX_TICKS: usize = 10;

/// Value for a gesture at `position` on a track `track_width` wide.
/// Called on press and on every drag move. A track without width maps to
/// `min`.
pub fn value_at(attrs: &SliderAttrs, position: f64, track_width: f64) -> f64 {
    let ratio = (position / track_width).clamp(0.0, 1.0);
    if !(track_width > 0.0) || !ratio.is_finite() {
        return attrs.min;
    }
    snap(attrs, attrs.min + ratio * attrs.range())
}

/// Move by whole steps from the current value (arrow keys).
pub fn nudge(attrs: &SliderAttrs, current: &FieldValue, steps: i8) -> f64 {
    let base = current.as_number().unwrap_or(attrs.min);
    snap(attrs, base + f64::from(steps) * attrs.step())
}

/// Share of the track left of the thumb, in `[0, 1]`.
pub fn fill_ratio(attrs: &SliderAttrs, current: &FieldValue) -> f64 {
    let value = current.as_number().unwrap_or(attrs.min);
    let range = attrs.range();
    if !(range > 0.0) {
        return 0.0;
    }
    ((value - attrs.min) / range).clamp(0.0, 1.0)
}

/// Tick values, evenly spaced from `min` to `max`. Empty unless
/// `showTicks` is set.
pub fn ticks(attrs: &SliderAttrs) -> Vec<f64> {
    if !attrs.show_ticks {
        return Vec::new();
    }
    let steps = (attrs.range() / attrs.step()).floor();
    let count = if steps.is_finite() && steps >= 0.0 {
        (steps as usize + 1).min(MAX_TICKS)
    } else {
        1
    };
    if count < 2 {
        return vec![attrs.min];
    }
    let spacing = attrs.range() / (count - 1) as f64;
    (0..count).map(|i| attrs.min + spacing * i as f64).collect()
}

/// Nearest step, ties toward +inf (`-1.5` steps snaps to `-1`).
fn snap(attrs: &SliderAttrs, raw: f64) -> f64 {
    let step = attrs.step();
    let snapped = if step > 0.0 {
        (raw / step + 0.5).floor() * step
    } else {
        raw
    };
    snapped.clamp(attrs.min, attrs.max)
}
