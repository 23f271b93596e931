//! Where the tape's ticks land on screen.
//!
//! The tape is centred on the current value: the indicator sits at `width / 2`
//! and every tick is placed by its distance in value from the current value,
//! shifted left by the engine's render offset. Only ticks that can be seen
//! (plus a margin for labels that straddle the edge) are produced.

use smallvec::SmallVec;

use crate::config::RangeConfig;
use crate::engine::ScaleEngine;

/// Ticks further than this outside the viewport are dropped.
pub const TICK_CULL_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: i32,
    pub x: f32,
    pub kind: TickKind,
}

impl Tick {
    /// Text drawn under major ticks.
    pub fn label(&self) -> Option<String> {
        match self.kind {
            TickKind::Major => Some(self.value.to_string()),
            TickKind::Minor => None,
        }
    }
}

pub type TickList = SmallVec<[Tick; 64]>;

#[derive(Debug, Clone, PartialEq)]
pub struct TapeLayout {
    /// Visible ticks, left to right.
    pub ticks: TickList,
    /// Horizontal rule from the min tick to the max tick, clipped to the
    /// viewport. `None` when the range is entirely off screen.
    pub baseline: Option<(f32, f32)>,
    pub indicator_x: f32,
}

impl TapeLayout {
    pub fn for_engine(engine: &ScaleEngine, width: f32) -> Self {
        Self::compute(engine.range(), engine.value(), engine.render_offset(), width)
    }

    pub fn compute(range: &RangeConfig, value: i32, render_offset: f32, width: f32) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let center = width / 2.0;
        let ppu = f64::from(range.pixels_per_unit());
        let minor = i64::from(range.minor_tick_value);
        let stride = i64::from(range.major_tick_stride);
        let value = i64::from(value);
        let offset = f64::from(render_offset);

        let x_of = |tick_value: i64| -> f32 {
            (f64::from(center) + (tick_value - value) as f64 * ppu - offset) as f32
        };

        // Value window that maps inside the culling bounds.
        let low = -f64::from(TICK_CULL_MARGIN);
        let high = f64::from(width + TICK_CULL_MARGIN);
        let value_low = value as f64 + (low - f64::from(center) + offset) / ppu;
        let value_high = value as f64 + (high - f64::from(center) + offset) / ppu;

        let first = (value_low / minor as f64)
            .ceil()
            .max(div_ceil(i64::from(range.min_value), minor) as f64) as i64;
        let last = (value_high / minor as f64)
            .floor()
            .min(i64::from(range.max_value).div_euclid(minor) as f64) as i64;

        let mut ticks = TickList::new();
        for index in first..=last {
            let tick_value = index * minor;
            let x = x_of(tick_value);
            if !(-TICK_CULL_MARGIN..=width + TICK_CULL_MARGIN).contains(&x) {
                continue;
            }
            let kind = if index.rem_euclid(stride) == 0 {
                TickKind::Major
            } else {
                TickKind::Minor
            };
            ticks.push(Tick {
                value: tick_value as i32,
                x,
                kind,
            });
        }

        let start = x_of(i64::from(range.min_value)).max(0.0);
        let end = x_of(i64::from(range.max_value)).min(width);
        let baseline = (start <= end).then_some((start, end));

        Self {
            ticks,
            baseline,
            indicator_x: center,
        }
    }

    pub fn majors(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|tick| tick.kind == TickKind::Major)
    }

    /// The tick closest to the indicator.
    pub fn tick_under_indicator(&self) -> Option<&Tick> {
        self.ticks.iter().min_by(|a, b| {
            (a.x - self.indicator_x)
                .abs()
                .total_cmp(&(b.x - self.indicator_x).abs())
        })
    }
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    -(-value).div_euclid(divisor)
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
