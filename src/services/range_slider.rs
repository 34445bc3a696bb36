//! Dual-handle price slider
//!
//! Drag events only move the handles and the live label. The selected range
//! leaves the slider on release, which is the single point where the catalog
//! gets requeried.

use rust_decimal::Decimal;

use crate::models::filter::PriceRange;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Min,
    Max,
}

/// Slider state. Invariant: `floor <= min`, `min + step <= max`, `max <= ceiling`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    floor: Decimal,
    ceiling: Decimal,
    step: Decimal,
    min: Decimal,
    max: Decimal,
    dragging: Option<Handle>,
}

impl RangeSlider {
    pub fn new(floor: Decimal, ceiling: Decimal, step: Decimal) -> AppResult<Self> {
        if step <= Decimal::ZERO {
            return Err(AppError::BadRequest("slider step must be positive".to_string()));
        }
        if ceiling - floor < step {
            return Err(AppError::BadRequest(format!(
                "slider track [{}, {}] is shorter than one step of {}",
                floor, ceiling, step
            )));
        }
        Ok(Self {
            floor,
            ceiling,
            step,
            min: floor,
            max: ceiling,
            dragging: None,
        })
    }

    /// Slider over the track of an existing range, starting at its selection.
    pub fn for_range(range: PriceRange, step: Decimal) -> AppResult<Self> {
        let mut slider = Self::new(range.floor, range.ceiling, step)?;
        slider.set_range(range.min, range.max);
        Ok(slider)
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn dragging(&self) -> Option<Handle> {
        self.dragging
    }

    /// Current selection as a range on this slider's track.
    pub fn range(&self) -> PriceRange {
        PriceRange::new(self.floor, self.ceiling).narrowed(self.min, self.max)
    }

    pub fn begin_drag(&mut self, handle: Handle) {
        self.dragging = Some(handle);
    }

    /// Move the dragged handle. Returns the handle's new position, or `None`
    /// when no drag is in progress.
    pub fn drag_to(&mut self, value: Decimal) -> Option<Decimal> {
        let handle = self.dragging?;
        Some(self.move_handle(handle, value))
    }

    /// End the drag and emit the committed range. `None` if nothing was dragged.
    pub fn release(&mut self) -> Option<PriceRange> {
        self.dragging.take().map(|_| self.range())
    }

    /// Programmatic update of both handles, clamped to the track. Values are
    /// kept off the step grid so a restored selection survives as given.
    pub fn set_range(&mut self, min: Decimal, max: Decimal) -> PriceRange {
        self.max = max.clamp(self.floor + self.step, self.ceiling);
        self.min = min.clamp(self.floor, self.max - self.step);
        self.range()
    }

    pub fn reset(&mut self) {
        self.min = self.floor;
        self.max = self.ceiling;
        self.dragging = None;
    }

    /// Live label shown next to the slider, e.g. `GH₵ 0 – GH₵ 400,000`.
    pub fn display_label(&self) -> String {
        format!("{} – {}", format_cedis(self.min), format_cedis(self.max))
    }

    fn move_handle(&mut self, handle: Handle, value: Decimal) -> Decimal {
        let value = self.snap(value);
        match handle {
            Handle::Min => {
                self.min = value.clamp(self.floor, self.max - self.step);
                self.min
            }
            Handle::Max => {
                self.max = value.clamp(self.min + self.step, self.ceiling);
                self.max
            }
        }
    }

    /// Nearest grid position. Out-of-range arithmetic lands on the track limit
    /// the value points at.
    fn snap(&self, value: Decimal) -> Decimal {
        value
            .checked_sub(self.floor)
            .and_then(|offset| offset.checked_div(self.step))
            .and_then(|steps| steps.round().checked_mul(self.step))
            .and_then(|offset| offset.checked_add(self.floor))
            .unwrap_or(if value < self.floor {
                self.floor
            } else {
                self.ceiling
            })
    }
}

/// Format an amount in whole cedis with thousands separators.
pub fn format_cedis(amount: Decimal) -> String {
    let rounded = amount.round().to_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}GH₵ {}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> RangeSlider {
        RangeSlider::new(Decimal::ZERO, Decimal::from(800_000), Decimal::from(10_000)).unwrap()
    }

    #[test]
    fn test_rejects_bad_track() {
        assert!(RangeSlider::new(Decimal::ZERO, Decimal::from(100), Decimal::ZERO).is_err());
        assert!(RangeSlider::new(Decimal::ZERO, Decimal::from(5), Decimal::from(10)).is_err());
    }

    #[test]
    fn test_drag_updates_label_without_commit() {
        let mut slider = slider();
        slider.begin_drag(Handle::Max);

        assert_eq!(slider.drag_to(Decimal::from(600_000)), Some(Decimal::from(600_000)));
        assert_eq!(slider.display_label(), "GH₵ 0 – GH₵ 600,000");
        assert_eq!(slider.drag_to(Decimal::from(400_000)), Some(Decimal::from(400_000)));
        assert_eq!(slider.dragging(), Some(Handle::Max));

        let committed = slider.release().unwrap();
        assert_eq!(committed.max, Decimal::from(400_000));
        assert!(committed.is_narrowed());
        assert_eq!(slider.dragging(), None);
    }

    #[test]
    fn test_release_without_drag_emits_nothing() {
        let mut slider = slider();
        assert_eq!(slider.drag_to(Decimal::from(1_000)), None);
        assert_eq!(slider.release(), None);

        slider.begin_drag(Handle::Min);
        assert!(slider.release().is_some());
        assert_eq!(slider.release(), None);
    }

    #[test]
    fn test_handles_cannot_cross() {
        let mut slider = slider();
        slider.set_range(Decimal::from(200_000), Decimal::from(300_000));

        slider.begin_drag(Handle::Min);
        assert_eq!(slider.drag_to(Decimal::from(500_000)), Some(Decimal::from(290_000)));
        slider.release();

        slider.begin_drag(Handle::Max);
        assert_eq!(slider.drag_to(Decimal::from(100_000)), Some(Decimal::from(300_000)));
        let range = slider.release().unwrap();

        assert!(range.min < range.max);
        assert_eq!(range.max - range.min, Decimal::from(10_000));
    }

    #[test]
    fn test_values_are_clamped_to_track() {
        let mut slider = slider();
        slider.begin_drag(Handle::Max);
        assert_eq!(slider.drag_to(Decimal::from(2_000_000)), Some(Decimal::from(800_000)));
        slider.release();

        slider.begin_drag(Handle::Min);
        assert_eq!(slider.drag_to(Decimal::from(-50_000)), Some(Decimal::ZERO));
        let range = slider.release().unwrap();
        assert!(!range.is_narrowed());
    }

    #[test]
    fn test_values_snap_to_step() {
        let mut slider = slider();
        slider.begin_drag(Handle::Max);
        assert_eq!(slider.drag_to(Decimal::from(404_000)), Some(Decimal::from(400_000)));
        assert_eq!(slider.drag_to(Decimal::from(406_000)), Some(Decimal::from(410_000)));
    }

    #[test]
    fn test_extreme_drag_values_land_on_track_limits() {
        let mut slider =
            RangeSlider::new(Decimal::ZERO, Decimal::from(800_000), Decimal::new(1, 28)).unwrap();

        slider.begin_drag(Handle::Max);
        assert_eq!(slider.drag_to(Decimal::MAX), Some(Decimal::from(800_000)));
        slider.release();

        slider.begin_drag(Handle::Min);
        assert_eq!(slider.drag_to(Decimal::MIN), Some(Decimal::ZERO));
    }

    #[test]
    fn test_set_range_keeps_off_grid_values() {
        let mut slider = slider();
        let range = slider.set_range(Decimal::from(123_456), Decimal::from(800_000));
        assert_eq!(range.min, Decimal::from(123_456));

        slider.begin_drag(Handle::Max);
        slider.drag_to(Decimal::from(400_000));
        let committed = slider.release().unwrap();
        assert_eq!(committed.min, Decimal::from(123_456));
        assert_eq!(committed.max, Decimal::from(400_000));
    }

    #[test]
    fn test_set_range_and_reset() {
        let mut slider = slider();
        let range = slider.set_range(Decimal::from(700_000), Decimal::from(100_000));
        assert!(range.min < range.max);
        assert!(range.min >= range.floor && range.max <= range.ceiling);

        slider.reset();
        assert_eq!(slider.min(), Decimal::ZERO);
        assert_eq!(slider.max(), Decimal::from(800_000));
    }

    #[test]
    fn test_for_range_starts_at_selection() {
        let range = PriceRange::rental_default().narrowed(Decimal::from(500), Decimal::from(1_500));
        let slider = RangeSlider::for_range(range, Decimal::from(50)).unwrap();
        assert_eq!(slider.range(), range);
    }

    #[test]
    fn test_format_cedis() {
        assert_eq!(format_cedis(Decimal::ZERO), "GH₵ 0");
        assert_eq!(format_cedis(Decimal::from(950)), "GH₵ 950");
        assert_eq!(format_cedis(Decimal::from(1_500)), "GH₵ 1,500");
        assert_eq!(format_cedis(Decimal::from(1_234_567)), "GH₵ 1,234,567");
    }
}
