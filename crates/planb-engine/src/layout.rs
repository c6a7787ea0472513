use serde::{Deserialize, Serialize};

/// Viewport width at which cards switch from the carousel to the grid
pub const DEFAULT_CAROUSEL_BREAKPOINT_PX: f64 = 960.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Horizontal snapping carousel; the active card is scrolled to the center
    #[default]
    Carousel,
    /// All cards visible; no programmatic scrolling
    Grid,
}

impl LayoutMode {
    pub fn for_viewport_width(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            LayoutMode::Grid
        } else {
            LayoutMode::Carousel
        }
    }

    pub fn scrolls(self) -> bool {
        matches!(self, LayoutMode::Carousel)
    }
}

/// Index of the card whose center is closest to `center_offset`.
///
/// Ties go to the lower index. Non-finite centers are ignored.
pub fn nearest_card_index(center_offset: f64, card_centers: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, center) in card_centers.iter().enumerate() {
        let distance = (center - center_offset).abs();
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}
