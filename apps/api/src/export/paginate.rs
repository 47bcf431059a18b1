//! Slicing one tall captured image across A4 pages.
//!
//! The whole image is placed on every page; page k shifts it up by k page
//! heights so a different band shows through the page window.

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Slack for the bitmap size being rounded up to whole pixels.
pub const PAGE_TOLERANCE_MM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    /// Position of the image's top edge relative to the page's top edge.
    /// Zero on the first page, negative afterwards.
    pub offset_mm: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub image_width_mm: f32,
    pub image_height_mm: f32,
    pub page_count: usize,
}

impl PageLayout {
    /// Scales a `width x height` bitmap to the A4 width and counts the pages
    /// needed to show all of it.
    pub fn for_bitmap(width: u32, height: u32) -> Self {
        let image_height_mm = if width == 0 {
            0.0
        } else {
            height as f32 * A4_WIDTH_MM / width as f32
        };
        let needed = ((image_height_mm - PAGE_TOLERANCE_MM) / A4_HEIGHT_MM).ceil();
        let page_count = if needed.is_finite() && needed > 1.0 {
            needed as usize
        } else {
            1
        };
        Self {
            image_width_mm: A4_WIDTH_MM,
            image_height_mm,
            page_count,
        }
    }

    pub fn placements(&self) -> Vec<Placement> {
        (0..self.page_count)
            .map(|page| Placement {
                page,
                offset_mm: -(page as f32) * A4_HEIGHT_MM,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_for_short_content() {
        let layout = PageLayout::for_bitmap(1588, 1200);
        assert_eq!(layout.page_count, 1);
        assert_eq!(layout.placements(), vec![Placement { page: 0, offset_mm: 0.0 }]);
    }

    #[test]
    fn test_exact_page_with_rounding_slack() {
        // One A4 page at 2x, rounded up to whole pixels.
        let layout = PageLayout::for_bitmap(1588, 2246);
        assert!(layout.image_height_mm > A4_HEIGHT_MM);
        assert_eq!(layout.page_count, 1);
    }

    #[test]
    fn test_image_height_scales_to_page_width() {
        let layout = PageLayout::for_bitmap(1000, 2000);
        assert!((layout.image_height_mm - 420.0).abs() < 1e-3);
        assert_eq!(layout.image_width_mm, A4_WIDTH_MM);
        assert_eq!(layout.page_count, 2);
    }

    #[test]
    fn test_each_page_shifts_by_one_page_height() {
        // 2.5 pages tall.
        let layout = PageLayout::for_bitmap(210, 742);
        assert_eq!(layout.page_count, 3);
        let offsets: Vec<f32> = layout.placements().iter().map(|p| p.offset_mm).collect();
        assert_eq!(offsets, vec![0.0, -297.0, -594.0]);
    }

    #[test]
    fn test_degenerate_bitmap_still_yields_one_page() {
        assert_eq!(PageLayout::for_bitmap(0, 0).page_count, 1);
        assert_eq!(PageLayout::for_bitmap(100, 0).page_count, 1);
    }
}
