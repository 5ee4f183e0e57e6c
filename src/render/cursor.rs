//! Vertical cursor and page-break decisions.

use super::options::LayoutOptions;

/// Where the next line goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlacement {
    /// Baseline to draw at
    pub y: f32,

    /// A fresh page must be started before drawing
    pub needs_new_page: bool,
}

/// Tracks the baseline of the next line on the current page.
///
/// The cursor only moves down. It returns to the top when a page break is
/// reported.
#[derive(Debug, Clone)]
pub struct PageCursor {
    y: f32,
    top: f32,
    bottom: f32,
    line_height: f32,
}

impl PageCursor {
    /// Create a cursor at the top of the first page.
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            y: options.top_y(),
            top: options.top_y(),
            bottom: options.margin_bottom,
            line_height: options.line_height,
        }
    }

    /// Current baseline.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Reserve the next line.
    ///
    /// If the cursor has dropped below the bottom margin the placement asks
    /// for a new page and the line goes to the top of that page.
    pub fn advance(&mut self) -> LinePlacement {
        let needs_new_page = self.y < self.bottom;
        if needs_new_page {
            self.reset_for_new_page();
        }
        let y = self.y;
        self.y -= self.line_height;
        LinePlacement { y, needs_new_page }
    }

    /// Move back to the top margin.
    pub fn reset_for_new_page(&mut self) {
        self.y = self.top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_at_top() {
        let mut cursor = PageCursor::new(&LayoutOptions::default());
        let placement = cursor.advance();
        assert_eq!(placement.y, 792.0);
        assert!(!placement.needs_new_page);
        assert_eq!(cursor.y(), 772.0);
    }

    #[test]
    fn test_break_after_38_lines() {
        let mut cursor = PageCursor::new(&LayoutOptions::default());
        let placements: Vec<_> = (0..39).map(|_| cursor.advance()).collect();

        assert!(placements[..38].iter().all(|p| !p.needs_new_page));
        assert_eq!(placements[37].y, 52.0);
        assert!(placements[38].needs_new_page);
        assert_eq!(placements[38].y, 792.0);
    }

    #[test]
    fn test_strictly_decreasing_within_page() {
        let mut cursor = PageCursor::new(&LayoutOptions::default());
        let mut last = f32::INFINITY;
        for _ in 0..38 {
            let placement = cursor.advance();
            assert!(placement.y < last);
            assert!(placement.y >= 50.0);
            last = placement.y;
        }
    }

    #[test]
    fn test_reset() {
        let mut cursor = PageCursor::new(&LayoutOptions::default());
        cursor.advance();
        cursor.advance();
        cursor.reset_for_new_page();
        assert_eq!(cursor.y(), 792.0);
    }
}
