use crate::config::PageSize;

pub(crate) const MM_PER_INCH: f64 = 25.4;
const MM_PER_PT: f64 = MM_PER_INCH / 72.0;

/// Points to millimetres.
pub(crate) fn pt(points: f64) -> f64 {
    points * MM_PER_PT
}

pub(crate) fn inch(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub(crate) fn fractions(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub(crate) const PRIMARY: RgbColor = RgbColor(0x2E, 0x40, 0x57);
pub(crate) const SECONDARY: RgbColor = RgbColor(0x6C, 0x75, 0x7D);
pub(crate) const ROW_BACKGROUND: RgbColor = RgbColor(0xF8, 0xF9, 0xFA);
pub(crate) const TOTAL_BACKGROUND: RgbColor = RgbColor(0xE9, 0xEC, 0xEF);
pub(crate) const BORDER: RgbColor = RgbColor(0xDE, 0xE2, 0xE6);
pub(crate) const WHITE: RgbColor = RgbColor(0xFF, 0xFF, 0xFF);
pub(crate) const BLACK: RgbColor = RgbColor(0x00, 0x00, 0x00);

/// Font sizes, in points.
pub(crate) mod font_size {
    pub(crate) const TITLE: f64 = 24.0;
    pub(crate) const HEADING: f64 = 12.0;
    pub(crate) const TABLE_HEADER: f64 = 12.0;
    pub(crate) const TOTALS: f64 = 11.0;
    pub(crate) const BODY: f64 = 10.0;
    pub(crate) const PAGE_FOOTER: f64 = 8.0;
}

/// Vertical spacing between blocks, in points.
pub(crate) mod spacing {
    pub(crate) const TITLE_AFTER: f64 = 30.0;
    pub(crate) const TITLE_BOTTOM: f64 = 20.0;
    pub(crate) const SECTION_BOTTOM: f64 = 30.0;
    pub(crate) const PARTIES_BOTTOM: f64 = 40.0;
    pub(crate) const ITEMS_HEADER: f64 = 10.0;
    pub(crate) const FOOTER_TOP: f64 = 40.0;
    pub(crate) const NOTES: f64 = 5.0;
}

/// Cell padding, in points.
pub(crate) mod padding {
    pub(crate) const CELL_X: f64 = 12.0;
    pub(crate) const CELL_Y: f64 = 8.0;
    pub(crate) const HEADER_TOP: f64 = 3.0;
    pub(crate) const HEADER_BOTTOM: f64 = 12.0;
    pub(crate) const INFO_X: f64 = 6.0;
    pub(crate) const INFO_TOP: f64 = 3.0;
    pub(crate) const INFO_BOTTOM: f64 = 6.0;
}

/// Ratio of line height to font size.
pub(crate) const LEADING: f64 = 1.2;

/// Page geometry, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    pub(crate) fn for_size(page_size: PageSize) -> Self {
        let (width, height) = match page_size {
            PageSize::Letter => (inch(8.5), inch(11.0)),
            PageSize::A4 => (210.0, 297.0),
        };
        Self {
            width,
            height,
            margin: inch(0.75),
        }
    }

    pub(crate) fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub(crate) fn content_top(&self) -> f64 {
        self.height - self.margin
    }

    pub(crate) fn content_bottom(&self) -> f64 {
        self.margin
    }
}

/// Column widths in inches, scaled down when the content area is narrower.
pub(crate) fn scaled_columns(inches: &[f64], available: f64) -> Vec<f64> {
    let natural: f64 = inches.iter().map(|w| inch(*w)).sum();
    let scale = if natural > available {
        available / natural
    } else {
        1.0
    };
    inches.iter().map(|w| inch(*w) * scale).collect()
}

pub(crate) const INFO_COLUMNS: [f64; 2] = [1.5, 2.0];
pub(crate) const CONTACT_COLUMNS: [f64; 2] = [3.5, 3.5];
pub(crate) const ITEM_COLUMNS: [f64; 4] = [3.0, 1.0, 1.25, 1.25];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_content_area_is_seven_inches() {
        let page = PageGeometry::for_size(PageSize::Letter);
        assert!((page.content_width() - inch(7.0)).abs() < 1e-9);
    }

    #[test]
    fn columns_shrink_to_fit_a4() {
        let page = PageGeometry::for_size(PageSize::A4);
        let columns = scaled_columns(&CONTACT_COLUMNS, page.content_width());
        let total: f64 = columns.iter().sum();
        assert!((total - page.content_width()).abs() < 1e-9);

        let items = scaled_columns(&ITEM_COLUMNS, page.content_width());
        assert!((items[0] - inch(3.0)).abs() < 1e-9);
    }
}
