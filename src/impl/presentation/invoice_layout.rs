use iso_currency::Currency;

use crate::{
    config::PageSize,
    entities::{InvoiceDocument, InvoiceLine},
    presentation::{
        invoice_style::{
            font_size, padding, pt, scaled_columns, spacing, PageGeometry, RgbColor, BLACK,
            BORDER, CONTACT_COLUMNS, INFO_COLUMNS, ITEM_COLUMNS, LEADING, PRIMARY,
            ROW_BACKGROUND, SECONDARY, TOTAL_BACKGROUND, WHITE,
        },
        text_metrics::{text_width, wrap_to_width, FontWeight},
        utils::{format_invoice_date, format_money, format_quantity, paid_label},
    },
};

/// A single drawing instruction. Coordinates are millimetres from the
/// bottom-left corner of the page; `y` of text is its baseline.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        weight: FontWeight,
        color: RgbColor,
        text: String,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: RgbColor,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        /// Stroke width in points.
        thickness: f64,
        color: RgbColor,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    #[cfg(test)]
    pub(crate) fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Lays out an invoice onto as many pages as it needs.
pub(crate) struct InvoiceLayout {
    page: PageGeometry,
    currency: Currency,
    pages: Vec<PageLayout>,
    cursor: f64,
}

impl InvoiceLayout {
    pub(crate) fn new(page_size: PageSize, currency: Currency) -> Self {
        let page = PageGeometry::for_size(page_size);
        Self {
            page,
            currency,
            pages: vec![PageLayout::default()],
            cursor: page.content_top(),
        }
    }

    pub(crate) fn page(&self) -> PageGeometry {
        self.page
    }

    pub(crate) fn layout(mut self, document: &InvoiceDocument) -> Vec<PageLayout> {
        self.title();
        self.info_table(document);
        self.parties(document);
        self.items_table(document);
        self.notes(document);
        self.page_numbers();
        self.pages
    }

    // Cursor handling.
    // ---

    fn at_page_top(&self) -> bool {
        self.cursor >= self.page.content_top()
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor = self.page.content_top();
    }

    /// Start a new page unless `height` fits below the cursor. Returns whether
    /// a page break happened. Never breaks at the top of a page, so blocks
    /// that can be taller than a page must split themselves with
    /// [`Self::lines_that_fit`].
    fn ensure(&mut self, height: f64) -> bool {
        if self.cursor - height < self.page.content_bottom() && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Number of lines of `leading` that fit below the cursor after reserving
    /// `reserved` for padding.
    fn lines_that_fit(&self, leading: f64, reserved: f64) -> usize {
        let available = self.cursor - reserved - self.page.content_bottom();
        if available < leading {
            0
        } else {
            (available / leading + 1e-9).floor() as usize
        }
    }

    fn space(&mut self, points: f64) {
        if !self.at_page_top() {
            self.cursor -= pt(points);
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        weight: FontWeight,
        color: RgbColor,
        text: impl Into<String>,
    ) {
        self.push(DrawOp::Text {
            x,
            y,
            size,
            weight,
            color,
            text: text.into(),
        });
    }

    /// Text inside a cell spanning `left..right`, padded on the aligned side.
    #[allow(clippy::too_many_arguments)]
    fn cell_text(
        &mut self,
        left: f64,
        right: f64,
        baseline: f64,
        size: f64,
        weight: FontWeight,
        color: RgbColor,
        align: Align,
        text: &str,
    ) {
        let x = match align {
            Align::Left => left + pt(padding::CELL_X),
            Align::Right => right - pt(padding::CELL_X) - text_width(text, size, weight),
        };
        self.text(x, baseline, size, weight, color, text);
    }

    fn fill(&mut self, x: f64, top: f64, width: f64, height: f64, color: RgbColor) {
        self.push(DrawOp::FillRect {
            x,
            y: top - height,
            width,
            height,
            color,
        });
    }

    fn hline(&mut self, x1: f64, x2: f64, y: f64, thickness: f64, color: RgbColor) {
        self.push(DrawOp::Line {
            from: (x1, y),
            to: (x2, y),
            thickness,
            color,
        });
    }

    fn vline(&mut self, x: f64, top: f64, bottom: f64, thickness: f64, color: RgbColor) {
        self.push(DrawOp::Line {
            from: (x, top),
            to: (x, bottom),
            thickness,
            color,
        });
    }

    fn line_height(size: f64) -> f64 {
        pt(size * LEADING)
    }

    fn heading(&mut self, text: &str) {
        let size = font_size::HEADING;
        let baseline = self.cursor - pt(size);
        let x = self.page.margin;
        self.text(x, baseline, size, FontWeight::Bold, PRIMARY, text);
        self.cursor -= Self::line_height(size);
    }

    // Blocks.
    // ---

    fn title(&mut self) {
        let size = font_size::TITLE;
        self.ensure(Self::line_height(size));
        let title = "INVOICE";
        let x = (self.page.width - text_width(title, size, FontWeight::Bold)) / 2.0;
        let baseline = self.cursor - pt(size);
        self.text(x, baseline, size, FontWeight::Bold, PRIMARY, title);
        self.cursor -= Self::line_height(size);
        self.space(spacing::TITLE_AFTER);
        self.space(spacing::TITLE_BOTTOM);
    }

    fn info_table(&mut self, document: &InvoiceDocument) {
        let view = &document.view;
        let rows = [
            ("Invoice ID:", view.id.to_string()),
            ("Date:", format_invoice_date(&view.date_created)),
            ("Status:", paid_label(view.paid).to_string()),
        ];
        let columns = scaled_columns(&INFO_COLUMNS, self.page.content_width());
        let size = font_size::BODY;
        let row_height =
            pt(padding::INFO_TOP) + Self::line_height(size) + pt(padding::INFO_BOTTOM);
        self.ensure(row_height * rows.len() as f64);

        let label_x = self.page.margin + pt(padding::INFO_X);
        let value_x = self.page.margin + columns[0] + pt(padding::INFO_X);
        for (label, value) in rows {
            let baseline = self.cursor - pt(padding::INFO_TOP) - pt(size);
            self.text(label_x, baseline, size, FontWeight::Bold, BLACK, label);
            self.text(value_x, baseline, size, FontWeight::Regular, BLACK, value);
            self.cursor -= row_height;
        }
        self.space(spacing::SECTION_BOTTOM);
    }

    fn party_lines(
        heading: &str,
        name: Option<&str>,
        address: Option<&str>,
        contacts: &[Option<&str>],
        width: f64,
    ) -> Vec<(String, FontWeight)> {
        let size = font_size::BODY;
        let mut lines = vec![(heading.to_string(), FontWeight::Bold)];
        for line in wrap_to_width(name.unwrap_or("N/A"), width, size, FontWeight::Bold) {
            lines.push((line, FontWeight::Bold));
        }
        let address = address.unwrap_or("No address provided");
        for line in wrap_to_width(address, width, size, FontWeight::Regular) {
            lines.push((line, FontWeight::Regular));
        }
        for contact in contacts.iter().flatten() {
            for line in wrap_to_width(contact, width, size, FontWeight::Regular) {
                lines.push((line, FontWeight::Regular));
            }
        }
        lines
    }

    fn parties(&mut self, document: &InvoiceDocument) {
        let view = &document.view;
        let columns = scaled_columns(&CONTACT_COLUMNS, self.page.content_width());
        // Small gutter so the columns never touch.
        let text_width = columns[0] - pt(padding::INFO_X);
        let from = Self::party_lines(
            "From:",
            view.sender_name.as_deref(),
            view.sender_address.as_deref(),
            &[view.sender_email.as_deref(), view.sender_phone.as_deref()],
            text_width,
        );
        let to = Self::party_lines(
            "To:",
            view.client_name.as_deref(),
            view.client_address.as_deref(),
            &[view.client_email.as_deref()],
            text_width,
        );

        let size = font_size::BODY;
        let leading = Self::line_height(size);
        let rows = from.len().max(to.len());
        self.ensure(rows as f64 * leading);

        // Both columns continue on the next page when they outgrow this one.
        let columns_x = [self.page.margin, self.page.margin + columns[0]];
        let mut start = 0;
        while start < rows {
            let fit = self.lines_that_fit(leading, 0.0);
            if fit == 0 {
                self.new_page();
                continue;
            }
            let end = (start + fit).min(rows);
            let top = self.cursor;
            for (x, lines) in columns_x.into_iter().zip([&from, &to]) {
                for (i, (line, weight)) in lines.iter().enumerate().take(end).skip(start) {
                    let baseline = top - (i - start) as f64 * leading - pt(size);
                    self.text(x, baseline, size, *weight, BLACK, line.as_str());
                }
            }
            self.cursor = top - (end - start) as f64 * leading;
            start = end;
            if start < rows {
                self.new_page();
            }
        }
        self.space(spacing::PARTIES_BOTTOM);
    }

    fn table_geometry(&self) -> (f64, Vec<f64>) {
        let columns = scaled_columns(&ITEM_COLUMNS, self.page.content_width());
        let table_width: f64 = columns.iter().sum();
        let left = self.page.margin + (self.page.content_width() - table_width) / 2.0;
        (left, columns)
    }

    fn column_edges(left: f64, columns: &[f64]) -> Vec<f64> {
        let mut edges = vec![left];
        for width in columns {
            edges.push(edges[edges.len() - 1] + width);
        }
        edges
    }

    fn header_row_height() -> f64 {
        pt(padding::HEADER_TOP)
            + Self::line_height(font_size::TABLE_HEADER)
            + pt(padding::HEADER_BOTTOM)
    }

    fn grid(&mut self, edges: &[f64], top: f64, bottom: f64) {
        let (left, right) = (edges[0], edges[edges.len() - 1]);
        self.hline(left, right, top, 1.0, BORDER);
        self.hline(left, right, bottom, 1.0, BORDER);
        for &x in edges {
            self.vline(x, top, bottom, 1.0, BORDER);
        }
    }

    fn header_row(&mut self, edges: &[f64]) {
        let height = Self::header_row_height();
        let size = font_size::TABLE_HEADER;
        let top = self.cursor;
        let width = edges[edges.len() - 1] - edges[0];
        self.fill(edges[0], top, width, height, PRIMARY);
        let baseline = top - pt(padding::HEADER_TOP) - pt(size);
        for (i, title) in ["Description", "Quantity", "Unit Price", "Total"]
            .into_iter()
            .enumerate()
        {
            self.cell_text(
                edges[i],
                edges[i + 1],
                baseline,
                size,
                FontWeight::Bold,
                WHITE,
                Align::Left,
                title,
            );
        }
        self.grid(edges, top, top - height);
        self.cursor -= height;
    }

    /// Break the page if `height` does not fit, repeating the header row on
    /// the new page.
    fn ensure_table_space(&mut self, height: f64, edges: &[f64]) {
        if self.ensure(height) {
            self.header_row(edges);
        }
    }

    fn item_row(&mut self, index: usize, line: &InvoiceLine, edges: &[f64], columns: &[f64]) {
        let size = font_size::BODY;
        let leading = Self::line_height(size);
        let padding = 2.0 * pt(padding::CELL_Y);
        let description = wrap_to_width(
            &line.name,
            columns[0] - 2.0 * pt(padding::CELL_X),
            size,
            FontWeight::Regular,
        );
        let numbers = [
            format_quantity(line.quantity),
            format_money(line.unit_cost, self.currency),
            format_money(line.line_total(), self.currency),
        ];
        let background = if index % 2 == 0 { WHITE } else { ROW_BACKGROUND };

        // Move the whole row to the next page when it would fit there,
        // otherwise split its description across pages.
        let height = padding + description.len().max(1) as f64 * leading;
        let fresh_page = self.page.content_top()
            - self.page.content_bottom()
            - Self::header_row_height();
        if height <= fresh_page {
            self.ensure_table_space(height, edges);
        }

        let mut start = 0;
        loop {
            let fit = self.lines_that_fit(leading, padding);
            if fit == 0 {
                self.new_page();
                self.header_row(edges);
                continue;
            }
            let end = (start + fit).min(description.len());
            let chunk = &description[start..end];
            let row_numbers = (start == 0).then_some(&numbers);
            self.item_row_part(chunk, row_numbers, background, edges);
            start = end;
            if start >= description.len() {
                break;
            }
            self.new_page();
            self.header_row(edges);
        }
    }

    /// Draw one page's worth of an item row: some description lines and, on
    /// the row's first part, its numbers.
    fn item_row_part(
        &mut self,
        description: &[String],
        numbers: Option<&[String; 3]>,
        background: RgbColor,
        edges: &[f64],
    ) {
        let size = font_size::BODY;
        let leading = Self::line_height(size);
        // An empty description still occupies one line.
        let height =
            2.0 * pt(padding::CELL_Y) + description.len().max(1) as f64 * leading;
        let top = self.cursor;
        self.fill(edges[0], top, edges[4] - edges[0], height, background);

        let baseline = top - pt(padding::CELL_Y) - pt(size);
        for (i, text) in description.iter().enumerate() {
            self.cell_text(
                edges[0],
                edges[1],
                baseline - i as f64 * leading,
                size,
                FontWeight::Regular,
                BLACK,
                Align::Left,
                text,
            );
        }
        for (i, text) in numbers.into_iter().flatten().enumerate() {
            self.cell_text(
                edges[i + 1],
                edges[i + 2],
                baseline,
                size,
                FontWeight::Regular,
                BLACK,
                Align::Right,
                text,
            );
        }
        self.grid(edges, top, top - height);
        self.cursor -= height;
    }

    fn totals_row(&mut self, edges: &[f64], label: &str, amount: f64) {
        let size = font_size::TOTALS;
        let height = 2.0 * pt(padding::CELL_Y) + Self::line_height(size);
        let top = self.cursor;
        let baseline = top - pt(padding::CELL_Y) - pt(size);
        let amount = format_money(amount, self.currency);
        for (i, text) in [label, amount.as_str()].into_iter().enumerate() {
            self.cell_text(
                edges[i + 2],
                edges[i + 3],
                baseline,
                size,
                FontWeight::Bold,
                BLACK,
                Align::Right,
                text,
            );
        }
        self.cursor -= height;
    }

    fn items_table(&mut self, document: &InvoiceDocument) {
        let (left, columns) = self.table_geometry();
        let edges = Self::column_edges(left, &columns);
        let totals_height =
            2.0 * (2.0 * pt(padding::CELL_Y) + Self::line_height(font_size::TOTALS));

        // Keep the heading with the header row and at least one more row.
        let heading_height = Self::line_height(font_size::HEADING) + pt(spacing::ITEMS_HEADER);
        let first_row = 2.0 * pt(padding::CELL_Y) + Self::line_height(font_size::BODY);
        self.ensure(heading_height + Self::header_row_height() + first_row);
        self.heading("Invoice Items");
        self.cursor -= pt(spacing::ITEMS_HEADER);
        self.header_row(&edges);

        for (index, line) in document.lines.iter().enumerate() {
            self.item_row(index, line, &edges, &columns);
        }

        // Subtotal and grand total stay together.
        self.ensure_table_space(totals_height, &edges);
        let right = edges[4];
        self.totals_row(&edges, "Subtotal:", document.totals.subtotal);
        self.hline(left, right, self.cursor, 1.0, SECONDARY);

        let total_height = totals_height / 2.0;
        let top = self.cursor;
        self.fill(left, top, right - left, total_height, TOTAL_BACKGROUND);
        self.totals_row(&edges, "Grand Total:", document.totals.total);
        self.hline(left, right, self.cursor, 2.0, PRIMARY);
    }

    fn notes(&mut self, document: &InvoiceDocument) {
        let Some(message) = document
            .view
            .footer_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
        else {
            return;
        };
        let size = font_size::BODY;
        let leading = Self::line_height(size);
        let lines = wrap_to_width(
            message,
            self.page.content_width(),
            size,
            FontWeight::Regular,
        );

        self.space(spacing::FOOTER_TOP);
        self.ensure(Self::line_height(font_size::HEADING) + pt(spacing::NOTES) + leading);
        self.heading("Notes:");
        self.cursor -= pt(spacing::NOTES);
        for line in lines {
            self.ensure(leading);
            let baseline = self.cursor - pt(size);
            let x = self.page.margin;
            self.text(x, baseline, size, FontWeight::Regular, BLACK, line);
            self.cursor -= leading;
        }
    }

    fn page_numbers(&mut self) {
        let count = self.pages.len();
        let size = font_size::PAGE_FOOTER;
        let baseline = self.page.margin / 2.0;
        let width = self.page.width;
        for (i, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", i + 1, count);
            let x = (width - text_width(&text, size, FontWeight::Regular)) / 2.0;
            page.ops.push(DrawOp::Text {
                x,
                y: baseline,
                size,
                weight: FontWeight::Regular,
                color: SECONDARY,
                text,
            });
        }
    }
}
