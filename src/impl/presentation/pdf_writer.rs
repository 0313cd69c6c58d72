use fractic_server_error::ServerError;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rect, Rgb,
};

use crate::{
    errors::{PdfEncodingFailed, PdfFontUnavailable},
    presentation::{
        invoice_layout::{DrawOp, PageLayout},
        invoice_style::{PageGeometry, RgbColor},
        text_metrics::FontWeight,
    },
};

const LAYER: &str = "Invoice";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn color(c: RgbColor) -> Color {
    let (r, g, b) = c.fractions();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn mm(v: f64) -> Mm {
    Mm(v as f32)
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) {
    match op {
        DrawOp::Text {
            x,
            y,
            size,
            weight,
            color: c,
            text,
        } => {
            layer.set_fill_color(color(*c));
            layer.use_text(text.as_str(), *size as f32, mm(*x), mm(*y), fonts.get(*weight));
        }
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: c,
        } => {
            layer.set_fill_color(color(*c));
            layer.add_rect(
                Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height))
                    .with_mode(PaintMode::Fill),
            );
        }
        DrawOp::Line {
            from,
            to,
            thickness,
            color: c,
        } => {
            layer.set_outline_color(color(*c));
            layer.set_outline_thickness(*thickness as f32);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(from.0), mm(from.1)), false),
                    (Point::new(mm(to.0), mm(to.1)), false),
                ],
                is_closed: false,
            });
        }
    }
}

/// Encode laid-out pages as a PDF using the built-in Helvetica faces.
pub(crate) fn write_pdf(
    title: &str,
    page: PageGeometry,
    pages: &[PageLayout],
) -> Result<Vec<u8>, ServerError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(page.width), mm(page.height), LAYER);
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfFontUnavailable::with_debug("Helvetica", &e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfFontUnavailable::with_debug("Helvetica-Bold", &e))?,
    };

    for (i, layout) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(mm(page.width), mm(page.height), LAYER)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for op in &layout.ops {
            draw(&layer, &fonts, op);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| PdfEncodingFailed::with_debug(title, &e))
}
