//! printpdf writer for laid-out pages.

use std::collections::HashMap;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb as PdfRgb,
};

use crate::export::ExportError;
use crate::layout::{FontFace, FontFamily, Page, PageGeometry};
use crate::templates::Rgb;

const LAYER: &str = "Content";
const RULE_THICKNESS_PT: f32 = 0.6;

fn builtin(face: FontFace) -> BuiltinFont {
    match (face.family, face.bold) {
        (FontFamily::Helvetica, false) => BuiltinFont::Helvetica,
        (FontFamily::Helvetica, true) => BuiltinFont::HelveticaBold,
        (FontFamily::Times, false) => BuiltinFont::TimesRoman,
        (FontFamily::Times, true) => BuiltinFont::TimesBold,
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
        None,
    ))
}

/// Built-in fonts only cover a Latin-1 style encoding; swap typographic
/// punctuation for ASCII and drop control characters.
pub fn pdf_safe_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2022}' => '-',
            '\u{00b7}' => '|',
            '\u{00a0}' => ' ',
            c => c,
        })
        .collect()
}

struct Fonts<'a> {
    doc: &'a PdfDocumentReference,
    loaded: HashMap<FontFace, IndirectFontRef>,
}

impl<'a> Fonts<'a> {
    fn get(&mut self, face: FontFace) -> Result<IndirectFontRef, ExportError> {
        if let Some(font) = self.loaded.get(&face) {
            return Ok(font.clone());
        }
        let font = self
            .doc
            .add_builtin_font(builtin(face))
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        self.loaded.insert(face, font.clone());
        Ok(font)
    }
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    geometry: PageGeometry,
    fonts: &mut Fonts<'_>,
) -> Result<(), ExportError> {
    let flip = |y_mm: f32| Mm(geometry.height_mm - y_mm);

    for rule in &page.rules {
        layer.set_outline_color(color(rule.color));
        layer.set_outline_thickness(RULE_THICKNESS_PT);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(rule.x1_mm), flip(rule.y_mm)), false),
                (Point::new(Mm(rule.x2_mm), flip(rule.y_mm)), false),
            ],
            is_closed: false,
        });
    }

    for text in &page.texts {
        let font = fonts.get(text.face)?;
        layer.set_fill_color(color(text.color));
        layer.use_text(
            pdf_safe_text(&text.text),
            text.size_pt,
            Mm(text.x_mm),
            flip(text.baseline_mm),
            &font,
        );
    }
    Ok(())
}

/// Writes `pages` to a PDF document and returns its bytes.
pub fn write_pdf(pages: &[Page], geometry: PageGeometry, title: &str) -> Result<Vec<u8>, ExportError> {
    let width = Mm(geometry.width_mm);
    let height = Mm(geometry.height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(pdf_safe_text(title), width, height, LAYER);

    let mut fonts = Fonts {
        doc: &doc,
        loaded: HashMap::new(),
    };
    let empty = Page::default();
    let mut pages_iter = pages.iter();

    let first = pages_iter.next().unwrap_or(&empty);
    let layer = doc.get_page(first_page).get_layer(first_layer);
    draw_page(&layer, first, geometry, &mut fonts)?;

    for page in pages_iter {
        let (page_index, layer_index) = doc.add_page(width, height, LAYER);
        let layer = doc.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, page, geometry, &mut fonts)?;
    }

    tracing::debug!(pages = pages.len().max(1), fonts = fonts.loaded.len(), "PDF assembled");
    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flow::PlacedText;

    #[test]
    fn test_pdf_safe_text() {
        assert_eq!(
            pdf_safe_text("It\u{2019}s \u{201c}done\u{201d} \u{2013} \u{2022} a\u{00b7}b\u{7}"),
            "It's \"done\" - - a|b"
        );
        assert_eq!(pdf_safe_text("café"), "café");
    }

    #[test]
    fn test_write_multiple_pages() {
        let text = |s: &str| PlacedText {
            text: s.to_string(),
            x_mm: 20.0,
            baseline_mm: 30.0,
            face: FontFace::new(FontFamily::Times, true),
            size_pt: 11.0,
            color: Rgb::new(0, 0, 0),
        };
        let pages = vec![
            Page {
                texts: vec![text("one")],
                rules: vec![],
            },
            Page {
                texts: vec![text("two")],
                rules: vec![],
            },
        ];
        let bytes = write_pdf(&pages, PageGeometry::A4, "Test").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_no_pages_still_valid() {
        let bytes = write_pdf(&[], PageGeometry::A4, "Empty").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
