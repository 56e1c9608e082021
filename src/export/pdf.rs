use crate::export::layout::{LaidOutDocument, Page};
use crate::export::metrics::{FontFace, PT_PER_MM, encode_win_ansi};
use crate::foundation::error::{FolioError, FolioResult};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

/// Rule stroke width in millimetres.
const RULE_WIDTH_MM: f64 = 0.2;

/// Serialize a laid-out document.
///
/// Fonts are the base-14 Helvetica faces with WinAnsi encoding, so nothing is embedded.
/// No dates or random ids are written and equal input gives byte-identical output.
pub fn write_pdf(doc: &LaidOutDocument, title: &str) -> FolioResult<Vec<u8>> {
    if doc.pages.is_empty() {
        return Err(FolioError::layout("document has no pages"));
    }
    let g = &doc.geometry;
    let width_pt = g.page_width * PT_PER_MM;
    let height_pt = g.page_height * PT_PER_MM;
    if !(width_pt.is_finite() && height_pt.is_finite() && width_pt > 0.0 && height_pt > 0.0) {
        return Err(FolioError::layout("page size must be finite and positive"));
    }

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(FontFace, Ref)> = FontFace::ALL.iter().map(|f| (*f, alloc.bump())).collect();
    let page_ids: Vec<(Ref, Ref)> = doc.pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr("folio"));

    for (face, id) in &font_ids {
        pdf.type1_font(*id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        let mut writer = pdf.page(*page_id);
        writer
            .media_box(Rect::new(0.0, 0.0, width_pt as f32, height_pt as f32))
            .parent(tree_id)
            .contents(*content_id);
        {
            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            for (face, id) in &font_ids {
                fonts.pair(Name(face.resource_name().as_bytes()), *id);
            }
        }
        writer.finish();

        let content = page_content(page, height_pt)?;
        pdf.stream(*content_id, &content);
    }

    Ok(pdf.finish())
}

fn page_content(page: &Page, height_pt: f64) -> FolioResult<Vec<u8>> {
    let to_pt = |x: f64, y: f64| -> FolioResult<(f32, f32)> {
        let (px, py) = (x * PT_PER_MM, height_pt - y * PT_PER_MM);
        if !(px.is_finite() && py.is_finite()) {
            return Err(FolioError::layout("non-finite position on page"));
        }
        Ok((px as f32, py as f32))
    };

    let mut content = Content::new();
    for rule in &page.rules {
        let (x0, y) = to_pt(rule.x0, rule.y)?;
        let (x1, _) = to_pt(rule.x1, rule.y)?;
        content
            .set_stroke_gray(f32::from(rule.gray) / 255.0)
            .set_line_width((RULE_WIDTH_MM * PT_PER_MM) as f32)
            .move_to(x0, y)
            .line_to(x1, y)
            .stroke();
    }
    for run in &page.runs {
        let (x, y) = to_pt(run.x, run.y)?;
        let bytes = encode_win_ansi(&run.text);
        content.set_fill_gray(f32::from(run.style.gray) / 255.0);
        content.begin_text();
        content.set_font(
            Name(run.style.face.resource_name().as_bytes()),
            run.style.size_pt as f32,
        );
        content.next_line(x, y);
        content.show(Str(&bytes));
        content.end_text();
    }
    Ok(content.finish().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
