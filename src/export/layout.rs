use crate::export::metrics::{FontFace, PT_PER_MM, TextMeasure, wrap_text};
use crate::foundation::error::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};

/// Page geometry and pagination constants, in millimetres unless noted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    /// Cursor position at the top of every page.
    pub top_margin: f64,
    /// Left column (years, headings, paragraphs).
    pub left_x: f64,
    /// Right column of timeline entries.
    pub inner_x: f64,
    /// Wrap width of [`Composer::emit_text`].
    pub max_text_width: f64,
    /// Wrap width of timeline descriptions.
    pub description_width: f64,
    /// Line pitch of timeline descriptions.
    pub description_line_height: f64,
    /// A block starting below this line goes to a new page.
    pub break_threshold: f64,
    /// Break threshold checked before the publications heading.
    pub publications_break_threshold: f64,
    pub rule_x0: f64,
    pub rule_x1: f64,
    /// Baseline of the closing note on the last page.
    pub footer_y: f64,
    /// Visual pitch of wrapped lines, as a multiple of the font size.
    pub line_height_factor: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            top_margin: 20.0,
            left_x: 15.0,
            inner_x: 50.0,
            max_text_width: 180.0,
            description_width: 140.0,
            description_line_height: 4.0,
            break_threshold: 270.0,
            publications_break_threshold: 260.0,
            rule_x0: 15.0,
            rule_x1: 195.0,
            footer_y: 285.0,
            line_height_factor: 1.15,
        }
    }
}

impl PageGeometry {
    pub fn validate(&self) -> FolioResult<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("max_text_width", self.max_text_width),
            ("description_width", self.description_width),
            ("line_height_factor", self.line_height_factor),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(FolioError::validation(format!("{name} must be finite and > 0")));
            }
        }
        // A fresh page must never trip either threshold again.
        if !(self.top_margin >= 0.0
            && self.top_margin < self.break_threshold
            && self.top_margin < self.publications_break_threshold)
        {
            return Err(FolioError::validation(
                "top_margin must be >= 0 and below both break thresholds",
            ));
        }
        if self.break_threshold > self.page_height
            || self.publications_break_threshold > self.page_height
        {
            return Err(FolioError::validation(
                "break thresholds must lie on the page",
            ));
        }
        Ok(())
    }
}

/// Vertical position in millimetres from the top of the current page.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Cursor(pub f64);

impl Cursor {
    pub fn down(self, mm: f64) -> Cursor {
        Cursor(self.0 + mm)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_pt: f64,
    pub face: FontFace,
    /// 0 is black, 255 white.
    pub gray: u8,
}

impl TextStyle {
    pub const fn new(size_pt: f64, face: FontFace) -> Self {
        Self {
            size_pt,
            face,
            gray: 0,
        }
    }

    pub const fn with_gray(mut self, gray: u8) -> Self {
        self.gray = gray;
        self
    }

    /// Cursor advance per line of [`Composer::emit_text`].
    pub fn advance(&self) -> f64 {
        self.size_pt * 0.35 + 1.0
    }
}

/// One line of text with its baseline-left corner at `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub style: TextStyle,
}

/// Horizontal rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
    pub gray: u8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
}

/// Pages of positioned runs and rules. Pure data, independent of the PDF serializer.
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All runs in page order, paired with their 0-based page number.
    pub fn runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.runs.iter().map(move |r| (i, r)))
    }

    pub fn text(&self) -> String {
        self.runs()
            .map(|(_, r)| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First run whose text contains `needle`.
    pub fn find(&self, needle: &str) -> Option<(usize, &TextRun)> {
        self.runs().find(|(_, r)| r.text.contains(needle))
    }
}

/// Builds a [`LaidOutDocument`] page by page. Positions come from a [`Cursor`] the caller
/// threads through every call.
pub struct Composer<'m> {
    geometry: PageGeometry,
    measure: &'m dyn TextMeasure,
    pages: Vec<Page>,
}

impl<'m> Composer<'m> {
    /// Start with one empty page. Returns the composer and the cursor at its top margin.
    pub fn new(geometry: PageGeometry, measure: &'m dyn TextMeasure) -> (Self, Cursor) {
        let top = Cursor(geometry.top_margin);
        let composer = Self {
            geometry,
            measure,
            pages: vec![Page::default()],
        };
        (composer, top)
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_mut(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push_run(&mut self, x: f64, y: f64, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.page_mut().runs.push(TextRun {
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    /// Wrap `text` to `width` and place the lines from `cursor` down at the visual line pitch.
    /// Returns the number of lines, without moving the cursor.
    pub fn place_wrapped(
        &mut self,
        cursor: Cursor,
        text: &str,
        x: f64,
        width: f64,
        style: TextStyle,
    ) -> usize {
        let lines = wrap_text(self.measure, text, style.face, style.size_pt, width);
        let pitch = style.size_pt * self.geometry.line_height_factor / PT_PER_MM;
        for (i, line) in lines.iter().enumerate() {
            self.push_run(x, cursor.0 + pitch * i as f64, line, style);
        }
        lines.len()
    }

    /// Wrap to the maximum width, place the lines, and move the cursor past them.
    pub fn emit_text(&mut self, cursor: Cursor, text: &str, x: f64, style: TextStyle) -> Cursor {
        let width = self.geometry.max_text_width;
        let n = self.place_wrapped(cursor, text, x, width, style);
        cursor.down(n as f64 * style.advance() + 2.0)
    }

    /// Place a single unwrapped line. The cursor does not move.
    pub fn text_at(&mut self, cursor: Cursor, text: &str, x: f64, style: TextStyle) {
        self.push_run(x, cursor.0, text, style);
    }

    /// Place a single line centered on `center_x` at an absolute baseline.
    pub fn centered_at(&mut self, y: f64, text: &str, center_x: f64, style: TextStyle) {
        let w = self.measure.width_mm(text, style.face, style.size_pt);
        self.push_run(center_x - w / 2.0, y, text, style);
    }

    /// Light rule across the text column. Moves the cursor 8mm down.
    pub fn rule(&mut self, cursor: Cursor) -> Cursor {
        let rule = Rule {
            x0: self.geometry.rule_x0,
            x1: self.geometry.rule_x1,
            y: cursor.0,
            gray: 200,
        };
        self.page_mut().rules.push(rule);
        cursor.down(8.0)
    }

    pub fn new_page(&mut self) -> Cursor {
        self.pages.push(Page::default());
        Cursor(self.geometry.top_margin)
    }

    /// Break to a new page when the cursor is past `threshold`.
    pub fn ensure_room(&mut self, cursor: Cursor, threshold: f64) -> Cursor {
        if cursor.0 > threshold {
            tracing::trace!(at = cursor.0, threshold, "page break");
            self.new_page()
        } else {
            cursor
        }
    }

    /// [`Composer::ensure_room`] against the regular break threshold.
    pub fn ensure_block(&mut self, cursor: Cursor) -> Cursor {
        let threshold = self.geometry.break_threshold;
        self.ensure_room(cursor, threshold)
    }

    pub fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/layout.rs"]
mod tests;
