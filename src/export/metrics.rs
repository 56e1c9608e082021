//! Base-14 Helvetica metrics and the WinAnsi encoding used by the PDF writer.
//!
//! Widths are in 1/1000 em, from the Adobe core font AFM files.

/// Base-14 faces the resume uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    /// Helvetica-Oblique. Shares the regular widths.
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// PostScript name of the base-14 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }
}

/// Points per millimetre.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Measures text in millimetres.
pub trait TextMeasure {
    fn width_mm(&self, text: &str, face: FontFace, size_pt: f64) -> f64;
}

/// Exact Helvetica widths over the WinAnsi repertoire.
#[derive(Clone, Copy, Debug, Default)]
pub struct HelveticaMetrics;

impl TextMeasure for HelveticaMetrics {
    fn width_mm(&self, text: &str, face: FontFace, size_pt: f64) -> f64 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| u32::from(glyph_width(face, b)))
            .sum();
        f64::from(units) / 1000.0 * size_pt / PT_PER_MM
    }
}

/// Encode `text` as WinAnsi (cp1252) bytes. Characters outside the code page become `?`;
/// control characters other than tab are dropped and tab becomes a space.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    let byte = match ch {
        '\t' => b' ',
        _ if code < 0x20 || code == 0x7f => return None,
        _ if code < 0x7f => code as u8,
        _ if (0xa0..=0xff).contains(&code) => code as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    };
    Some(byte)
}

/// Width of one WinAnsi byte in 1/1000 em.
pub fn glyph_width(face: FontFace, byte: u8) -> u16 {
    let (ascii, c1, latin) = match face {
        FontFace::Bold => (&BOLD_ASCII, &BOLD_C1, &BOLD_LATIN1),
        FontFace::Regular | FontFace::Italic => (&REGULAR_ASCII, &REGULAR_C1, &REGULAR_LATIN1),
    };
    let w = match byte {
        0x20..=0x7e => ascii[usize::from(byte - 0x20)],
        0x80..=0x9f => c1[usize::from(byte - 0x80)],
        0xa0..=0xff => latin[usize::from(byte - 0xa0)],
        _ => 0,
    };
    if w == 0 { ascii[usize::from(b'?' - 0x20)] } else { w }
}

/// Greedy word wrap to `max_width_mm`.
///
/// Explicit newlines start new paragraphs. A word wider than the limit is split between
/// characters. Always returns at least one line, which may be empty.
pub fn wrap_text(
    measure: &dyn TextMeasure,
    text: &str,
    face: FontFace,
    size_pt: f64,
    max_width_mm: f64,
) -> Vec<String> {
    let fits = |s: &str| measure.width_mm(s, face, size_pt) <= max_width_mm;
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                let mut next = current.clone();
                next.push(ch);
                if !current.is_empty() && !fits(&next) {
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                } else {
                    current = next;
                }
            }
        }
        lines.push(current);
    }
    lines
}

const REGULAR_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// `0x80..=0x9f`. Zero marks bytes cp1252 leaves undefined.
const REGULAR_C1: [u16; 32] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
];

const BOLD_C1: [u16; 32] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
];

const REGULAR_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[cfg(test)]
#[path = "../../tests/unit/export/metrics.rs"]
mod tests;
