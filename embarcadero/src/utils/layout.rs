//! Text layout helpers for the ticket canvas
//!
//! Centering and word-wrapping over `ab_glyph` metrics, plus the system
//! font set the renderer draws with. The fonts mirror what the template was
//! designed around: Arial regular/bold on Windows, DejaVu Sans elsewhere.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::fs;

/// Font sizes of the ticket template, in pixels.
pub const TITLE_SCALE: f32 = 16.0;
pub const NORMAL_SCALE: f32 = 12.0;
pub const SMALL_SCALE: f32 = 10.0;
pub const LARGE_SCALE: f32 = 18.0;

#[cfg(windows)]
const REGULAR_CANDIDATES: &[&str] = &[r"C:\Windows\Fonts\arial.ttf"];
#[cfg(windows)]
const BOLD_CANDIDATES: &[&str] = &[r"C:\Windows\Fonts\arialbd.ttf"];

#[cfg(not(windows))]
const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
];
#[cfg(not(windows))]
const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
];

/// Regular and bold faces the renderer draws with.
pub struct FontSet {
    pub regular: FontVec,
    pub bold: FontVec,
}

impl FontSet {
    /// Load the template faces from well-known system font paths.
    ///
    /// Bold falls back to the regular face when no bold file is installed.
    pub fn load_system() -> Result<Self, String> {
        let regular = load_first(REGULAR_CANDIDATES)?;
        let bold = load_first(BOLD_CANDIDATES).or_else(|_| load_first(REGULAR_CANDIDATES))?;
        Ok(Self { regular, bold })
    }
}

fn load_first(candidates: &[&str]) -> Result<FontVec, String> {
    for path in candidates {
        if let Ok(bytes) = fs::read(path)
            && let Ok(font) = FontVec::try_from_vec(bytes)
        {
            return Ok(font);
        }
    }
    Err(format!(
        "no usable font found (tried {})",
        candidates.join(", ")
    ))
}

/// Measure the pixel width of `text` at the given scale.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Horizontal start position that centers `text` in a canvas of
/// `canvas_width` pixels. Clamped at 0 for text wider than the canvas.
pub fn centered_x(font: &impl Font, scale: PxScale, canvas_width: u32, text: &str) -> i32 {
    let text_width = measure_text_width(font, scale, text) as i32;
    ((canvas_width as i32) - text_width).max(0) / 2
}

/// Draw `text` horizontally centered at `y`. No wrapping; callers pre-wrap
/// long strings with [`wrap_text`].
pub fn draw_centered_text(
    img: &mut RgbImage,
    font: &impl Font,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    let x = centered_x(font, scale, img.width(), text);
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Greedily pack whitespace-delimited words into lines of at most
/// `max_chars` characters. A word longer than `max_chars` gets a line of
/// its own; words are never split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if !current.is_empty() && current_chars + 1 + word_chars > max_chars {
            lines.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keeps layout tests runnable on boxes without the expected fonts.
    fn system_fonts() -> Option<FontSet> {
        FontSet::load_system().ok()
    }

    #[test]
    fn wrap_preserves_words_in_order() {
        let input = "CONSORCIO TURISTICO DEL EMBALSE DE GUATAPE S A S";
        let lines = wrap_text(input, 20);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), input.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn wrap_respects_max_chars_for_normal_words() {
        let lines = wrap_text("uno dos tres cuatro cinco seis siete ocho", 11);
        for line in &lines {
            assert!(line.chars().count() <= 11, "line too long: {:?}", line);
        }
    }

    #[test]
    fn wrap_gives_oversized_word_its_own_line() {
        let lines = wrap_text("ab Supercalifragilistico cd", 10);
        assert_eq!(lines, vec!["ab", "Supercalifragilistico", "cd"]);
    }

    #[test]
    fn wrap_normalizes_whitespace() {
        let lines = wrap_text("  Juan   Perez  ", 30);
        assert_eq!(lines, vec!["Juan Perez"]);
    }

    #[test]
    fn wrap_counts_accented_chars_not_bytes() {
        // "ñ" is two bytes; ten of them still fit a 10-char line.
        let lines = wrap_text("ñññññññññño", 10);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn centered_text_stays_inside_canvas() {
        let Some(fonts) = system_fonts() else { return };
        let scale = PxScale::from(NORMAL_SCALE);
        let width = 300u32;
        for text in ["TOTAL A PAGAR", "x", "Escanee para verificar"] {
            let x = centered_x(&fonts.regular, scale, width, text);
            let text_width = measure_text_width(&fonts.regular, scale, text);
            assert!(x >= 0);
            assert!(x as u32 + text_width <= width, "{:?} overflows", text);
        }
    }

    #[test]
    fn centered_x_clamps_for_oversized_text() {
        let Some(fonts) = system_fonts() else { return };
        let scale = PxScale::from(LARGE_SCALE);
        let long = "X".repeat(200);
        assert_eq!(centered_x(&fonts.bold, scale, 300, &long), 0);
    }
}
