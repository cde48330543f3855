//! Chunky banner lettering for screen headings.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const FONT_HEIGHT: usize = 5;
const SHADOW_OFFSET: usize = 1;
const LETTER_SPACING: usize = 1;
const FILL_CHAR: char = '█';
const SHADOW_CHAR: char = '░';

/// Rows of a glyph; `#` cells are filled. Glyphs may differ in width.
type Glyph = [&'static str; FONT_HEIGHT];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('A', [" ## ", "#  #", "####", "#  #", "#  #"]),
        ('B', ["### ", "#  #", "### ", "#  #", "### "]),
        ('C', [" ###", "#   ", "#   ", "#   ", " ###"]),
        ('D', ["### ", "#  #", "#  #", "#  #", "### "]),
        ('E', ["####", "#   ", "### ", "#   ", "####"]),
        ('F', ["####", "#   ", "### ", "#   ", "#   "]),
        ('G', [" ###", "#   ", "# ##", "#  #", " ###"]),
        ('H', ["#  #", "#  #", "####", "#  #", "#  #"]),
        ('I', ["###", " # ", " # ", " # ", "###"]),
        ('J', ["  ##", "   #", "   #", "#  #", " ## "]),
        ('K', ["#  #", "# # ", "##  ", "# # ", "#  #"]),
        ('L', ["#   ", "#   ", "#   ", "#   ", "####"]),
        ('M', ["#   #", "## ##", "# # #", "#   #", "#   #"]),
        ('N', ["#   #", "##  #", "# # #", "#  ##", "#   #"]),
        ('O', [" ## ", "#  #", "#  #", "#  #", " ## "]),
        ('P', ["### ", "#  #", "### ", "#   ", "#   "]),
        ('Q', [" ## ", "#  #", "#  #", "# ##", " ###"]),
        ('R', ["### ", "#  #", "### ", "# # ", "#  #"]),
        ('S', [" ###", "#   ", " ## ", "   #", "### "]),
        ('T', ["#####", "  #  ", "  #  ", "  #  ", "  #  "]),
        ('U', ["#  #", "#  #", "#  #", "#  #", " ## "]),
        ('V', ["#   #", "#   #", "#   #", " # # ", "  #  "]),
        ('W', ["#   #", "#   #", "# # #", "## ##", "#   #"]),
        ('X', ["#   #", " # # ", "  #  ", " # # ", "#   #"]),
        ('Y', ["#   #", " # # ", "  #  ", "  #  ", "  #  "]),
        ('Z', ["####", "   #", " ## ", "#   ", "####"]),
        ('!', ["#", "#", "#", " ", "#"]),
        ('?', ["### ", "   #", " ## ", "    ", " #  "]),
        (' ', ["  ", "  ", "  ", "  ", "  "]),
    ])
});

fn glyph(ch: char) -> Option<&'static Glyph> {
    GLYPHS
        .get(&ch.to_ascii_uppercase())
        .or_else(|| GLYPHS.get(&'?'))
}

fn glyph_width(glyph: &Glyph) -> usize {
    glyph[0].chars().count()
}

/// Render `text` as banner rows with a drop shadow. Unknown characters print as `?`.
pub fn render(text: &str) -> Vec<String> {
    let glyphs: Vec<&Glyph> = text.chars().filter_map(glyph).collect();
    let canvas_height = FONT_HEIGHT + SHADOW_OFFSET;
    if glyphs.is_empty() {
        return vec![String::new(); canvas_height];
    }

    let total_width = glyphs.iter().map(|glyph| glyph_width(glyph)).sum::<usize>()
        + (glyphs.len() - 1) * LETTER_SPACING
        + SHADOW_OFFSET;
    let mut canvas = vec![vec![' '; total_width]; canvas_height];

    let mut x_offset = 0;
    for glyph in glyphs {
        paint_glyph(&mut canvas, glyph, x_offset);
        x_offset += glyph_width(glyph) + LETTER_SPACING;
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

/// Display width of the widest rendered row.
pub fn width(rows: &[String]) -> usize {
    rows.iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0)
}

fn paint_glyph(canvas: &mut [Vec<char>], glyph: &Glyph, x_offset: usize) {
    for (y, row) in glyph.iter().enumerate() {
        for (col, symbol) in row.chars().enumerate() {
            if symbol != '#' {
                continue;
            }
            let x = x_offset + col;
            place(canvas, y + SHADOW_OFFSET, x + SHADOW_OFFSET, SHADOW_CHAR);
            place(canvas, y, x, FILL_CHAR);
        }
    }
}

fn place(canvas: &mut [Vec<char>], y: usize, x: usize, ch: char) {
    let Some(cell) = canvas.get_mut(y).and_then(|row| row.get_mut(x)) else {
        return;
    };
    if *cell == ' ' || (*cell == SHADOW_CHAR && ch == FILL_CHAR) {
        *cell = ch;
    }
}
