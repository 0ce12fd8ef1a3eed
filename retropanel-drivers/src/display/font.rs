//! Bit-packed 4x6 panel font
//!
//! Table format follows the classic sign-font layout: a 3-byte header
//! (width, height, first character) followed by 6 row bytes per glyph,
//! ASCII 32-126. Glyph pixels sit in the upper nibble of each row byte,
//! bit 7 leftmost; the low nibble is unused. Most glyphs are 3 pixels
//! wide with the fourth column left blank for spacing.

/// Glyph cell width in pixels
pub const FONT_WIDTH: usize = 4;

/// Glyph cell height in pixels
pub const FONT_HEIGHT: usize = 6;

/// First character in the table (ASCII space)
pub const FONT_FIRST_CHAR: u8 = 32;

const HEADER_LEN: usize = 3;

#[rustfmt::skip]
static FONT_4X6: [u8; HEADER_LEN + 95 * FONT_HEIGHT] = [
    4, 6, 32, // width, height, first char
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // ' '
    0x40, 0x40, 0x40, 0x00, 0x40, 0x00, // '!'
    0xA0, 0xA0, 0x00, 0x00, 0x00, 0x00, // '"'
    0xA0, 0xE0, 0xA0, 0xE0, 0xA0, 0x00, // '#'
    0x60, 0xC0, 0x40, 0x60, 0xC0, 0x00, // '$'
    0xA0, 0x20, 0x40, 0x80, 0xA0, 0x00, // '%'
    0x40, 0xA0, 0x40, 0xA0, 0x60, 0x00, // '&'
    0x40, 0x40, 0x00, 0x00, 0x00, 0x00, // '''
    0x20, 0x40, 0x40, 0x40, 0x20, 0x00, // '('
    0x80, 0x40, 0x40, 0x40, 0x80, 0x00, // ')'
    0xA0, 0x40, 0xA0, 0x00, 0x00, 0x00, // '*'
    0x00, 0x40, 0xE0, 0x40, 0x00, 0x00, // '+'
    0x00, 0x00, 0x00, 0x40, 0x40, 0x80, // ','
    0x00, 0x00, 0xE0, 0x00, 0x00, 0x00, // '-'
    0x00, 0x00, 0x00, 0x00, 0x40, 0x00, // '.'
    0x20, 0x20, 0x40, 0x80, 0x80, 0x00, // '/'
    0xE0, 0xA0, 0xA0, 0xA0, 0xE0, 0x00, // '0'
    0x40, 0xC0, 0x40, 0x40, 0xE0, 0x00, // '1'
    0xE0, 0x20, 0xE0, 0x80, 0xE0, 0x00, // '2'
    0xE0, 0x20, 0x60, 0x20, 0xE0, 0x00, // '3'
    0xA0, 0xA0, 0xE0, 0x20, 0x20, 0x00, // '4'
    0xE0, 0x80, 0xE0, 0x20, 0xE0, 0x00, // '5'
    0xE0, 0x80, 0xE0, 0xA0, 0xE0, 0x00, // '6'
    0xE0, 0x20, 0x20, 0x40, 0x40, 0x00, // '7'
    0xE0, 0xA0, 0xE0, 0xA0, 0xE0, 0x00, // '8'
    0xE0, 0xA0, 0xE0, 0x20, 0xE0, 0x00, // '9'
    0x00, 0x40, 0x00, 0x40, 0x00, 0x00, // ':'
    0x00, 0x40, 0x00, 0x40, 0x80, 0x00, // ';'
    0x20, 0x40, 0x80, 0x40, 0x20, 0x00, // '<'
    0x00, 0xE0, 0x00, 0xE0, 0x00, 0x00, // '='
    0x80, 0x40, 0x20, 0x40, 0x80, 0x00, // '>'
    0xE0, 0x20, 0x40, 0x00, 0x40, 0x00, // '?'
    0x40, 0xA0, 0xE0, 0x80, 0x60, 0x00, // '@'
    0x40, 0xA0, 0xE0, 0xA0, 0xA0, 0x00, // 'A'
    0xC0, 0xA0, 0xC0, 0xA0, 0xC0, 0x00, // 'B'
    0x60, 0x80, 0x80, 0x80, 0x60, 0x00, // 'C'
    0xC0, 0xA0, 0xA0, 0xA0, 0xC0, 0x00, // 'D'
    0xE0, 0x80, 0xC0, 0x80, 0xE0, 0x00, // 'E'
    0xE0, 0x80, 0xC0, 0x80, 0x80, 0x00, // 'F'
    0x60, 0x80, 0xA0, 0xA0, 0x60, 0x00, // 'G'
    0xA0, 0xA0, 0xE0, 0xA0, 0xA0, 0x00, // 'H'
    0xE0, 0x40, 0x40, 0x40, 0xE0, 0x00, // 'I'
    0x20, 0x20, 0x20, 0xA0, 0x40, 0x00, // 'J'
    0xA0, 0xC0, 0x80, 0xC0, 0xA0, 0x00, // 'K'
    0x80, 0x80, 0x80, 0x80, 0xE0, 0x00, // 'L'
    0xA0, 0xE0, 0xE0, 0xA0, 0xA0, 0x00, // 'M'
    0xC0, 0xA0, 0xA0, 0xA0, 0xA0, 0x00, // 'N'
    0x40, 0xA0, 0xA0, 0xA0, 0x40, 0x00, // 'O'
    0xC0, 0xA0, 0xC0, 0x80, 0x80, 0x00, // 'P'
    0x40, 0xA0, 0xA0, 0xC0, 0x60, 0x00, // 'Q'
    0xC0, 0xA0, 0xC0, 0xA0, 0xA0, 0x00, // 'R'
    0x60, 0x80, 0x40, 0x20, 0xC0, 0x00, // 'S'
    0xE0, 0x40, 0x40, 0x40, 0x40, 0x00, // 'T'
    0xA0, 0xA0, 0xA0, 0xA0, 0xE0, 0x00, // 'U'
    0xA0, 0xA0, 0xA0, 0xA0, 0x40, 0x00, // 'V'
    0xA0, 0xA0, 0xE0, 0xE0, 0xA0, 0x00, // 'W'
    0xA0, 0xA0, 0x40, 0xA0, 0xA0, 0x00, // 'X'
    0xA0, 0xA0, 0x40, 0x40, 0x40, 0x00, // 'Y'
    0xE0, 0x20, 0x40, 0x80, 0xE0, 0x00, // 'Z'
    0x60, 0x40, 0x40, 0x40, 0x60, 0x00, // '['
    0x80, 0x80, 0x40, 0x20, 0x20, 0x00, // '\\'
    0xC0, 0x40, 0x40, 0x40, 0xC0, 0x00, // ']'
    0x40, 0xA0, 0x00, 0x00, 0x00, 0x00, // '^'
    0x00, 0x00, 0x00, 0x00, 0xE0, 0x00, // '_'
    0x80, 0x40, 0x00, 0x00, 0x00, 0x00, // '`'
    0x00, 0x60, 0xA0, 0xA0, 0x60, 0x00, // 'a'
    0x80, 0xC0, 0xA0, 0xA0, 0xC0, 0x00, // 'b'
    0x00, 0x60, 0x80, 0x80, 0x60, 0x00, // 'c'
    0x20, 0x60, 0xA0, 0xA0, 0x60, 0x00, // 'd'
    0x00, 0x60, 0xE0, 0x80, 0x60, 0x00, // 'e'
    0x20, 0x40, 0xE0, 0x40, 0x40, 0x00, // 'f'
    0x00, 0x60, 0xA0, 0x60, 0x20, 0xC0, // 'g'
    0x80, 0xC0, 0xA0, 0xA0, 0xA0, 0x00, // 'h'
    0x40, 0x00, 0x40, 0x40, 0x40, 0x00, // 'i'
    0x20, 0x00, 0x20, 0x20, 0x20, 0xC0, // 'j'
    0x80, 0xA0, 0xC0, 0xC0, 0xA0, 0x00, // 'k'
    0x80, 0x80, 0x80, 0x80, 0x60, 0x00, // 'l'
    0x00, 0xC0, 0xE0, 0xA0, 0xA0, 0x00, // 'm'
    0x00, 0xC0, 0xA0, 0xA0, 0xA0, 0x00, // 'n'
    0x00, 0x40, 0xA0, 0xA0, 0x40, 0x00, // 'o'
    0x00, 0xC0, 0xA0, 0xC0, 0x80, 0x80, // 'p'
    0x00, 0x60, 0xA0, 0x60, 0x20, 0x20, // 'q'
    0x00, 0x60, 0x80, 0x80, 0x80, 0x00, // 'r'
    0x00, 0x60, 0xC0, 0x60, 0xC0, 0x00, // 's'
    0x40, 0xE0, 0x40, 0x40, 0x20, 0x00, // 't'
    0x00, 0xA0, 0xA0, 0xA0, 0x60, 0x00, // 'u'
    0x00, 0xA0, 0xA0, 0xA0, 0x40, 0x00, // 'v'
    0x00, 0xA0, 0xA0, 0xE0, 0xA0, 0x00, // 'w'
    0x00, 0xA0, 0x40, 0x40, 0xA0, 0x00, // 'x'
    0x00, 0xA0, 0xA0, 0x60, 0x20, 0xC0, // 'y'
    0x00, 0xE0, 0x20, 0x40, 0xE0, 0x00, // 'z'
    0x20, 0x40, 0xC0, 0x40, 0x20, 0x00, // '{'
    0x40, 0x40, 0x40, 0x40, 0x40, 0x00, // '|'
    0x80, 0x40, 0x60, 0x40, 0x80, 0x00, // '}'
    0x00, 0x60, 0xC0, 0x00, 0x00, 0x00, // '~'
];

/// Row bitmap for a character
///
/// Returns 0 (blank) for rows out of range and for characters outside
/// ASCII 32-126.
pub fn glyph_row(ascii: u8, row: usize) -> u8 {
    if row >= FONT_HEIGHT || !(32..=126).contains(&ascii) {
        return 0;
    }
    let index = (ascii - FONT_FIRST_CHAR) as usize;
    FONT_4X6[HEADER_LEN + index * FONT_HEIGHT + row]
}
