//! Cascaded LED-matrix text display

mod font;
mod is31fl3737;
mod retrotext;

pub use font::{glyph_row, FONT_FIRST_CHAR, FONT_HEIGHT, FONT_WIDTH};
pub use is31fl3737::{Is31fl3737, MATRIX_HEIGHT, MATRIX_WIDTH};
pub use retrotext::{RetroText, CELLS_PER_BOARD};
