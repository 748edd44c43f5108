//! ANSI/SGR scanner that builds a [`Grid`] from one complete frame of text.
//!
//! Only SGR (`m`) sequences affect the output. Other control sequences are
//! consumed and dropped, and malformed input never produces an error: the
//! scanner stops at the first unterminated sequence and returns what it has.
use log::trace;

use crate::{
    color::{apply_sgr, parse_params},
    grid::{Cell, Grid, Style},
};

const ESC: char = '\x1b';
const TAB_WIDTH: usize = 8;

/// Cursor position and current style while scanning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphicsState {
    pub row: usize,
    pub col: usize,
    pub style: Style,
}

impl GraphicsState {
    fn newline(&mut self) {
        self.row += 1;
        self.col = 0;
    }

    fn tab(&mut self, cols: usize) {
        let next = (self.col / TAB_WIDTH + 1) * TAB_WIDTH;
        self.col = next.min(cols.saturating_sub(1));
    }
}

/// Final bytes the engine knows by name. Everything else in `0x40..=0x7E`
/// also ends a sequence but is equally ignored.
fn is_known_final(ch: char) -> bool {
    matches!(ch, 'm' | 'H' | 'J' | 'K' | 'A' | 'B' | 'C' | 'D')
}

fn is_final(ch: char) -> bool {
    ('\x40'..='\x7e').contains(&ch)
}

/// Parses `text` into a fresh `cols × rows` grid.
///
/// A CSI sequence (`ESC [`) runs until its final byte. `m`, `H`, `J`, `K`,
/// `A`, `B`, `C` and `D` are the recognised finals, but any byte in
/// `0x40..=0x7E` ends the sequence, so `ESC[5n` or `ESC[?25l` never swallow
/// the text after them. Only `m` has an effect; every other sequence is
/// dropped. Parsing never fails: a size whose cell count overflows `usize`
/// produces an empty grid (see [`Grid::new`]).
pub fn parse(text: &str, cols: usize, rows: usize) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let mut state = GraphicsState::default();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match ch {
            ESC => match chars.next() {
                Some('[') => {
                    let mut params = String::new();
                    let final_byte = loop {
                        match chars.next() {
                            Some(c) if c.is_ascii_digit() || c == ';' || c == ':' => {
                                params.push(c)
                            }
                            Some(c) if is_final(c) => break Some(c),
                            Some(_) => {}
                            None => break None,
                        }
                    };
                    match final_byte {
                        Some('m') => apply_sgr(&parse_params(&params), &mut state.style),
                        Some(c) => {
                            if !is_known_final(c) {
                                trace!("ignoring CSI sequence ending in {c:?}");
                            }
                        }
                        None => {
                            trace!("unterminated CSI sequence, stopping at row {}", state.row);
                            break;
                        }
                    }
                }
                Some(_) => {}
                None => break,
            },
            '\n' => state.newline(),
            '\r' => state.col = 0,
            '\t' => state.tab(cols),
            c if c < ' ' || c == '\x7f' => {}
            c => {
                grid.put(state.row, state.col, Cell::new(c, state.style));
                state.col += 1;
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{DEFAULT_FG, PALETTE};

    fn text(grid: &Grid) -> String {
        grid.to_text()
    }

    #[test]
    fn plain_text_fills_first_row() {
        let grid = parse("Hello", 10, 2);
        assert_eq!(text(&grid), "Hello\n");
        for col in 0..5 {
            assert_eq!(grid.get(0, col).map(|c| c.style()), Some(Style::default()));
        }
    }

    #[test]
    fn newlines_and_carriage_returns() {
        let grid = parse("abc\rX\nY", 5, 3);
        assert_eq!(text(&grid), "Xbc\nY\n");
    }

    #[test]
    fn rows_past_the_bottom_are_dropped() {
        let grid = parse("A\nB\nC\nD", 3, 2);
        assert_eq!(text(&grid), "A\nB");
    }

    #[test]
    fn columns_do_not_wrap() {
        let grid = parse("abcdef\ng", 3, 2);
        assert_eq!(text(&grid), "abc\ng");
    }

    #[test]
    fn tabs_stop_at_multiples_of_eight() {
        let grid = parse("a\tb\tc", 20, 1);
        assert_eq!(grid.get(0, 8).map(|c| c.ch), Some('b'));
        assert_eq!(grid.get(0, 16).map(|c| c.ch), Some('c'));
    }

    #[test]
    fn tab_clamps_to_last_column() {
        let grid = parse("ab\tX", 6, 1);
        assert_eq!(grid.get(0, 5).map(|c| c.ch), Some('X'));
    }

    #[test]
    fn sgr_sets_style_for_following_cells() {
        let grid = parse("\x1b[31mR\x1b[0mN", 4, 1);
        assert_eq!(grid.get(0, 0).map(|c| c.fg), Some(PALETTE[1]));
        assert_eq!(grid.get(0, 1).map(|c| c.fg), Some(DEFAULT_FG));
    }

    #[test]
    fn non_sgr_sequences_are_consumed() {
        let grid = parse("\x1b[2J\x1b[1;1HA\x1b[KB\x1b[?25lC", 5, 1);
        assert_eq!(text(&grid), "ABC");
    }

    #[test]
    fn unterminated_sequence_stops_parsing() {
        let grid = parse("ok\x1b[31", 5, 1);
        assert_eq!(text(&grid), "ok");
        let grid = parse("ok\x1b", 5, 1);
        assert_eq!(text(&grid), "ok");
    }

    #[test]
    fn two_rune_escapes_are_dropped() {
        let grid = parse("a\x1b7b\x1b8c", 5, 1);
        assert_eq!(text(&grid), "abc");
    }

    #[test]
    fn control_characters_are_ignored() {
        let grid = parse("a\x07b\x08c\x7fd", 5, 1);
        assert_eq!(text(&grid), "abcd");
    }

    #[test]
    fn multibyte_runes_take_one_cell() {
        let grid = parse("é│█✓x", 5, 1);
        assert_eq!(text(&grid), "é│█✓x");
        assert_eq!(grid.get(0, 4).map(|c| c.ch), Some('x'));
    }

    #[test]
    fn any_final_byte_ends_a_sequence() {
        let grid = parse("\x1b[5nAB\x1b[?25lCD", 5, 1);
        assert_eq!(text(&grid), "ABCD");
        let grid = parse("\x1b[6~x\x1b[0@y", 5, 1);
        assert_eq!(text(&grid), "xy");
    }

    #[test]
    fn huge_sizes_do_not_panic() {
        let grid = parse("A", usize::MAX, 2);
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(text(&grid), "");
    }
}
