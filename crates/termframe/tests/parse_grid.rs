use pretty_assertions::assert_eq;
use termframe::{
    parse, resolve_256, Cell, Engine, EngineConfig, Rgba, Style, DEFAULT_BG, DEFAULT_FG, PALETTE,
};

fn chars(cells: &[Cell]) -> String {
    cells.iter().map(|c| c.ch).collect()
}

#[test]
fn hello_lands_on_the_first_row() {
    let grid = parse("Hello", 8, 2);
    let row = grid.row(0).unwrap();
    assert_eq!(chars(&row[..5]), "Hello");
    for cell in &row[..5] {
        assert_eq!(cell.fg, DEFAULT_FG);
        assert_eq!(cell.bg, DEFAULT_BG);
        assert!(!cell.bold && !cell.italic);
    }
    assert_eq!(chars(grid.row(1).unwrap()), "        ");
}

#[test]
fn red_foreground() {
    let grid = parse("\x1b[31mX", 4, 1);
    let cell = grid.get(0, 0).unwrap();
    assert_eq!(cell.ch, 'X');
    assert_eq!(cell.fg, PALETTE[1]);
}

#[test]
fn bold_flag() {
    let grid = parse("\x1b[1mB", 4, 1);
    assert!(grid.get(0, 0).unwrap().bold);
}

#[test]
fn reset_clears_prior_style() {
    let grid = parse("\x1b[31mR\x1b[0mN", 4, 1);
    assert_eq!(grid.get(0, 0).unwrap().fg, PALETTE[1]);
    assert_eq!(grid.get(0, 1).unwrap().fg, DEFAULT_FG);
    assert_eq!(grid.get(0, 1).unwrap().style(), Style::default());
}

#[test]
fn multiple_params_keep_the_base_color() {
    let grid = parse("\x1b[1;31mX\x1b[31;1mY\x1b[0;91mZ", 4, 1);
    for col in 0..2 {
        let cell = grid.get(0, col).unwrap();
        assert!(cell.bold);
        assert_eq!(cell.fg, PALETTE[1]);
    }
    let bright = grid.get(0, 2).unwrap();
    assert!(!bright.bold);
    assert_eq!(bright.fg, PALETTE[9]);
}

#[test]
fn palette_indices_in_the_256_table() {
    for i in 0..16u8 {
        assert_eq!(resolve_256(i), PALETTE[i as usize]);
    }
    assert_eq!(resolve_256(16), Rgba::rgb(0, 0, 0));
    assert_eq!(resolve_256(231), Rgba::rgb(255, 255, 255));
    assert_eq!(resolve_256(232), Rgba::rgb(8, 8, 8));
    assert_eq!(resolve_256(255), Rgba::rgb(238, 238, 238));
}

#[test]
fn lines_stack_in_column_zero() {
    let grid = parse("A\nB\nC", 3, 3);
    assert_eq!(grid.get(0, 0).unwrap().ch, 'A');
    assert_eq!(grid.get(1, 0).unwrap().ch, 'B');
    assert_eq!(grid.get(2, 0).unwrap().ch, 'C');

    let short = parse("A\nB\nC", 3, 2);
    assert_eq!(short.to_text(), "A\nB");
}

#[test]
fn styles_carry_across_lines() {
    let grid = parse("\x1b[3;42ma\nb\x1b[23;49mc", 3, 2);
    let b = grid.get(1, 0).unwrap();
    assert!(b.italic);
    assert_eq!(b.bg, PALETTE[2]);
    let c = grid.get(1, 1).unwrap();
    assert!(!c.italic);
    assert_eq!(c.bg, DEFAULT_BG);
}

#[test]
fn engine_parse_uses_configured_size() {
    let engine = Engine::new(EngineConfig::new(6, 2)).unwrap();
    let grid = engine.parse("status: ok\nnext");
    assert_eq!((grid.cols(), grid.rows()), (6, 2));
    assert_eq!(grid.to_text(), "status\nnext");
}

#[test]
fn realistic_frame() {
    let frame = concat!(
        "\x1b[1;36m Tasks \x1b[0m\n",
        "\x1b[32m●\x1b[0m write report   \x1b[90m01:20\x1b[0m\n",
        "\x1b[38;2;255;128;0m○\x1b[0m review       \x1b[90m00:05\x1b[0m\n",
        "\x1b[7m q quit \x1b[0m",
    );
    let grid = parse(frame, 24, 4);
    assert_eq!(
        grid.to_text(),
        " Tasks\n● write report   01:20\n○ review       00:05\n q quit"
    );
    assert_eq!(grid.get(0, 1).unwrap().fg, PALETTE[6]);
    assert!(grid.get(0, 1).unwrap().bold);
    assert_eq!(grid.get(1, 0).unwrap().fg, PALETTE[2]);
    assert_eq!(grid.get(1, 17).unwrap().fg, PALETTE[8]);
    assert_eq!(grid.get(2, 0).unwrap().fg, Rgba::rgb(255, 128, 0));
}
