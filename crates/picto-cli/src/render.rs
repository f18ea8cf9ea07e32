use crate::app::App;
use picto_core::{Coordinate, GameMode, Mosaic, Phase};
use std::io::{self, Write};

/// Letter shown for the fragment that belongs at `at`
pub fn fragment_label(columns: usize) -> impl Fn(Coordinate) -> char {
    move |at| {
        let index = at.row * columns + at.col;
        char::from_u32('A' as u32 + index as u32).unwrap_or('?')
    }
}

/// A solved picture for a `rows` × `columns` board
pub fn letters(rows: usize, columns: usize) -> picto_core::Result<Mosaic<char>> {
    Mosaic::from_fn(rows, columns, fragment_label(columns))
}

/// Draw a board with row/column indices, bracketing the selected cell
pub fn board(out: &mut impl Write, mosaic: &Mosaic<char>, marked: Option<Coordinate>) -> io::Result<()> {
    write!(out, "   ")?;
    for col in 0..mosaic.columns() {
        write!(out, " {} ", col)?;
    }
    writeln!(out)?;

    for (row, cells) in mosaic.iter_rows().enumerate() {
        write!(out, "{:>2} ", row)?;
        for (col, cell) in cells.iter().enumerate() {
            if marked == Some(Coordinate::new(row, col)) {
                write!(out, "[{}]", cell)?;
            } else {
                write!(out, " {} ", cell)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Draw the whole play screen
pub fn render(out: &mut impl Write, app: &App) -> io::Result<()> {
    let game = app.game();
    match game.mode() {
        GameMode::FreePlay => writeln!(out, "== Free Play ({}) ==", game.size())?,
        GameMode::Arcade => writeln!(out, "== Arcade round {} ({}) ==", game.round(), game.size())?,
    }

    match game.phase() {
        Phase::AwaitingImage => {
            writeln!(out, "Press enter to start the round.")?;
        }
        Phase::Playing => {
            let marked = game.grid().and_then(|grid| grid.marked());
            board(out, app.picture(), marked)?;
            writeln!(out, "Tap a tile with '<row> <col>'.")?;
        }
        Phase::Solved => {
            board(out, app.picture(), None)?;
            writeln!(out, "Puzzle solved! Type 'next' to continue.")?;
        }
        Phase::ArcadeComplete => {
            writeln!(out, "Arcade complete. Well played!")?;
        }
    }

    if let Some(message) = app.message() {
        writeln!(out, "{}", message)?;
    }
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let label = fragment_label(3);
        assert_eq!(label(Coordinate::new(0, 0)), 'A');
        assert_eq!(label(Coordinate::new(1, 2)), 'F');
    }

    #[test]
    fn test_board_marks_selection() {
        let mosaic = letters(2, 2).unwrap();
        let mut out = Vec::new();
        board(&mut out, &mosaic, Some(Coordinate::new(1, 0))).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "    0  1 \n 0  A  B \n 1 [C] D \n");
    }
}
