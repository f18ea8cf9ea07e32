//! Basic example of using the picture puzzle engine

use picto_core::{reconcile, Coordinate, Grid, Mosaic, Scrambler, TapOutcome};

fn main() -> picto_core::Result<()> {
    // A 3x3 puzzle whose tiles are 100x100 pixels
    let mut grid = Grid::new(100, 100, 3, 3)?;
    let mut picture = Mosaic::from_fn(3, 3, |at: Coordinate| (b'A' + (at.row * 3 + at.col) as u8) as char)?;

    println!("Solved picture:\n{}", picture);

    let swaps = Scrambler::with_seed(7).scramble(&mut grid, &mut picture)?;
    println!("Scrambled with {} swaps:\n{}", swaps.len(), picture);

    // Taps arrive as pixel positions from the screen
    let first = grid.coordinate_from_pixel(20, 250);
    let second = grid.coordinate_from_pixel(150, 30);
    grid.tap(first)?;
    if let TapOutcome::Swapped { swap, solved } = grid.tap(second)? {
        picture.swap(swap.first, swap.second)?;
        println!("Swapped {}, solved: {}\n{}", swap, solved, picture);
    }

    // Save the arrangement and replay it onto a fresh, solved picture
    let saved = grid.to_json()?;
    println!("Saved state: {}", saved);

    let restored = Grid::from_json(&saved)?;
    let mut fresh = Mosaic::from_fn(3, 3, |at: Coordinate| (b'A' + (at.row * 3 + at.col) as u8) as char)?;
    let replay = reconcile(&restored, &mut fresh)?;
    println!(
        "Replayed {} swaps ({} trials):\n{}",
        replay.swaps.len(),
        replay.comparisons,
        fresh
    );
    assert_eq!(fresh, picture);

    Ok(())
}
