use picto_core::{reconcile, Coordinate, Grid, Mosaic, Scrambler, Swap, SwapSink, Tile};

fn label(columns: usize) -> impl Fn(Coordinate) -> char {
    move |at| (b'A' + (at.row * columns + at.col) as u8) as char
}

#[test]
fn saved_scramble_is_replayed_onto_a_solved_board() {
    let (rows, columns) = (4, 4);
    let mut grid = Grid::new(80, 60, rows, columns).unwrap();
    let mut board = Mosaic::from_fn(rows, columns, label(columns)).unwrap();
    Scrambler::with_seed(17).scramble(&mut grid, &mut board).unwrap();

    // Save, then come back with a fresh solved picture
    let saved = grid.to_json().unwrap();
    let restored = Grid::from_json(&saved).unwrap();
    assert_eq!(restored, grid);

    let mut fresh_board = Mosaic::from_fn(rows, columns, label(columns)).unwrap();
    let result = reconcile(&restored, &mut fresh_board).unwrap();

    assert_eq!(fresh_board, board);
    let expected: Vec<Coordinate> = grid.tiles().map(Tile::current).collect();
    let actual: Vec<Coordinate> = result.grid.tiles().map(Tile::current).collect();
    assert_eq!(actual, expected);
}

#[test]
fn committed_swaps_rebuild_the_arrangement() {
    let mut target = Grid::new(10, 10, 5, 5).unwrap();
    Scrambler::with_seed(3).scramble(&mut target, &mut ()).unwrap();

    let result = reconcile(&target, &mut ()).unwrap();
    let mut replay = Grid::new(10, 10, 5, 5).unwrap();
    for swap in &result.swaps {
        replay.apply_swap(*swap).unwrap();
    }
    assert!(replay.tiles().map(Tile::current).eq(target.tiles().map(Tile::current)));
}

#[test]
fn reconcile_is_deterministic() {
    let mut target = Grid::new(10, 10, 4, 3).unwrap();
    Scrambler::with_seed(8).scramble(&mut target, &mut ()).unwrap();

    let mut first: Vec<Swap> = Vec::new();
    let mut second: Vec<Swap> = Vec::new();
    let a = reconcile(&target, &mut first).unwrap();
    let b = reconcile(&target, &mut second).unwrap();
    assert_eq!(a.swaps, b.swaps);
    assert_eq!(first, second);
    assert_eq!(a.comparisons, b.comparisons);
}
