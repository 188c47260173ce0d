/// The direction a flip moves the counts of the flipped cell's neighbors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Delta {
    /// The cell became alive, so each neighbor gains one.
    Born,
    /// The cell died, so each neighbor loses one.
    Died,
}

impl Delta {
    pub fn for_status(alive: bool) -> Self {
        if alive { Delta::Born } else { Delta::Died }
    }
}

/// Row/column offsets of the eight grid-adjacent cells.
#[rustfmt::skip]
pub const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Flat indices of the in-bounds neighbors of `(row, col)`. Nothing wraps
/// around the edges, so corners yield 3 and edges yield 5.
pub fn neighbors(rows: usize, cols: usize, row: usize, col: usize) -> impl Iterator<Item = usize> {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < rows && c < cols).then_some(r * cols + c)
    })
}

/// Add `delta` to the count of every in-bounds neighbor of `(row, col)`.
///
/// `counts` is a row-major `rows * cols` grid. Must run exactly once per flip,
/// at the moment the flip is decided.
///
/// # Panics
///
/// If `(row, col)` lies outside the grid, or a count would leave `0..=8`.
pub fn apply_neighbor_delta(
    counts: &mut [u8],
    rows: usize,
    cols: usize,
    delta: Delta,
    row: usize,
    col: usize,
) {
    assert!(
        row < rows && col < cols,
        "neighbor delta at ({row}, {col}) outside {rows}x{cols} grid"
    );
    debug_assert_eq!(counts.len(), rows * cols);

    for idx in neighbors(rows, cols, row, col) {
        let count = &mut counts[idx];
        *count = match delta {
            Delta::Born => count.checked_add(1).filter(|&n| n <= 8),
            Delta::Died => count.checked_sub(1),
        }
        .unwrap_or_else(|| panic!("neighbor count out of range at index {idx}"));
    }
}

/// Count live neighbors of every cell from scratch.
pub fn recount_neighbors(alive: &[bool], rows: usize, cols: usize) -> Vec<u8> {
    debug_assert_eq!(alive.len(), rows * cols);

    let mut counts = vec![0; rows * cols];
    for row in 0..rows {
        for col in 0..cols {
            counts[row * cols + col] = neighbors(rows, cols, row, col)
                .filter(|&idx| alive[idx])
                .count() as u8;
        }
    }
    counts
}
