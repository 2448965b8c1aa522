use crate::parsing::blocks::{FinishedBlock, LayoutTracker};

/// Validates layout invariants of a finished block sequence.
///
/// Asserts that:
/// - Every block starts at or below the bottom of the previous one
/// - Every block is at least as tall as its content
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(blocks: &[FinishedBlock]) {
    let mut bottom = 0u32;
    for b in blocks {
        assert!(
            b.layout.top >= bottom,
            "{} block at row {} overlaps previous block ending at row {}",
            b.kind.label(),
            b.layout.top,
            bottom
        );
        let rows = LayoutTracker::height_for(&b.content, 0);
        assert!(
            b.layout.height >= rows,
            "{} block is {} rows tall but has {} content rows",
            b.kind.label(),
            b.layout.height,
            rows
        );
        bottom = b.layout.bottom();
    }
}
