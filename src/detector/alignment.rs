//! Finder role assignment and bottom-right alignment estimate
//!
//! The three finder centers of a square symbol form a right isosceles
//! triangle. The right-angle vertex is top-left; the other two are told
//! apart by the winding direction. The fourth corner of the parallelogram
//! approximates where the bottom-right alignment pattern sits.
use crate::error::LocateError;
use crate::models::{Cell, FinderTriple};

/// How the three surviving finder centers get their roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinderOrdering {
    /// Classify by geometry, independent of discovery order
    #[default]
    Geometric,
    /// Trust discovery order as [top-left, top-right, bottom-left]
    Discovery,
}

/// Two right-angle candidates closer than this in |cos| are a tie
const ORDERING_TIE_EPSILON: f32 = 1e-3;

/// Assign top-left/top-right/bottom-left roles to exactly three centers
pub fn classify_finders(
    centers: &[Cell],
    ordering: FinderOrdering,
) -> Result<FinderTriple, LocateError> {
    let [a, b, c] = centers else {
        return Err(LocateError::FinderCount {
            found: centers.len(),
        });
    };

    match ordering {
        FinderOrdering::Discovery => Ok(FinderTriple::new(*a, *b, *c)),
        FinderOrdering::Geometric => order_by_geometry([*a, *b, *c]),
    }
}

fn order_by_geometry(cells: [Cell; 3]) -> Result<FinderTriple, LocateError> {
    let points = cells.map(|c| c.to_point());

    // Find the right-angle corner (top-left)
    let mut cosines = [0.0f32; 3];
    for i in 0..3 {
        let p = &points[i];
        let p1 = &points[(i + 1) % 3];
        let p2 = &points[(i + 2) % 3];

        let v1x = p1.x - p.x;
        let v1y = p1.y - p.y;
        let v2x = p2.x - p.x;
        let v2y = p2.y - p.y;
        let dot = v1x * v2x + v1y * v2y;
        let denom = (v1x * v1x + v1y * v1y).sqrt() * (v2x * v2x + v2y * v2y).sqrt();
        if denom == 0.0 {
            // Coincident centers
            return Err(LocateError::AmbiguousOrdering);
        }
        cosines[i] = (dot / denom).abs();
    }

    let mut ranked = [0usize, 1, 2];
    ranked.sort_by(|&l, &r| cosines[l].total_cmp(&cosines[r]));
    if cosines[ranked[1]] - cosines[ranked[0]] < ORDERING_TIE_EPSILON {
        return Err(LocateError::AmbiguousOrdering);
    }
    let best_idx = ranked[0];

    let tl = cells[best_idx];
    let p1 = cells[(best_idx + 1) % 3];
    let p2 = cells[(best_idx + 2) % 3];

    // Image coordinates have y pointing down, so a positive cross product
    // means p1 -> p2 turns clockwise on screen: p1 is top-right.
    let (v1y, v1x) = p1.offset_from(&tl);
    let (v2y, v2x) = p2.offset_from(&tl);
    let cross = v1x as i64 * v2y as i64 - v1y as i64 * v2x as i64;

    match cross {
        0 => Err(LocateError::AmbiguousOrdering),
        c if c > 0 => Ok(FinderTriple::new(tl, p1, p2)),
        _ => Ok(FinderTriple::new(tl, p2, p1)),
    }
}

/// Complete the parallelogram: `tl + (tr - tl) + (bl - tl)`
pub fn estimate_alignment(finders: &FinderTriple) -> Cell {
    let tl = finders.top_left;
    let (v1_row, v1_col) = finders.top_right.offset_from(&tl);
    let (v2_row, v2_col) = finders.bottom_left.offset_from(&tl);
    tl.shifted(v1_row + v2_row, v1_col + v2_col)
}
