use rb_core::Point2f;

use crate::segment::Segment;

/// One row of the contour detector's hierarchy table.
///
/// Columns follow the detector's convention `[next, prev, first_child,
/// parent]`; forest assembly only consults `parent`. Negative values mean
/// "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyRow {
    pub next: i32,
    pub prev: i32,
    pub first_child: i32,
    pub parent: i32,
}

impl HierarchyRow {
    pub const NONE: i32 = -1;

    pub fn root() -> Self {
        Self {
            next: Self::NONE,
            prev: Self::NONE,
            first_child: Self::NONE,
            parent: Self::NONE,
        }
    }

    pub fn with_parent(parent: i32) -> Self {
        Self {
            parent,
            ..Self::root()
        }
    }
}

/// Reassembles the detector's flat contour list into a forest of nested
/// polygons.
///
/// Roots keep detection order; children attach under their parent in
/// detection order. A parent index that is negative, out of range, or
/// self-referential makes the contour a root instead of failing the call.
/// Rows whose parent links form a cycle are unreachable from any root and
/// are dropped.
pub fn build_forest(contours: Vec<Vec<Point2f>>, hierarchy: &[HierarchyRow]) -> Vec<Segment> {
    let n = contours.len().min(hierarchy.len());
    let mut points: Vec<Option<Vec<Point2f>>> = contours.into_iter().take(n).map(Some).collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for (i, row) in hierarchy.iter().take(n).enumerate() {
        match usable_parent(row.parent, i, n) {
            Some(parent) => children[parent].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, &mut points, &children))
        .collect()
}

fn usable_parent(parent: i32, index: usize, len: usize) -> Option<usize> {
    if parent < 0 {
        return None;
    }
    let parent = parent as usize;
    (parent < len && parent != index).then_some(parent)
}

// Every index sits in exactly one children bucket or in the root list, so
// each node is assembled at most once and the recursion depth is the
// nesting depth of the hierarchy.
fn assemble(
    index: usize,
    points: &mut [Option<Vec<Point2f>>],
    children: &[Vec<usize>],
) -> Segment {
    let mut segment = Segment::new(points[index].take().unwrap_or_default());
    for &child in &children[index] {
        segment.push_child(assemble(child, points, children));
    }
    segment
}

/// Total forest area with alternating sign by nesting depth, rounded to the
/// nearest integer pixel count.
pub fn forest_area(roots: &[Segment]) -> f64 {
    roots.iter().map(Segment::nested_area).sum::<f64>().round()
}

#[cfg(test)]
mod tests {
    use rb_core::Point2f;

    use super::{HierarchyRow, build_forest, forest_area};

    fn square(origin: f32, side: f32) -> Vec<Point2f> {
        vec![
            Point2f::new(origin, origin),
            Point2f::new(origin + side, origin),
            Point2f::new(origin + side, origin + side),
            Point2f::new(origin, origin + side),
        ]
    }

    #[test]
    fn roots_and_children_follow_the_parent_column() {
        let contours = vec![square(0.0, 10.0), square(3.0, 4.0), square(20.0, 5.0)];
        let hierarchy = [
            HierarchyRow::root(),
            HierarchyRow::with_parent(0),
            HierarchyRow::root(),
        ];

        let forest = build_forest(contours, &hierarchy);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].children().len(), 1);
        assert_eq!(forest[1].children().len(), 0);

        let total_polygons = forest.len() + forest.iter().map(|s| s.children().len()).sum::<usize>();
        assert_eq!(total_polygons, 3);
    }

    #[test]
    fn detection_order_is_preserved() {
        let contours = vec![
            square(0.0, 2.0),
            square(10.0, 2.0),
            square(20.0, 8.0),
            square(22.0, 1.0),
            square(25.0, 1.0),
        ];
        let hierarchy = [
            HierarchyRow::root(),
            HierarchyRow::root(),
            HierarchyRow::root(),
            HierarchyRow::with_parent(2),
            HierarchyRow::with_parent(2),
        ];

        let forest = build_forest(contours.clone(), &hierarchy);

        assert_eq!(forest.len(), 3);
        assert_eq!(forest[0].points(), contours[0].as_slice());
        assert_eq!(forest[2].children().len(), 2);
        assert_eq!(forest[2].children()[0].points(), contours[3].as_slice());
        assert_eq!(forest[2].children()[1].points(), contours[4].as_slice());
    }

    #[test]
    fn missing_parent_index_degrades_to_root() {
        let contours = vec![square(0.0, 2.0), square(10.0, 2.0)];
        let hierarchy = [HierarchyRow::with_parent(99), HierarchyRow::with_parent(1)];

        let forest = build_forest(contours, &hierarchy);

        // Out-of-range and self-referential parents both become roots.
        assert_eq!(forest.len(), 2);
        assert!(forest.iter().all(|s| s.children().is_empty()));
    }

    #[test]
    fn cyclic_parent_rows_are_dropped_without_hanging() {
        let contours = vec![square(0.0, 2.0), square(10.0, 2.0), square(20.0, 2.0)];
        let hierarchy = [
            HierarchyRow::root(),
            HierarchyRow::with_parent(2),
            HierarchyRow::with_parent(1),
        ];

        let forest = build_forest(contours, &hierarchy);
        assert_eq!(forest.len(), 1);
        assert!(forest[0].children().is_empty());
    }

    #[test]
    fn mismatched_lengths_use_the_common_prefix() {
        let contours = vec![square(0.0, 2.0), square(10.0, 2.0)];
        let forest = build_forest(contours, &[HierarchyRow::root()]);
        assert_eq!(forest.len(), 1);

        let forest = build_forest(Vec::new(), &[HierarchyRow::root()]);
        assert!(forest.is_empty());
    }

    #[test]
    fn forest_area_subtracts_holes() {
        let contours = vec![square(0.0, 10.0), square(3.0, 4.0)];
        let hierarchy = [HierarchyRow::root(), HierarchyRow::with_parent(0)];

        let forest = build_forest(contours, &hierarchy);
        assert_eq!(forest_area(&forest), 84.0);
    }

    #[test]
    fn forest_area_rounds_to_whole_pixels() {
        let triangle = vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(3.0, 0.0),
            Point2f::new(0.0, 2.1),
        ];
        let forest = build_forest(vec![triangle], &[HierarchyRow::root()]);
        assert_eq!(forest_area(&forest), 3.0);
    }
}
