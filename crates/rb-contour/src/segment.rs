use rb_core::Point2f;

/// Closed polygonal boundary with exclusively owned children.
///
/// Children are nested boundaries one level down: holes under an outer
/// boundary, islands under a hole. There is no parent backreference; the
/// ownership edge is parent -> children only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    points: Vec<Point2f>,
    children: Vec<Segment>,
}

impl Segment {
    pub fn new(points: Vec<Point2f>) -> Self {
        Self {
            points,
            children: Vec::new(),
        }
    }

    /// Like [`Segment::new`] but force-closes the ring: when the last point
    /// differs from the first, the first point is appended again.
    pub fn closed(mut points: Vec<Point2f>) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first);
            }
        }
        Self::new(points)
    }

    pub fn points(&self) -> &[Point2f] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut Vec<Point2f> {
        &mut self.points
    }

    pub fn push_point(&mut self, p: Point2f) {
        self.points.push(p);
    }

    pub fn children(&self) -> &[Segment] {
        &self.children
    }

    pub fn push_child(&mut self, child: Segment) {
        self.children.push(child);
    }

    /// Unsigned shoelace area of this boundary alone, ignoring children.
    ///
    /// The vertex order is taken as produced by the detector; winding is not
    /// inspected, so the result is always the magnitude of the formula.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        let mut sum = 0.0_f64;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[(i + 1) % self.points.len()];
            sum += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
        }

        (sum / 2.0).abs()
    }

    /// Area with alternating sign by nesting depth: this boundary minus its
    /// holes, plus islands inside those holes, recursively.
    pub fn nested_area(&self) -> f64 {
        let holes: f64 = self.children.iter().map(Segment::nested_area).sum();
        self.area() - holes
    }
}
