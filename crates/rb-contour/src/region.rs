use std::sync::atomic::{AtomicU64, Ordering};

use crate::forest::forest_area;
use crate::segment::Segment;

static NEXT_REGION_ID: AtomicU64 = AtomicU64::new(1);

fn generated_id() -> String {
    format!("region-{}", NEXT_REGION_ID.fetch_add(1, Ordering::Relaxed))
}

/// A named forest of nested polygons.
///
/// The pixel count is optional: when present it is the authoritative
/// footprint of the region (typically counted while the mask was built);
/// when absent the footprint is derived from polygon geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: String,
    segments: Vec<Segment>,
    pixel_count: Option<u64>,
}

impl Region {
    /// Creates a region; an id is generated when `id` is `None`.
    pub fn new(id: Option<String>, segments: Vec<Segment>, pixel_count: Option<u64>) -> Self {
        Self {
            id: id.unwrap_or_else(generated_id),
            segments,
            pixel_count,
        }
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self::new(None, segments, None)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn pixel_count(&self) -> Option<u64> {
        self.pixel_count
    }

    pub fn set_pixel_count(&mut self, count: Option<u64>) {
        self.pixel_count = count;
    }

    /// Region area in pixels: the stored pixel count when present,
    /// otherwise the geometric forest area.
    pub fn area(&self) -> f64 {
        match self.pixel_count {
            Some(count) => count as f64,
            None => forest_area(&self.segments),
        }
    }
}
