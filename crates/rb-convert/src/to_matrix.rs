use rb_core::{Error, Matrix, MatrixData, Raster, RasterData, Rect, SampleLayout};

use crate::unpack::unpack_bits;

/// Converts a raster (or a rectangular sub-region of it) into a matrix of
/// matching element type and channel count.
///
/// Binary (1-bit packed) rasters unpack to a single-channel u8 matrix of
/// 0/1 bytes regardless of `to_native_order`. For u8 three-channel rasters
/// `to_native_order = true` forces the output into the engine's native
/// B,G,R lane order when the band offsets identify the layout as plain
/// ascending (R,G,B) or descending (B,G,R); any other offset pattern is
/// copied verbatim in physical lane order, best effort.
pub fn to_matrix(
    raster: &Raster,
    region: Option<Rect>,
    to_native_order: bool,
) -> Result<Matrix, Error> {
    let rect = region.unwrap_or_else(|| raster.bounds());
    if !rect.fits_within(raster.width(), raster.height()) {
        return Err(Error::OutOfBounds);
    }

    if raster.layout().is_binary() {
        let bytes = unpack_bits(raster, rect)?;
        return Matrix::from_data(rect.height, rect.width, 1, MatrixData::U8(bytes));
    }

    let channels = raster.layout().channels();
    if channels != 1 && channels != 3 {
        return Err(Error::UnsupportedChannelCount { channels });
    }

    let layout = raster.layout();
    let data = match raster.data() {
        RasterData::U8(buf) => MatrixData::U8(copy_u8(buf, layout, rect, to_native_order)),
        RasterData::U16(buf) => MatrixData::U16(copy_lanes(buf, layout, rect)),
        RasterData::I16(buf) => MatrixData::I16(copy_lanes(buf, layout, rect)),
        RasterData::I32(buf) => MatrixData::I32(copy_lanes(buf, layout, rect)),
        RasterData::F32(buf) => MatrixData::F32(copy_lanes(buf, layout, rect)),
        RasterData::F64(buf) => MatrixData::F64(copy_lanes(buf, layout, rect)),
    };

    Matrix::from_data(rect.height, rect.width, channels, data)
}

/// Raw interleaved copy in physical lane order; band offsets are not
/// consulted here, reordering is a separate u8-only step.
fn copy_lanes<T: Copy>(buf: &[T], layout: &SampleLayout, rect: Rect) -> Vec<T> {
    let channels = layout.channels();
    let pixel = layout.pixel_stride();
    let scan = layout.scanline_stride();

    let mut out = Vec::with_capacity(rect.width * rect.height * channels);
    for y in rect.y..rect.y + rect.height {
        let row = y * scan;
        for x in rect.x..rect.x + rect.width {
            let base = row + x * pixel;
            for c in 0..channels {
                out.push(buf[base + c]);
            }
        }
    }

    out
}

fn copy_u8(buf: &[u8], layout: &SampleLayout, rect: Rect, to_native_order: bool) -> Vec<u8> {
    if layout.channels() != 3 {
        return copy_lanes(buf, layout, rect);
    }

    // Fully separated planes: pixel stride 1 with plane-sized band offsets.
    if layout.pixel_stride() == 1 {
        return merge_planes(buf, layout, rect, to_native_order);
    }

    let mut out = copy_lanes(buf, layout, rect);
    if wants_lane_swap(layout.band_offsets(), to_native_order) {
        for px in out.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
    }

    out
}

fn wants_lane_swap(band_offsets: &[usize], to_native_order: bool) -> bool {
    if band_offsets == [0, 1, 2] {
        to_native_order
    } else if band_offsets == [2, 1, 0] {
        !to_native_order
    } else {
        false
    }
}

/// Reads each plane into a scratch channel and interleaves the three.
/// Native order reads planes in reverse index order to land as B,G,R.
fn merge_planes(buf: &[u8], layout: &SampleLayout, rect: Rect, to_native_order: bool) -> Vec<u8> {
    let order: [usize; 3] = if to_native_order { [2, 1, 0] } else { [0, 1, 2] };
    let planes: Vec<Vec<u8>> = order
        .iter()
        .map(|&band| copy_plane(buf, layout, rect, band))
        .collect();

    let pixels = rect.width * rect.height;
    let mut out = Vec::with_capacity(pixels * 3);
    for i in 0..pixels {
        out.push(planes[0][i]);
        out.push(planes[1][i]);
        out.push(planes[2][i]);
    }

    out
}

fn copy_plane(buf: &[u8], layout: &SampleLayout, rect: Rect, band: usize) -> Vec<u8> {
    let offset = layout.band_offsets()[band];
    let scan = layout.scanline_stride();

    let mut out = Vec::with_capacity(rect.width * rect.height);
    for y in rect.y..rect.y + rect.height {
        let start = offset + y * scan + rect.x;
        out.extend_from_slice(&buf[start..start + rect.width]);
    }

    out
}
