use rb_core::{Depth, Error, Matrix, MatrixData, Raster, RasterData, SampleLayout, Storage};

/// Builds a raster from a 1- or 3-channel matrix.
///
/// Samples are copied verbatim. Single-channel matrices get a grayscale
/// ascending layout; three-channel matrices keep their native B,G,R lanes
/// and name them back to logical R,G,B through descending band offsets
/// `[2, 1, 0]`.
pub fn from_matrix(matrix: &Matrix) -> Result<Raster, Error> {
    let width = matrix.cols();
    let height = matrix.rows();
    let storage = storage_for(matrix.depth());

    let layout = match matrix.channels() {
        1 => SampleLayout::interleaved(storage, width, 1),
        3 => SampleLayout::interleaved_with_offsets(storage, width, 3, vec![2, 1, 0])
            .expect("three offsets for three channels"),
        channels => return Err(Error::UnsupportedChannelCount { channels }),
    };

    let data = match matrix.data() {
        MatrixData::U8(v) => RasterData::U8(v.clone()),
        MatrixData::U16(v) => RasterData::U16(v.clone()),
        MatrixData::I16(v) => RasterData::I16(v.clone()),
        MatrixData::I32(v) => RasterData::I32(v.clone()),
        MatrixData::F32(v) => RasterData::F32(v.clone()),
        MatrixData::F64(v) => RasterData::F64(v.clone()),
    };

    Raster::from_data(width, height, layout, data)
}

fn storage_for(depth: Depth) -> Storage {
    match depth {
        Depth::U8 => Storage::U8,
        Depth::U16 => Storage::U16,
        Depth::I16 => Storage::I16,
        Depth::I32 => Storage::I32,
        Depth::F32 => Storage::F32,
        Depth::F64 => Storage::F64,
    }
}
