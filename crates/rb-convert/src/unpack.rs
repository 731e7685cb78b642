use rb_core::{Error, Raster, RasterData, Rect, SampleLayout};

/// True iff the layout is 1-bit-per-pixel and single-band.
pub fn is_binary_layout(layout: &SampleLayout) -> bool {
    layout.is_binary()
}

/// Unpacks a 1-bit raster region to one byte (0 or 1) per pixel, row-major,
/// line stride = `rect.width`.
///
/// Bits are read most-significant-first within each storage word; the three
/// packed word widths (8, 16, 32 bits) are supported.
pub fn unpack_bits(raster: &Raster, rect: Rect) -> Result<Vec<u8>, Error> {
    if !raster.layout().is_binary() {
        return Err(Error::NotBinaryLayout);
    }

    if !rect.fits_within(raster.width(), raster.height()) {
        return Err(Error::OutOfBounds);
    }

    let words_per_row = raster.layout().scanline_stride();
    let out = match raster.data() {
        RasterData::U8(words) => unpack_words(words, words_per_row, rect),
        RasterData::U16(words) => unpack_words(words, words_per_row, rect),
        RasterData::I32(words) => unpack_words(words, words_per_row, rect),
        _ => unreachable!("bit-packed rasters store u8, u16, or i32 words"),
    };

    Ok(out)
}

trait PackedWord: Copy {
    const BITS: usize;

    /// Bit value at `bit`, counting from the least significant bit.
    fn bit(self, bit: usize) -> u8;
}

impl PackedWord for u8 {
    const BITS: usize = 8;

    fn bit(self, bit: usize) -> u8 {
        (self >> bit) & 1
    }
}

impl PackedWord for u16 {
    const BITS: usize = 16;

    fn bit(self, bit: usize) -> u8 {
        ((self >> bit) & 1) as u8
    }
}

impl PackedWord for i32 {
    const BITS: usize = 32;

    fn bit(self, bit: usize) -> u8 {
        ((self as u32 >> bit) & 1) as u8
    }
}

fn unpack_words<W: PackedWord>(words: &[W], words_per_row: usize, rect: Rect) -> Vec<u8> {
    let mut out = Vec::with_capacity(rect.width * rect.height);

    for y in rect.y..rect.y + rect.height {
        let row = &words[y * words_per_row..];
        for x in rect.x..rect.x + rect.width {
            let word = row[x / W::BITS];
            out.push(word.bit(W::BITS - 1 - (x % W::BITS)));
        }
    }

    out
}
