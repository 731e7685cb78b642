use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rb_convert::{from_matrix, to_matrix, unpack_bits};
use rb_core::{Raster, RasterData, Rect, SampleLayout, Storage};

fn synthetic_rgb_frame(width: usize, height: usize) -> Raster {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x & 0xff) as u8);
            data.push((y & 0xff) as u8);
            data.push(((x + y) & 0xff) as u8);
        }
    }

    let layout = SampleLayout::interleaved(Storage::U8, width, 3);
    Raster::from_data(width, height, layout, RasterData::U8(data)).expect("valid raster")
}

fn synthetic_packed_mask(width: usize, height: usize) -> Raster {
    let layout = SampleLayout::bit_packed(Storage::U8, width).expect("packed layout");
    let words = layout.scanline_stride() * height;
    let data: Vec<u8> = (0..words).map(|i| (i % 251) as u8).collect();
    Raster::from_data(width, height, layout, RasterData::U8(data)).expect("valid raster")
}

fn bench_convert(c: &mut Criterion) {
    let width = 1280;
    let height = 1024;
    let frame = synthetic_rgb_frame(width, height);
    let mask = synthetic_packed_mask(width, height);

    c.bench_function("rb_convert_to_matrix_1280x1024x3", |b| {
        b.iter(|| {
            let m = to_matrix(black_box(&frame), None, true).expect("convertible");
            black_box(m.data().len());
        });
    });

    let matrix = to_matrix(&frame, None, true).expect("convertible");
    c.bench_function("rb_convert_from_matrix_1280x1024x3", |b| {
        b.iter(|| {
            let r = from_matrix(black_box(&matrix)).expect("convertible");
            black_box(r.data().len());
        });
    });

    c.bench_function("rb_convert_unpack_bits_1280x1024", |b| {
        b.iter(|| {
            let bits =
                unpack_bits(black_box(&mask), Rect::full(width, height)).expect("binary raster");
            black_box(bits.len());
        });
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
