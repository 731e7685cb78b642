use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{Contour, find_contours};
use rb_contour::{HierarchyRow, Region, Segment, build_forest, fallback_color, forest_area};
use rb_convert::{from_matrix, to_matrix};
use rb_core::{Point2f, Raster, RasterData, SampleLayout, Storage};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "rb_gallery")]
#[command(about = "Run raster-bridge conversions and contour forests on PNG fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PNG -> raster -> matrix -> raster round trip.
    #[command(name = "convert")]
    Convert(ConvertArgs),
    /// Mask PNG -> binary matrix -> contour forest with areas.
    #[command(name = "regions")]
    Regions(RegionsArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/gallery")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Keep the raster's R,G,B lane order instead of the engine's B,G,R.
    #[arg(long, default_value_t = false)]
    keep_rgb_order: bool,
}

#[derive(Args, Debug, Clone)]
struct RegionsArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Mask threshold: pixels above this value are foreground.
    #[arg(long, default_value_t = 127)]
    threshold: u8,
}

#[derive(Debug, Clone, Serialize)]
struct MetaConvert {
    width: usize,
    height: usize,
    channels: usize,
    depth: &'static str,
    native_order: bool,
}

#[derive(Debug, Clone, Serialize)]
struct RegionDto {
    id: String,
    color: [u8; 3],
    area: f64,
    polygons: usize,
    holes: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRegions {
    width: usize,
    height: usize,
    threshold: u8,
    mask_pixels: u64,
    contour_count: usize,
    region_count: usize,
    total_area: f64,
    regions: Vec<RegionDto>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Convert(args) => run_convert(args),
        Command::Regions(args) => run_regions(args),
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let out_dir = prepare_out_dir(&args.common.out, "convert")?;
    let img = load_rgb(&args.common.input)?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let layout = SampleLayout::interleaved(Storage::U8, width, 3);
    let raster = Raster::from_data(width, height, layout, RasterData::U8(img.into_raw()))
        .context("wrap PNG pixels as a raster")?;

    let native_order = !args.keep_rgb_order;
    let matrix = to_matrix(&raster, None, native_order).context("raster to matrix")?;
    let back = from_matrix(&matrix).context("matrix back to raster")?;

    let mut roundtrip_ok = true;
    let mut restored = RgbImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let mut px = [0u8; 3];
            for band in 0..3 {
                let original = raster.sample(x, y, band).expect("in-bounds sample");
                let value = back.sample(x, y, band).expect("in-bounds sample");
                roundtrip_ok &= value == original;
                px[band] = value as u8;
            }
            restored.put_pixel(x as u32, y as u32, Rgb(px));
        }
    }

    if !roundtrip_ok {
        bail!("logical samples changed across the round trip");
    }

    restored
        .save(out_dir.join("restored.png"))
        .context("save restored PNG")?;

    write_json(
        out_dir.join("meta.json"),
        &MetaConvert {
            width,
            height,
            channels: 3,
            depth: "u8",
            native_order,
        },
    )
}

fn run_regions(args: RegionsArgs) -> Result<()> {
    let out_dir = prepare_out_dir(&args.common.out, "regions")?;
    let gray = load_gray(&args.common.input)?;
    let (width, height) = (gray.width() as usize, gray.height() as usize);

    // Pack the thresholded mask into a 1-bit raster, then let the bridge
    // unpack it into the engine's single-channel byte matrix.
    let packed = pack_mask_bits(&gray, args.threshold)?;
    let matrix = to_matrix(&packed, None, true).context("binary raster to matrix")?;
    let mask = matrix.as_u8().expect("binary matrices are u8");
    let mask_pixels: u64 = mask.iter().map(|&v| v as u64).sum();

    let detector_input = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([mask[y as usize * width + x as usize] * 255])
    });

    // External black-box contour detection; column 3 of its hierarchy is
    // the parent index.
    let found: Vec<Contour<u32>> = find_contours(&detector_input);
    let contour_count = found.len();

    let mut contours = Vec::with_capacity(found.len());
    let mut hierarchy = Vec::with_capacity(found.len());
    for contour in &found {
        contours.push(
            contour
                .points
                .iter()
                .map(|p| Point2f::new(p.x as f32, p.y as f32))
                .collect::<Vec<_>>(),
        );
        hierarchy.push(match contour.parent {
            Some(parent) => HierarchyRow::with_parent(parent as i32),
            None => HierarchyRow::root(),
        });
    }

    let forest = build_forest(contours, &hierarchy);
    let total_area = forest_area(&forest);

    let mut overlay = RgbImage::new(gray.width(), gray.height());
    for (i, root) in forest.iter().enumerate() {
        paint_segment(&mut overlay, root, fallback_color(i as u32));
    }

    let mut regions = Vec::with_capacity(forest.len());
    for (i, root) in forest.into_iter().enumerate() {
        let polygons = count_polygons(&root);
        let holes = root.children().len();
        let region = Region::from_segments(vec![root]);
        regions.push(RegionDto {
            id: region.id().to_owned(),
            color: fallback_color(i as u32),
            area: region.area(),
            polygons,
            holes,
        });
    }

    overlay
        .save(out_dir.join("contours.png"))
        .context("save contour overlay")?;

    write_json(
        out_dir.join("regions.json"),
        &MetaRegions {
            width,
            height,
            threshold: args.threshold,
            mask_pixels,
            contour_count,
            region_count: regions.len(),
            total_area,
            regions,
        },
    )
}

fn pack_mask_bits(mask: &GrayImage, threshold: u8) -> Result<Raster> {
    let width = mask.width() as usize;
    let height = mask.height() as usize;

    let layout = SampleLayout::bit_packed(Storage::U8, width).context("packed mask layout")?;
    let words_per_row = layout.scanline_stride();

    let mut words = vec![0u8; words_per_row * height];
    for (x, y, px) in mask.enumerate_pixels() {
        if px[0] > threshold {
            let x = x as usize;
            words[y as usize * words_per_row + x / 8] |= 1 << (7 - x % 8);
        }
    }

    Raster::from_data(width, height, layout, RasterData::U8(words))
        .context("wrap packed words as a raster")
}

fn paint_segment(img: &mut RgbImage, segment: &Segment, color: [u8; 3]) {
    for p in segment.points() {
        let x = p.x.round() as i64;
        let y = p.y.round() as i64;
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    for child in segment.children() {
        paint_segment(img, child, color);
    }
}

fn count_polygons(segment: &Segment) -> usize {
    1 + segment
        .children()
        .iter()
        .map(count_polygons)
        .sum::<usize>()
}

fn prepare_out_dir(base: &Path, case: &str) -> Result<PathBuf> {
    let dir = base.join(case);
    fs::create_dir_all(&dir)
        .with_context(|| format!("create output directory {}", dir.display()))?;
    Ok(dir)
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).with_context(|| format!("open input {}", path.display()))?;
    Ok(img.to_rgb8())
}

fn load_gray(path: &Path) -> Result<GrayImage> {
    let img = image::open(path).with_context(|| format!("open input {}", path.display()))?;
    Ok(img.to_luma8())
}

fn write_json<T: Serialize>(path: PathBuf, payload: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(payload).context("serialize JSON payload")?;
    fs::write(&path, text).with_context(|| format!("write {}", path.display()))
}
