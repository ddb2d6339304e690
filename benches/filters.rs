use criterion::{BenchmarkGroup, Criterion, Throughput, measurement::WallTime};
use enough::Unstoppable;
use zenbmpfx::{Bgr8, Filter, Image, decode_bmp, encode_bmp};

// === Inputs ===

const W: usize = 1280;
const H: usize = 720;

fn test_image(w: usize, h: usize) -> Image {
    Image::from_fn(w, h, |x, y| {
        Bgr8::new((x % 251) as u8, (y % 241) as u8, ((x * y) % 239) as u8)
    })
}

fn print_build_info() {
    eprintln!("=== zenbmpfx filter benches ===");
    eprintln!("  image:    {W}x{H}");
    eprintln!(
        "  parallel: {}",
        if cfg!(feature = "parallel") { "rayon" } else { "off" }
    );
    eprintln!("===============================");
}

// === Benchmark helpers ===

fn bench_filter(group: &mut BenchmarkGroup<WallTime>, name: &str, filter: Filter, img: &Image) {
    group.bench_function(name, |b| {
        b.iter(|| filter.apply(img.clone()).unwrap());
    });
}

// === Benchmark groups ===

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let img = test_image(W, H);
    let encoded = encode_bmp(&img, Unstoppable).unwrap();
    group.throughput(Throughput::Bytes(encoded.len() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| encode_bmp(&img, Unstoppable).unwrap());
    });
    group.bench_function("decode", |b| {
        b.iter(|| decode_bmp(&encoded, Unstoppable).unwrap());
    });
    group.finish();
}

fn bench_point_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("point");
    group.throughput(Throughput::Elements((W * H) as u64));
    let img = test_image(W, H);
    bench_filter(&mut group, "grayscale", Filter::Grayscale, &img);
    bench_filter(&mut group, "negative", Filter::Negative, &img);
    bench_filter(&mut group, "crop_half", Filter::Crop { width: (W / 2) as u32, height: (H / 2) as u32 }, &img);
    group.finish();
}

fn bench_neighborhood_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighborhood");
    group.throughput(Throughput::Elements((W * H) as u64));
    group.sample_size(20);
    let img = test_image(W, H);
    bench_filter(&mut group, "sharpen", Filter::Sharpen, &img);
    bench_filter(&mut group, "edge", Filter::EdgeDetect { threshold: 0.2 }, &img);
    for sigma in [1.0, 3.0] {
        bench_filter(&mut group, &format!("gaussian_s{sigma}"), Filter::GaussianBlur { sigma }, &img);
    }
    for radius in [2, 5] {
        bench_filter(&mut group, &format!("circular_r{radius}"), Filter::CircularBlur { radius }, &img);
    }
    bench_filter(&mut group, "image_split_8", Filter::ImageSplit { block_size: 8 }, &img);
    group.finish();
}

fn main() {
    print_build_info();

    let mut criterion = Criterion::default().configure_from_args();
    bench_codec(&mut criterion);
    bench_point_filters(&mut criterion);
    bench_neighborhood_filters(&mut criterion);
    criterion.final_summary();
}
