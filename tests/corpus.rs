//! Test corpus: every filter over various patterns and sizes, through the codec.

use enough::Unstoppable;
use zenbmpfx::*;

fn checkerboard(w: usize, h: usize) -> Image {
    Image::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Bgr8::new(200, 220, 240)
        } else {
            Bgr8::new(10, 40, 70)
        }
    })
}

fn noise_pattern(w: usize, h: usize) -> Image {
    let mut state: u32 = 0xDEAD_BEEF;
    Image::from_fn(w, h, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [a, b, c, _] = state.to_le_bytes();
        Bgr8::new(a, b, c)
    })
}

fn gradient(w: usize, h: usize) -> Image {
    Image::from_fn(w, h, |x, y| {
        Bgr8::new(
            (x * 255 / w.max(2).saturating_sub(1).max(1)) as u8,
            (y * 255 / h.max(2).saturating_sub(1).max(1)) as u8,
            128,
        )
    })
}

fn all_filters() -> [Filter; 8] {
    [
        Filter::Crop { width: 5, height: 3 },
        Filter::Grayscale,
        Filter::Negative,
        Filter::Sharpen,
        Filter::EdgeDetect { threshold: 0.1 },
        Filter::GaussianBlur { sigma: 1.2 },
        Filter::CircularBlur { radius: 2 },
        Filter::ImageSplit { block_size: 3 },
    ]
}

/// `None` when the filter rejects an image of this size.
fn expected_dimensions(filter: Filter, w: usize, h: usize) -> Option<(usize, usize)> {
    match filter {
        Filter::Crop { width, height } => Some((w.min(width as usize), h.min(height as usize))),
        Filter::ImageSplit { block_size } => {
            let b = block_size as usize;
            (b <= w.max(h)).then(|| (w.div_ceil(b) * b, h.div_ceil(b) * b))
        }
        _ => Some((w, h)),
    }
}

// ── Codec ────────────────────────────────────────────────────────────

#[test]
fn patterns_roundtrip() {
    for (w, h) in [(1, 1), (2, 3), (4, 4), (7, 2), (33, 9)] {
        for img in [checkerboard(w, h), noise_pattern(w, h), gradient(w, h)] {
            let encoded = encode_bmp(&img, Unstoppable).unwrap();
            assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), img, "{w}x{h}");
        }
    }
}

#[test]
fn wide_and_tall() {
    for (w, h) in [(1000, 1), (1, 1000), (3, 301)] {
        let img = noise_pattern(w, h);
        let encoded = encode_bmp(&img, Unstoppable).unwrap();
        assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), img, "{w}x{h}");
    }
}

#[test]
fn zero_width_encodes_header_only() {
    let encoded = encode_bmp(&Image::new(0, 3), Unstoppable).unwrap();
    assert_eq!(encoded.len(), 54);
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.dimensions(), (0, 3));
}

// ── Filters ──────────────────────────────────────────────────────────

#[test]
fn every_filter_over_every_pattern() {
    for (w, h) in [(1, 1), (2, 2), (6, 5), (16, 9)] {
        for img in [checkerboard(w, h), noise_pattern(w, h), gradient(w, h)] {
            for filter in all_filters() {
                let Some(dims) = expected_dimensions(filter, w, h) else {
                    assert!(
                        matches!(filter.apply(img.clone()), Err(BmpFxError::InvalidParameter(_))),
                        "{filter} on {w}x{h}"
                    );
                    continue;
                };
                let out = filter.apply(img.clone()).unwrap();
                assert_eq!(out.dimensions(), dims, "{filter} on {w}x{h}");
                let encoded = encode_bmp(&out, Unstoppable).unwrap();
                assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), out, "{filter}");
            }
        }
    }
}

#[test]
fn checkerboard_blurs_toward_mean() {
    let img = checkerboard(16, 16);
    let out = Filter::GaussianBlur { sigma: 2.0 }.apply(img).unwrap();
    // interior pixels settle close to the midpoint of 200 and 10
    let p = out.get(8, 8).unwrap();
    assert!((95..=115).contains(&p.r), "{p:?}");
}

#[test]
fn checkerboard_edges_everywhere() {
    let out = Filter::EdgeDetect { threshold: 0.5 }
        .apply(checkerboard(8, 8))
        .unwrap();
    // bright squares surrounded by dark ones saturate the Laplacian
    assert_eq!(out.get(2, 2), Some(Bgr8::WHITE));
    assert_eq!(out.get(3, 2), Some(Bgr8::BLACK));
}

#[test]
fn full_chain_is_deterministic() {
    let img = noise_pattern(24, 17);
    let data = encode_bmp(&img, Unstoppable).unwrap();
    let mut pipeline = Pipeline::new();
    for filter in all_filters() {
        pipeline.push(filter);
    }
    let a = pipeline.run(&data, Unstoppable).unwrap();
    let b = pipeline.run(&data, Unstoppable).unwrap();
    assert_eq!(a, b);
    let out = decode_bmp(&a, Unstoppable).unwrap();
    assert_eq!(out.dimensions(), (6, 3));
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_pixels() {
    let data = encode_bmp(&noise_pattern(10, 10), Unstoppable).unwrap();
    let limits = Limits {
        max_pixels: Some(99),
        ..Default::default()
    };
    assert!(matches!(
        decode_with_limits(&data, &limits, Unstoppable),
        Err(BmpFxError::LimitExceeded(_))
    ));
}

#[test]
fn limits_max_memory() {
    let data = encode_bmp(&noise_pattern(10, 10), Unstoppable).unwrap();
    let tight = Limits {
        max_memory_bytes: Some(299),
        ..Default::default()
    };
    assert!(decode_with_limits(&data, &tight, Unstoppable).is_err());
    let exact = Limits {
        max_memory_bytes: Some(300),
        ..Default::default()
    };
    assert!(decode_with_limits(&data, &exact, Unstoppable).is_ok());
}
