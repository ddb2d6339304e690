#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfx::*;

fuzz_target!(|data: &[u8]| {
    // First byte picks the parameters, the rest is the image
    let Some((&seed, rest)) = data.split_first() else {
        return;
    };
    let limits = Limits {
        max_pixels: Some(1 << 16),
        max_height: Some(1 << 12),
        ..Default::default()
    };
    let Ok(image) = decode_with_limits(rest, &limits, enough::Unstoppable) else {
        return;
    };

    let small = u32::from(seed % 8);
    let filters = [
        Filter::Crop { width: small * 3, height: small * 2 + 1 },
        Filter::Grayscale,
        Filter::Negative,
        Filter::Sharpen,
        Filter::EdgeDetect { threshold: f64::from(seed) / 255.0 },
        Filter::GaussianBlur { sigma: f64::from(small) * 0.5 + 0.1 },
        Filter::CircularBlur { radius: small },
        Filter::ImageSplit { block_size: small + 1 },
    ];
    for filter in filters {
        let (w, h) = image.dimensions();
        match filter.apply(image.clone()) {
            Ok(out) => {
                assert_eq!(Some(out.dimensions()), filter.output_dimensions(w, h), "{filter}");
            }
            // Blocks larger than a tiny image
            Err(BmpFxError::InvalidParameter(_)) if matches!(filter, Filter::ImageSplit { .. }) => {}
            Err(e) => panic!("{filter}: {e}"),
        }
    }
});
