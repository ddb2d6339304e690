#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parsing and decode must never panic
    let _ = zenbmpfx::bmp::BmpHeader::parse(data);

    let limits = zenbmpfx::Limits {
        max_pixels: Some(1 << 22),
        max_height: Some(1 << 16),
        ..Default::default()
    };
    let _ = zenbmpfx::decode_with_limits(data, &limits, enough::Unstoppable);
});
