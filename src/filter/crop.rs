use crate::image::Image;

/// Keep the top-left `min(width, W) x min(height, H)` region.
///
/// Never enlarges; cropping to the current size or larger returns the image
/// as is.
pub fn crop(image: Image, width: usize, height: usize) -> Image {
    let new_w = width.min(image.width());
    let new_h = height.min(image.height());
    if (new_w, new_h) == image.dimensions() {
        return image;
    }

    let mut pixels = Vec::with_capacity(new_w * new_h);
    for y in 0..new_h {
        pixels.extend_from_slice(&image.row(y)[..new_w]);
    }
    Image::from_vec(new_w, new_h, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Bgr8;

    fn numbered(w: usize, h: usize) -> Image {
        Image::from_fn(w, h, |x, y| Bgr8::gray((y * w + x) as u8))
    }

    #[test]
    fn keeps_top_left() {
        let out = crop(numbered(4, 3), 2, 2);
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(
            out.pixels(),
            &[Bgr8::gray(0), Bgr8::gray(1), Bgr8::gray(4), Bgr8::gray(5)]
        );
    }

    #[test]
    fn never_enlarges() {
        let img = numbered(4, 3);
        assert_eq!(crop(img.clone(), 100, 100), img);
        assert_eq!(crop(img.clone(), 4, 3), img);
        assert_eq!(crop(img, 10, 1).dimensions(), (4, 1));
    }

    #[test]
    fn to_zero() {
        assert!(crop(numbered(4, 3), 0, 3).is_empty());
        assert_eq!(crop(numbered(4, 3), 2, 0).dimensions(), (2, 0));
    }
}
