use image::RgbaImage;

/// Convert an RGBA image into softbuffer words.
///
/// Each word is `0xAARRGGBB` with the alpha scaled by `opacity` and the
/// colour channels premultiplied by that alpha. Backends that ignore the
/// top byte therefore show the icon blended over black.
pub fn to_buffer_pixels(image: &RgbaImage, opacity: f32) -> Vec<u32> {
    let opacity = opacity.clamp(0.0, 1.0);

    image
        .pixels()
        .map(|pixel| {
            let [r, g, b, a] = pixel.0;
            let alpha = (f32::from(a) * opacity).round() as u32;
            let premultiply = |channel: u8| (u32::from(channel) * alpha + 127) / 255;

            (alpha << 24) | (premultiply(r) << 16) | (premultiply(g) << 8) | premultiply(b)
        })
        .collect()
}
