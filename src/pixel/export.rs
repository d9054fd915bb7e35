use image::RgbImage;

use crate::pixel::buffer::FrameBuffer;

/// Convert the linear-light buffer to an sRGB image for inspection.
///
/// This is the display boundary: the only place channels are clamped and
/// gamma-encoded. Debug and demo tooling, not part of the render path.
pub fn to_srgb_image(buffer: &FrameBuffer) -> RgbImage {
    let mut img = RgbImage::new(buffer.width(), buffer.height());
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.get(x, y);
            img.put_pixel(x, y, image::Rgb([encode(c.r), encode(c.g), encode(c.b)]));
        }
    }
    img
}

fn encode(linear: f32) -> u8 {
    let l = linear.clamp(0.0, 1.0);
    let s = if l <= 0.003_130_8 {
        12.92 * l
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/export.rs"]
mod tests;
