use super::*;

use crate::grid::config::DisplayConfig;
use crate::pixel::color::LinearRgb;

#[test]
fn endpoints_encode_exactly() {
    let mut buf = FrameBuffer::new(DisplayConfig::new(4, 2).unwrap());
    buf.set(0, 0, LinearRgb::BLACK);
    buf.set(1, 0, LinearRgb::WHITE);
    let img = to_srgb_image(&buf);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
}

#[test]
fn mid_grey_gets_gamma_lifted() {
    let mut buf = FrameBuffer::new(DisplayConfig::new(4, 2).unwrap());
    buf.set(0, 0, LinearRgb::splat(0.5));
    let img = to_srgb_image(&buf);
    let v = img.get_pixel(0, 0).0[0];
    assert!((186..=190).contains(&v), "srgb(0.5) = {v}");
}

#[test]
fn out_of_range_values_clamp_at_the_display_boundary() {
    let mut buf = FrameBuffer::new(DisplayConfig::new(4, 2).unwrap());
    buf.set(0, 0, LinearRgb::new(5.0, -2.0, 1.0));
    let img = to_srgb_image(&buf);
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 255]);
}

#[test]
fn dimensions_match_the_buffer() {
    let buf = FrameBuffer::new(DisplayConfig::new(7, 3).unwrap());
    let img = to_srgb_image(&buf);
    assert_eq!((img.width(), img.height()), (7, 3));
}
