use csscolorparser::Color;

use crate::{config::ColorFormat, model::Rgba};

/// Converts a host color record into a hex string.
///
/// Each channel is `round(c * 255)`, clamped to a single byte and written as
/// two lowercase hex digits. With [`ColorFormat::Hex`] the alpha channel is
/// not encoded at all.
pub fn rgba_to_hex(rgba: &Rgba, format: ColorFormat) -> String {
    match format {
        ColorFormat::Hex => format!(
            "#{:02x}{:02x}{:02x}",
            channel(rgba.r),
            channel(rgba.g),
            channel(rgba.b)
        ),
        ColorFormat::HexAlpha => Color::new(
            unit(rgba.r),
            unit(rgba.g),
            unit(rgba.b),
            unit(rgba.a),
        )
        .to_hex_string(),
    }
}

fn channel(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

fn unit(c: f64) -> f64 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 1.0)
    }
}

#[test]
fn test() {
    let hex = |r, g, b, a| rgba_to_hex(&Rgba::new(r, g, b, a), ColorFormat::Hex);
    assert_eq!(hex(0.0, 0.0, 0.0, 1.0), "#000000");
    assert_eq!(hex(1.0, 1.0, 1.0, 1.0), "#ffffff");
    assert_eq!(hex(1.0, 0.0, 0.0, 0.2), "#ff0000");
    assert_eq!(hex(0.2, 0.4, 0.6, 1.0), "#336699");
    // 0.5 * 255 = 127.5 rounds up
    assert_eq!(hex(0.5, 0.5, 0.5, 1.0), "#808080");
    assert_eq!(hex(0.01, 0.0, 0.0, 1.0), "#030000");
    assert_eq!(hex(1.5, -0.3, 0.0, 1.0), "#ff0000");
}

#[test]
fn test_hex_alpha() {
    let hex = |r, g, b, a| rgba_to_hex(&Rgba::new(r, g, b, a), ColorFormat::HexAlpha);
    assert_eq!(hex(1.0, 1.0, 1.0, 1.0), "#ffffff");
    assert_eq!(hex(0.0, 0.0, 0.0, 0.0), "#00000000");
    assert_eq!(hex(1.0, 0.0, 0.0, 0.2), "#ff000033");
}
