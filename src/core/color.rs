// `#rrggbb` markup colors and their CSS rendering.

/// `#rrggbb` to RGBA in 0..1. Anything else, including non-ASCII input of
/// the right byte length, is rejected.
pub fn parse_hex_color(value: &str) -> Option<[f32; 4]> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let c = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([c(0)?, c(2)?, c(4)?, 1.0])
}

pub fn css_rgba(c: [f32; 4]) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        channel(c[0]),
        channel(c[1]),
        channel(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}
