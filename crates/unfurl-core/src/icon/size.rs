//! Declared icon size (`sizes="WxH"`) comparison.

/// Width component of a `sizes` value, used to rank icons.
///
/// Takes the text before the first `x`. Missing, malformed, or `any` sizes
/// rank as 0. For multi-size values (`"16x16 32x32"`) only the first width counts.
/// Widths are plain non-negative integers: signed, fractional and exponent
/// forms (`-5x5`, `1.5x1`, `1e2x1`) also rank as 0.
pub fn declared_width(sizes: Option<&str>) -> u64 {
    let Some(sizes) = sizes else {
        return 0;
    };
    match sizes.split_once('x') {
        Some((width, _)) => width.trim().parse().unwrap_or(0),
        None => 0,
    }
}
