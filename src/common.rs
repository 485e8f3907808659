/// Parses an unsigned integer literal with radix auto-detection (`0x`, `0o`,
/// `0b`, else decimal).
pub fn parse_radix_int(s: &str) -> Option<u32> {
    let (radix, digits) = if let Some(hex) = strip_prefix_ci(s, "0x") {
        (16, hex)
    } else if let Some(oct) = strip_prefix_ci(s, "0o") {
        (8, oct)
    } else if let Some(bin) = strip_prefix_ci(s, "0b") {
        (2, bin)
    } else {
        (10, s)
    };

    u32::from_str_radix(digits, radix).ok()
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)
        .or_else(|| s.strip_prefix(&prefix.to_uppercase()))
}
