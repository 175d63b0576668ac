//! camelCase / snake_case conversion
//!
//! Documents use snake_case keys while the wire format uses camelCase. The
//! two functions here are exact inverses over every key either side emits.

/// Convert a camelCase name to snake_case
pub fn camel_to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a snake_case name to camelCase.
///
/// An underscore is consumed only when followed by a lowercase letter, so
/// names like `foo_2` survive a round trip unchanged.
pub fn snake_to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => out.push('_'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
