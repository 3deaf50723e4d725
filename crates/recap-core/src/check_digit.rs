//! Sierra mod-11 check digit
//!
//! Sierra record numbers circulate in SCSB with a trailing check character
//! computed from the record's digits. Note that this is not the textbook
//! mod-11 scheme: Sierra skips the final `11 - remainder` step, so the
//! remainder itself is the check value.

/// Compute the Sierra check digit and append it to `id`.
///
/// A leading `.b`, `.c`, or `.i` qualifier pair is ignored for the digit
/// calculation but preserved in the output: the returned string is always
/// the original input with one character appended. Digits are weighted
/// right-to-left starting at 2; any non-digit character weighs 0. The
/// weighted sum mod 11 maps to `x` for 10, otherwise to its decimal digit.
pub fn compute_check_digit(id: &str) -> String {
    let digits = strip_qualifier(id);

    let sum: u32 = digits
        .chars()
        .rev()
        .zip(2u32..)
        .map(|(c, weight)| c.to_digit(10).unwrap_or(0) * weight)
        .sum();

    let check = match sum % 11 {
        10 => 'x',
        r => char::from_digit(r, 10).unwrap_or('0'),
    };

    format!("{id}{check}")
}

/// Strip a leading `.` qualifier immediately followed by a `b`/`c`/`i`
/// type marker, if present. Both characters only count as a qualifier
/// pair together; a bare marker is left alone (and weighs 0 downstream).
fn strip_qualifier(id: &str) -> &str {
    match id.as_bytes() {
        [b'.', b'b' | b'c' | b'i', rest @ ..] => {
            // Safe: we only split off two ASCII bytes
            std::str::from_utf8(rest).unwrap_or(id)
        }
        _ => id,
    }
}
