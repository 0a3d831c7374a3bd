const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;
pub(crate) const RADIX: u64 = 36;

/// Lookup table for base-36 parsing; upper-case letters are accepted.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 36 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i; // upper-case letter
        }
        i += 1;
    }
    lut
};

/// Returns `true` if `b` is a lower-case base-36 digit (`[0-9a-z]`).
#[inline]
pub(crate) const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit() || b.is_ascii_lowercase()
}

/// Appends the base-36 rendering of `value` to `out`, without padding.
pub(crate) fn push_encoded(out: &mut String, value: u64) {
    // u64::MAX needs 13 base-36 digits.
    let mut buf = [0_u8; 13];
    let mut pos = buf.len();
    let mut n = value;
    loop {
        pos -= 1;
        buf[pos] = ALPHABET[(n % RADIX) as usize];
        n /= RADIX;
        if n == 0 {
            break;
        }
    }
    out.extend(buf[pos..].iter().map(|&b| char::from(b)));
}

/// Renders `value` in base 36.
pub(crate) fn encode(value: u64) -> String {
    let mut out = String::with_capacity(13);
    push_encoded(&mut out, value);
    out
}

/// Renders `value` in base 36, left-padded with `'0'` to at least `width`
/// characters.
pub(crate) fn encode_padded(value: u64, width: usize) -> String {
    let digits = encode(value);
    if digits.len() >= width {
        return digits;
    }
    let mut out = String::with_capacity(width);
    out.extend(core::iter::repeat_n('0', width - digits.len()));
    out.push_str(&digits);
    out
}

/// Parses a base-36 string (either case).
///
/// Returns `None` for empty input, characters outside the alphabet, or
/// values that overflow a `u64`.
pub(crate) fn parse(encoded: &str) -> Option<u64> {
    if encoded.is_empty() {
        return None;
    }
    encoded.bytes().try_fold(0_u64, |acc, b| {
        let val = LOOKUP[b as usize];
        if val == NO_VALUE {
            return None;
        }
        acc.checked_mul(RADIX)?.checked_add(u64::from(val))
    })
}
