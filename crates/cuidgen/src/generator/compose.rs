use crate::{Cuid, RandSource, base36, rand::draw_below};

/// Width of the counter block, in base-36 characters.
pub const COUNTER_WIDTH: usize = 4;
/// Number of distinct counter values (`36^4`); the counter wraps here.
pub const COUNTER_MODULUS: u32 = 36_u32.pow(COUNTER_WIDTH as u32);
/// Smallest identifier length a generator accepts.
pub const MIN_LENGTH: usize = 2;
/// Largest identifier length a generator accepts.
pub const MAX_LENGTH: usize = 4096;

/// Advances the rolling counter by one, wrapping at [`COUNTER_MODULUS`].
#[inline]
pub(crate) const fn next_counter(counter: u32) -> u32 {
    (counter + 1) % COUNTER_MODULUS
}

/// Builds one identifier from its components.
///
/// The time, fingerprint and counter blocks are laid down in that order,
/// followed by enough random characters to reach `length`, then interleaved.
/// If the three fixed blocks already reach `length`, no random characters are
/// added and the output is longer than `length`: the blocks are never cut.
pub(crate) fn assemble<R>(millis: u64, fingerprint: &str, counter: u32, length: usize, rng: &R) -> Cuid
where
    R: RandSource + ?Sized,
{
    let time = base36::encode(millis);
    let counter = base36::encode_padded(u64::from(counter), COUNTER_WIDTH);
    let used = time.len() + fingerprint.len() + counter.len();
    let random_len = length.saturating_sub(used);

    // A single draw adds at most `COUNTER_WIDTH` characters before truncation.
    let mut raw = String::with_capacity(used.max(length).saturating_add(COUNTER_WIDTH));
    raw.push_str(&time);
    raw.push_str(fingerprint);
    raw.push_str(&counter);
    push_random_block(&mut raw, random_len, rng);

    Cuid::from_generated(interleave(&raw))
}

/// Appends exactly `len` random base-36 characters to `out`.
///
/// Each draw contributes the unpadded base-36 rendering of a value below
/// [`COUNTER_MODULUS`] (one to four characters); draws repeat until enough
/// characters exist and the surplus is cut off.
fn push_random_block<R: RandSource + ?Sized>(out: &mut String, len: usize, rng: &R) {
    let target = out.len() + len;
    while out.len() < target {
        base36::push_encoded(out, draw_below(rng, u64::from(COUNTER_MODULUS)));
    }
    out.truncate(target);
}

/// Reorders `input` so component boundaries are not visible.
///
/// Characters at even positions fill the output front to back; characters at
/// odd positions fill it back to front.
pub(crate) fn interleave(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = vec![0_u8; bytes.len()];
    let mut front = 0;
    let mut back = bytes.len();
    for (i, &b) in bytes.iter().enumerate() {
        if i % 2 == 0 {
            out[front] = b;
            front += 1;
        } else {
            back -= 1;
            out[back] = b;
        }
    }
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Undoes [`interleave`] by hand. Only tests need this; the crate does not
    /// expose a decoder.
    pub(crate) fn deinterleave(input: &str) -> String {
        let bytes = input.as_bytes();
        let n = bytes.len();
        (0..n)
            .map(|i| {
                let k = i / 2;
                if i % 2 == 0 { bytes[k] } else { bytes[n - 1 - k] }
            })
            .map(char::from)
            .collect()
    }

    struct Fixed(f64);
    impl RandSource for Fixed {
        fn rand(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn interleaves_even_forward_and_odd_backward() {
        // a, c, e take slots 0, 1, 2; b, d, f take slots 5, 4, 3.
        assert_eq!(interleave("abcdef"), "acefdb");
        assert_eq!(interleave("abcde"), "acedb");
        assert_eq!(interleave("ab"), "ab");
        assert_eq!(interleave("a"), "a");
        assert_eq!(interleave(""), "");
    }

    #[test]
    fn deinterleave_restores_the_concatenation() {
        for s in ["abcdef", "abcdefg", "0123456789abcdefghijklmn", "x"] {
            assert_eq!(deinterleave(&interleave(s)), s);
        }
    }

    #[test]
    fn counter_wraps_at_modulus() {
        assert_eq!(COUNTER_MODULUS, 1_679_616);
        assert_eq!(next_counter(0), 1);
        assert_eq!(next_counter(COUNTER_MODULUS - 1), 0);
    }

    #[test]
    fn random_block_has_exact_length() {
        for len in [0, 1, 3, 4, 5, 8, 17] {
            let mut out = String::from("pre");
            push_random_block(&mut out, len, &Fixed(0.5));
            assert_eq!(out.len(), 3 + len);
        }
    }

    #[test]
    fn random_block_repeats_short_draws() {
        // 0.0 draws render as the single character "0".
        let mut out = String::new();
        push_random_block(&mut out, 6, &Fixed(0.0));
        assert_eq!(out, "000000");

        // 0.5 * 36^4 = 839808 = "i000"
        let mut out = String::new();
        push_random_block(&mut out, 6, &Fixed(0.5));
        assert_eq!(out, "i000i0");
    }

    #[test]
    fn assembles_components_in_order() {
        // time "loyw3v28" (8) + fingerprint "ab12" (4) + counter "0001" (4)
        // leaves 8 random characters: "i000i000".
        let id = assemble(1_700_000_000_000, "ab12", 1, 24, &Fixed(0.5));
        assert_eq!(id.len(), 24);
        assert_eq!(deinterleave(id.as_str()), "loyw3v28ab120001i000i000");
    }

    #[test]
    fn assembles_the_largest_accepted_length() {
        let id = assemble(1_700_000_000_000, "ab12", 1, MAX_LENGTH, &Fixed(0.5));
        assert_eq!(id.len(), MAX_LENGTH);
    }

    #[test]
    fn never_truncates_oversized_components() {
        let id = assemble(1_700_000_000_000, "ab12", 1, 2, &Fixed(0.5));
        assert_eq!(id.len(), 16);
        assert_eq!(deinterleave(id.as_str()), "loyw3v28ab120001");
    }
}
