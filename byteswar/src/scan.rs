//! Byte-scan primitives: single-byte and short fixed-width SWAR search,
//! Bitap (Shift-Or) bit-parallel search for longer needles, and the
//! `strspn`/`strcspn`-equivalent span helpers.
//!
//! [`find`] is the entry point most callers want; it dispatches to the
//! cheapest strategy for the needle's length (see the dispatch table in
//! SPEC_FULL.md §4.1). The narrower functions are exposed directly for
//! callers that already know their needle's shape and want to skip the
//! dispatch branch.

use crate::compare::equal;
use crate::word::{first_zero_lane, has_zero_byte, hibit_eq_mask64, last_zero_lane, load64, splat, WORD_BYTES};

/// Find the first occurrence of `needle` in `haystack`.
pub fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    let pattern = splat(needle);
    let n = haystack.len();
    let mut i = 0;
    while i + WORD_BYTES <= n {
        let w = load64(&haystack[i..]) ^ pattern;
        if has_zero_byte(w) {
            return Some(i + first_zero_lane(w) as usize);
        }
        i += WORD_BYTES;
    }
    while i < n {
        if haystack[i] == needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Find the last occurrence of `needle` in `haystack`.
pub fn rfind_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    let pattern = splat(needle);
    let n = haystack.len();
    let mut end = n;
    while end >= WORD_BYTES {
        let start = end - WORD_BYTES;
        let w = load64(&haystack[start..]) ^ pattern;
        if has_zero_byte(w) {
            return Some(start + last_zero_lane(w) as usize);
        }
        end = start;
    }
    while end > 0 {
        end -= 1;
        if haystack[end] == needle {
            return Some(end);
        }
    }
    None
}

/// Find the first occurrence of a fixed 2-byte needle.
pub fn find_2byte(haystack: &[u8], needle: [u8; 2]) -> Option<usize> {
    let n = haystack.len();
    let mut i = 0;
    while i + 8 <= n {
        let w = load64(&haystack[i..]);
        let m0 = hibit_eq_mask64(w, needle[0]);
        let m1 = hibit_eq_mask64(w, needle[1]) >> 8;
        let cand = m0 & m1;
        if cand != 0 {
            return Some(i + (cand.trailing_zeros() / 8) as usize);
        }
        i += 7;
    }
    find_needle_tail(haystack, &needle, i)
}

/// Find the first occurrence of a fixed 3-byte needle.
pub fn find_3byte(haystack: &[u8], needle: [u8; 3]) -> Option<usize> {
    let n = haystack.len();
    let mut i = 0;
    while i + 8 <= n {
        let w = load64(&haystack[i..]);
        let m0 = hibit_eq_mask64(w, needle[0]);
        let m1 = hibit_eq_mask64(w, needle[1]) >> 8;
        let m2 = hibit_eq_mask64(w, needle[2]) >> 16;
        let cand = m0 & m1 & m2;
        if cand != 0 {
            return Some(i + (cand.trailing_zeros() / 8) as usize);
        }
        i += 6;
    }
    find_needle_tail(haystack, &needle, i)
}

/// Find the first occurrence of a fixed 4-byte needle.
pub fn find_4byte(haystack: &[u8], needle: [u8; 4]) -> Option<usize> {
    let n = haystack.len();
    let mut i = 0;
    while i + 8 <= n {
        let w = load64(&haystack[i..]);
        let m0 = hibit_eq_mask64(w, needle[0]);
        let m1 = hibit_eq_mask64(w, needle[1]) >> 8;
        let m2 = hibit_eq_mask64(w, needle[2]) >> 16;
        let m3 = hibit_eq_mask64(w, needle[3]) >> 24;
        let cand = m0 & m1 & m2 & m3;
        if cand != 0 {
            return Some(i + (cand.trailing_zeros() / 8) as usize);
        }
        i += 4;
    }
    find_needle_tail(haystack, &needle, i)
}

/// Byte-at-a-time tail fallback shared by `find_2byte`/`find_3byte`/`find_4byte`
/// once fewer than a full word remains.
fn find_needle_tail(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    let m = needle.len();
    let n = haystack.len();
    let mut i = start;
    while i + m <= n {
        if equal(&haystack[i..i + m], needle) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Build the 8-bit Bitap `pattern_mask` table for a needle of up to 8 bytes.
pub fn bitap_mask8(needle: &[u8]) -> [u8; 256] {
    let mut mask = [!0u8; 256];
    for (i, &b) in needle.iter().enumerate() {
        mask[b as usize] &= !(1u8 << i);
    }
    mask
}

/// Build the 16-bit Bitap `pattern_mask` table for a needle of up to 16 bytes.
pub fn bitap_mask16(needle: &[u8]) -> [u16; 256] {
    let mut mask = [!0u16; 256];
    for (i, &b) in needle.iter().enumerate() {
        mask[b as usize] &= !(1u16 << i);
    }
    mask
}

/// Build the 64-bit Bitap `pattern_mask` table for a needle of up to 64 bytes.
///
/// Shared by the runtime `find_under_k` path and (independently reconstructed
/// at compile time) by the `FixedPattern` derive macro.
pub fn bitap_mask64(needle: &[u8]) -> [u64; 256] {
    let mut mask = [!0u64; 256];
    for (i, &b) in needle.iter().enumerate() {
        mask[b as usize] &= !(1u64 << i);
    }
    mask
}

fn bitap_scan8(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let m = needle.len();
    let mask = bitap_mask8(needle);
    bitap_run8(haystack, &mask, m)
}

fn bitap_run8(haystack: &[u8], mask: &[u8; 256], m: usize) -> Option<usize> {
    let top_bit = 1u8 << (m - 1);
    let mut state: u8 = !0;
    for (i, &b) in haystack.iter().enumerate() {
        state = (state << 1) | mask[b as usize];
        if state & top_bit == 0 {
            return Some(i + 1 - m);
        }
    }
    None
}

fn bitap_scan16(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let m = needle.len();
    let mask = bitap_mask16(needle);
    bitap_run16(haystack, &mask, m)
}

fn bitap_run16(haystack: &[u8], mask: &[u16; 256], m: usize) -> Option<usize> {
    let top_bit = 1u16 << (m - 1);
    let mut state: u16 = !0;
    for (i, &b) in haystack.iter().enumerate() {
        state = (state << 1) | mask[b as usize];
        if state & top_bit == 0 {
            return Some(i + 1 - m);
        }
    }
    None
}

fn bitap_scan64(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let m = needle.len();
    let mask = bitap_mask64(needle);
    bitap_run64(haystack, &mask, m)
}

/// Run the 64-bit Bitap state machine against a precomputed mask table.
/// Exposed so [`FixedPattern`] implementations (built by the derive macro
/// around a compile-time mask) share this scan loop with the runtime path.
pub fn bitap_run64(haystack: &[u8], mask: &[u64; 256], m: usize) -> Option<usize> {
    let top_bit = 1u64 << (m - 1);
    let mut state: u64 = !0;
    for (i, &b) in haystack.iter().enumerate() {
        state = (state << 1) | mask[b as usize];
        if state & top_bit == 0 {
            return Some(i + 1 - m);
        }
    }
    None
}

/// Dispatch among the three Bitap state-word widths for a needle of
/// `1..=64` bytes.
pub fn find_under_k(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    match needle.len() {
        0 => None,
        1..=8 => bitap_scan8(haystack, needle),
        9..=16 => bitap_scan16(haystack, needle),
        17..=64 => bitap_scan64(haystack, needle),
        _ => None,
    }
}

/// Needles longer than 64 bytes: Bitap-64 locates candidates for the first
/// 64 bytes of the needle, then the remaining suffix is verified byte-wise.
/// On a failed verification the search resumes immediately after the failed
/// candidate rather than at an offset derived from the Bitap match position
/// (see SPEC_FULL.md's Design Notes on why — it trades a little throughput
/// for never skipping over a byte that could start a valid match).
fn find_long(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let prefix = &needle[..64];
    let mask = bitap_mask64(prefix);
    let mut search_from = 0usize;
    while search_from + needle.len() <= haystack.len() {
        match bitap_run64(&haystack[search_from..], &mask, 64) {
            Some(rel) => {
                let candidate = search_from + rel;
                if candidate + needle.len() <= haystack.len()
                    && equal(&haystack[candidate + 64..candidate + needle.len()], &needle[64..])
                {
                    return Some(candidate);
                }
                search_from = candidate + 1;
            }
            None => return None,
        }
    }
    None
}

/// Find the first occurrence of `needle` in `haystack`, dispatching to the
/// cheapest strategy for the needle's length.
///
/// | needle length | strategy |
/// |---|---|
/// | 0 | `None` |
/// | 1 | [`find_byte`] |
/// | 2 | [`find_2byte`] |
/// | 3 | [`find_3byte`] |
/// | 4 | [`find_4byte`] |
/// | 5..=64 | [`find_under_k`] (Bitap-8/16/64) |
/// | \>64 | Bitap-64 prefix match, byte-wise suffix verify |
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    match needle.len() {
        0 => None,
        1 => find_byte(haystack, needle[0]),
        2 => find_2byte(haystack, [needle[0], needle[1]]),
        3 => find_3byte(haystack, [needle[0], needle[1], needle[2]]),
        4 => find_4byte(haystack, [needle[0], needle[1], needle[2], needle[3]]),
        5..=64 => find_under_k(haystack, needle),
        _ => find_long(haystack, needle),
    }
}

/// Trait implemented by `#[derive(FixedPattern)]`: a compile-time-known
/// needle with its Bitap mask table baked into a `const`, so matching skips
/// the per-call table-build step entirely.
pub trait FixedPattern {
    /// The literal needle bytes given to `#[pattern(bytes = "...")]`.
    const PATTERN: &'static [u8];
    /// Precomputed 64-bit Bitap `pattern_mask` table for [`Self::PATTERN`].
    const PATTERN_MASK: [u64; 256];

    /// Find the first occurrence of [`Self::PATTERN`] in `haystack`.
    fn find(haystack: &[u8]) -> Option<usize> {
        bitap_run64(haystack, &Self::PATTERN_MASK, Self::PATTERN.len())
    }

    /// Alias for [`Self::find`], matching the naming the teacher macro used.
    fn find_first(haystack: &[u8]) -> Option<usize> {
        Self::find(haystack)
    }
}

/// `strspn`-equivalent: count the leading bytes of `haystack` that belong to
/// `accept`.
pub fn span_accepted(haystack: &[u8], accept: &[u8]) -> usize {
    let mut table = [false; 256];
    for &b in accept {
        table[b as usize] = true;
    }
    haystack.iter().take_while(|&&b| table[b as usize]).count()
}

/// `strcspn`-equivalent: count the leading bytes of `haystack` that do *not*
/// belong to `reject`.
pub fn span_rejected(haystack: &[u8], reject: &[u8]) -> usize {
    let mut table = [false; 256];
    for &b in reject {
        table[b as usize] = true;
    }
    haystack.iter().take_while(|&&b| !table[b as usize]).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_byte_basic() {
        assert_eq!(find_byte(b"hello world", b'w'), Some(6));
        assert_eq!(find_byte(b"hello world", b'z'), None);
        assert_eq!(find_byte(b"", b'a'), None);
        assert_eq!(find_byte(b"aaaaaaaaaaaaaaaaaab", b'b'), Some(18));
    }

    #[test]
    fn rfind_byte_basic() {
        assert_eq!(rfind_byte(b"abcabcabc", b'a'), Some(6));
        assert_eq!(rfind_byte(b"abcabcabc", b'z'), None);
        assert_eq!(rfind_byte(b"x", b'x'), Some(0));
    }

    #[test]
    fn find_byte_every_offset_in_long_haystack() {
        let mut hay = vec![b'.'; 40];
        for pos in 0..hay.len() {
            hay[pos] = b'!';
            assert_eq!(find_byte(&hay, b'!'), Some(pos));
            hay[pos] = b'.';
        }
    }

    #[test]
    fn find_2byte_crosses_word_boundary() {
        let hay = b"aaaaaaaaaaaaaaaaaaXYaaaa";
        assert_eq!(find_2byte(hay, *b"XY"), Some(18));
        assert_eq!(find_2byte(b"no match here", *b"zz"), None);
    }

    #[test]
    fn find_3byte_and_4byte() {
        assert_eq!(find_3byte(b"the quick cat sat", *b"cat"), Some(10));
        assert_eq!(find_4byte(b"the quick overcast sky", *b"over"), Some(10));
        assert_eq!(find_4byte(b"short", *b"nope"), None);
    }

    #[test]
    fn scenario_find_cad_in_abracadabra() {
        assert_eq!(find(b"abracadabra", b"cad"), Some(4));
    }

    #[test]
    fn scenario_find_aab_overlap() {
        assert_eq!(find(b"aaaaaab", b"aab"), Some(4));
    }

    #[test]
    fn scenario_haystack_shorter_than_needle() {
        assert_eq!(find(b"x", b"yy"), None);
    }

    #[test]
    fn find_dispatches_across_every_length_bucket() {
        let needle_lens = [1usize, 2, 3, 4, 6, 12, 40, 90];
        for &len in &needle_lens {
            let mut hay = vec![b'.'; len + 50];
            let needle: Vec<u8> = (0..len).map(|i| (b'A' + (i % 26) as u8)).collect();
            hay[20..20 + len].copy_from_slice(&needle);
            assert_eq!(find(&hay, &needle), Some(20), "needle length {len}");
        }
    }

    #[test]
    fn find_long_needle_resumes_after_failed_verification() {
        // Two 70-byte runs share an identical 64-byte Bitap prefix but
        // differ in the tail; only the second occurrence is a real match.
        let mut needle = vec![b'x'; 70];
        needle[65] = b'Q';
        let mut hay = vec![b'x'; 64];
        hay.extend(std::iter::repeat(b'x').take(70));
        hay[64 + 65] = b'Z'; // first candidate's tail mismatches
        hay.extend(std::iter::repeat(b'x').take(70));
        hay[64 + 70 + 65] = b'Q'; // second candidate matches
        assert_eq!(find(&hay, &needle), Some(64 + 70));
    }

    #[test]
    fn span_accepted_counts_leading_run() {
        assert_eq!(span_accepted(b"aaabbbccc", b"ab"), 6);
        assert_eq!(span_accepted(b"zzz", b"ab"), 0);
        assert_eq!(span_accepted(b"", b"ab"), 0);
    }

    #[test]
    fn span_rejected_counts_leading_complement_run() {
        assert_eq!(span_rejected(b"aaabbbccc", b"c"), 6);
        assert_eq!(span_rejected(b"ccc", b"c"), 0);
    }

    struct NeedleCad;
    impl FixedPattern for NeedleCad {
        const PATTERN: &'static [u8] = b"cad";
        const PATTERN_MASK: [u64; 256] = {
            let mut mask = [!0u64; 256];
            let pattern = Self::PATTERN;
            let mut i = 0;
            while i < pattern.len() {
                mask[pattern[i] as usize] &= !(1u64 << i);
                i += 1;
            }
            mask
        };
    }

    #[test]
    fn fixed_pattern_matches_runtime_find() {
        assert_eq!(NeedleCad::find(b"abracadabra"), find(b"abracadabra", b"cad"));
        assert_eq!(NeedleCad::find_first(b"no match"), None);
    }
}
