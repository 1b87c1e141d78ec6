//! Endian-safe word loads and branch-light bit tricks shared by the scan,
//! compare and hash modules.
//!
//! Every routine here treats a `u64` as a little vector of eight 8-bit
//! lanes — the "SWAR" (SIMD-within-a-register) technique the rest of the
//! crate builds on. The lane width is pinned to 64 bits everywhere,
//! independent of the host's pointer width: the spec's byte-scan primitives
//! are specified in terms of an 8-byte SWAR word (`load64`), and stepping a
//! scan cursor by anything other than the exact width of that load is what
//! corrupts or panics on a narrower native word size. `find_2byte`/
//! `find_3byte`/`find_4byte` already hard-code this 8-byte granularity; the
//! routines below do the same rather than pretending to adapt to a
//! narrower native `usize`.
pub const WORD_BYTES: usize = 8;

/// Repeat `b` into every lane of a `u64`. If `b` is `0x4e`, the result is
/// `0x4e4e4e4e4e4e4e4e`.
#[inline(always)]
pub const fn splat(b: u8) -> u64 {
    (b as u64) * (u64::MAX / 255)
}

/// Return `true` if `x`, read as a vector of 8-bit lanes, contains any zero
/// lane. From "Matters Computational" by J. Arndt: subtract one from every
/// lane, then look for lanes where the borrow propagated into the high bit.
#[inline(always)]
pub const fn has_zero_byte(x: u64) -> bool {
    const LO: u64 = splat(0x01);
    const HI: u64 = splat(0x80);
    (x.wrapping_sub(LO) & !x & HI) != 0
}

/// Lane index (0 = least significant byte) of the first zero lane in `x`,
/// assuming `has_zero_byte(x)` is true. Ties (multiple zero lanes) resolve
/// to the lowest-addressed one, matching `count_trailing_zeros(mask) / 8`
/// in the source.
#[inline(always)]
pub fn first_zero_lane(x: u64) -> u32 {
    let mask = zero_lane_mask(x);
    mask.trailing_zeros() / 8
}

/// Lane index of the last zero lane in `x`, assuming `has_zero_byte(x)` is
/// true. Used by the reverse scan primitives.
#[inline(always)]
pub fn last_zero_lane(x: u64) -> u32 {
    let mask = zero_lane_mask(x);
    (WORD_BYTES as u32 - 1) - mask.leading_zeros() / 8
}

/// Expand the Arndt zero-byte test into a per-lane mask with a high bit set
/// in every lane that was zero. Not itself branchless to extract a lane
/// *index* from (that needs the byte-at-a-time loop below on targets
/// without a fast parallel-bit-extract), so callers scan the mask's bytes
/// directly instead of trying to turn it into a single `ctz`/`clz` call.
#[inline(always)]
fn zero_lane_mask(x: u64) -> u64 {
    const LO: u64 = splat(0x01);
    const HI: u64 = splat(0x80);
    x.wrapping_sub(LO) & !x & HI
}

const LO64: u64 = 0x0101_0101_0101_0101;
const HI64: u64 = 0x8080_8080_8080_8080;

/// Per-lane equality mask against a fixed `u64` word: lane `i` holds `0x80`
/// if byte `i` of `w` equals `c`, else `0x00`'s high bit is clear. Unlike
/// [`has_zero_byte`] this keeps the full per-lane mask around so callers can
/// shift and AND-fold several of these together (the `find_2byte`/`find_3byte`/
/// `find_4byte` hyper-scalar routines in `scan`).
#[inline(always)]
pub(crate) fn hibit_eq_mask64(w: u64, c: u8) -> u64 {
    let x = w ^ (c as u64).wrapping_mul(LO64);
    x.wrapping_sub(LO64) & !x & HI64
}

/// Unaligned little-endian load of a `u16` from the first 2 bytes of `buf`.
#[inline(always)]
pub fn load16(buf: &[u8]) -> u16 {
    u16::from_le_bytes(buf[..2].try_into().unwrap())
}

/// Unaligned little-endian load of a `u32` from the first 4 bytes of `buf`.
#[inline(always)]
pub fn load32(buf: &[u8]) -> u32 {
    u32::from_le_bytes(buf[..4].try_into().unwrap())
}

/// Unaligned little-endian load of a `u64` from the first 8 bytes of `buf`.
#[inline(always)]
pub fn load64(buf: &[u8]) -> u64 {
    u64::from_le_bytes(buf[..8].try_into().unwrap())
}

/// Unaligned big-endian load of a `u64` from the first 8 bytes of `buf`.
/// Used by `order` so integer comparison of the loaded word agrees with
/// byte-wise lexicographic comparison regardless of host endianness.
#[inline(always)]
pub fn load64_be(buf: &[u8]) -> u64 {
    u64::from_be_bytes(buf[..8].try_into().unwrap())
}

/// Reverse the byte order of `x`. A thin, named wrapper over
/// [`u64::swap_bytes`] kept so callers read as "byte-reverse" rather than
/// a bare intrinsic call, matching the source's explicit `bswap64` helper.
#[inline(always)]
pub const fn bswap64(x: u64) -> u64 {
    x.swap_bytes()
}

/// Count trailing zero bits. Thin wrapper kept for symmetry with
/// [`clz64`]; both lower directly to `tzcnt`/`bsf` on every target Rust
/// supports.
#[inline(always)]
pub const fn ctz64(x: u64) -> u32 {
    x.trailing_zeros()
}

/// Count leading zero bits.
#[inline(always)]
pub const fn clz64(x: u64) -> u32 {
    x.leading_zeros()
}

/// Integer log base 2, rounding down. Undefined for `x == 0` in the source;
/// here it simply returns `0`, the least surprising value for a `const fn`
/// that must return something.
#[inline(always)]
pub const fn ilog2(x: u64) -> u32 {
    if x == 0 { 0 } else { 63 - clz64(x) }
}

/// Branch-free minimum of two values.
#[inline(always)]
pub const fn min2(a: usize, b: usize) -> usize {
    if a < b { a } else { b }
}

/// Branch-free minimum of three values.
#[inline(always)]
pub const fn min3(a: usize, b: usize, c: usize) -> usize {
    min2(min2(a, b), c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splat_repeats_every_lane() {
        let v = splat(0x4e);
        for i in 0..WORD_BYTES {
            assert_eq!((v >> (i * 8)) & 0xff, 0x4e);
        }
    }

    #[test]
    fn zero_byte_detection() {
        assert!(!has_zero_byte(splat(0x41)));
        let mut v = splat(0x41);
        v &= !(0xffu64 << 8);
        assert!(has_zero_byte(v));
        assert_eq!(first_zero_lane(v), 1);
    }

    #[test]
    fn last_lane_picks_highest_zero() {
        let mut v = u64::MAX;
        v &= !(0xffu64 << 8);
        v &= !(0xffu64 << (3 * 8));
        assert!(has_zero_byte(v));
        assert!(last_zero_lane(v) >= first_zero_lane(v));
    }

    #[test]
    fn loads_are_little_endian() {
        assert_eq!(load16(&[0x01, 0x02]), 0x0201);
        assert_eq!(load32(&[0x01, 0x02, 0x03, 0x04]), 0x04030201);
        assert_eq!(
            load64(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
            0x0807060504030201
        );
    }

    #[test]
    fn be_load_matches_bswap_of_le() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(load64_be(&buf), bswap64(load64(&buf)));
    }

    #[test]
    fn ctz_clz_ilog2() {
        assert_eq!(ctz64(0b1000), 3);
        assert_eq!(clz64(1u64 << 5), 58);
        assert_eq!(ilog2(1), 0);
        assert_eq!(ilog2(1024), 10);
        assert_eq!(ilog2(0), 0);
    }

    #[test]
    fn min_helpers() {
        assert_eq!(min2(3, 5), 3);
        assert_eq!(min3(5, 2, 9), 2);
        assert_eq!(min3(1, 1, 1), 1);
    }
}
