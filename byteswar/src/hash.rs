//! A MurmurHash3-x64-128-derived 64-bit hash tuned for short strings.
//!
//! This is *not* a conforming Murmur3-x64-128 implementation: the final
//! avalanche mix and the `h1 += h2; h2 += h1` finalization step of the
//! textbook algorithm are deliberately omitted, and the two 64-bit lanes
//! are summed rather than concatenated into a 128-bit result. Do not
//! compare this hash against an off-the-shelf Murmur3 implementation and
//! expect agreement past the block-mixing stage. It exists to be fast and
//! internally consistent, not to be interoperable.

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// Hash an arbitrary byte buffer to a 64-bit digest.
///
/// Deterministic: identical input bytes produce identical output on every
/// platform and regardless of the input buffer's alignment.
pub fn hash(buf: &[u8]) -> u64 {
    let n = buf.len() as u64;
    let mut h1 = n;
    let mut h2 = n;

    let nblocks = buf.len() / 16;
    for i in 0..nblocks {
        let block = &buf[i * 16..i * 16 + 16];
        let mut k1 = u64::from_le_bytes(block[0..8].try_into().unwrap());
        let mut k2 = u64::from_le_bytes(block[8..16].try_into().unwrap());

        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;
        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    let tail = &buf[nblocks * 16..];
    let mut k1: u64 = 0;
    let mut k2: u64 = 0;

    // Accumulate up to 7 bytes into k2 (the high half of the tail) and up
    // to 7 more into k1, mirroring the source's fall-through switch.
    for (idx, &byte) in tail.iter().enumerate().rev() {
        if idx >= 8 {
            k2 ^= (byte as u64) << ((idx - 8) * 8);
        } else {
            k1 ^= (byte as u64) << (idx * 8);
        }
    }

    if tail.len() > 8 {
        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;
    }
    if !tail.is_empty() {
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    h1.wrapping_add(h2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_stable() {
        assert_eq!(hash(b"abc"), hash(b"abc"));
        let h_empty = hash(b"");
        assert_eq!(h_empty, hash(b""));
    }

    #[test]
    fn alignment_independent() {
        // Hashing the same bytes out of buffers with different base
        // alignment must agree: pad the front with unrelated bytes and
        // hash the same logical slice out of each.
        let mut padded = vec![0xffu8; 3];
        padded.extend_from_slice(b"the quick brown fox jumps over");
        let direct = b"the quick brown fox jumps over";
        assert_eq!(hash(&padded[3..]), hash(direct));
    }

    #[test]
    fn distinguishes_most_inputs() {
        let mut seen = std::collections::HashSet::new();
        for i in 0u32..2000 {
            seen.insert(hash(&i.to_le_bytes()));
        }
        assert!(seen.len() > 1990, "too many collisions: {}", seen.len());
    }

    #[test]
    fn handles_every_tail_length() {
        let base = b"0123456789abcdefXYZ";
        for n in 0..base.len() {
            let _ = hash(&base[..n]);
        }
    }

    #[test]
    fn multi_block_input() {
        let data: Vec<u8> = (0..200u32).map(|i| i as u8).collect();
        assert_eq!(hash(&data), hash(&data));
    }
}
