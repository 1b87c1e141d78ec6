//! Hybrid radix + introspective sort, introselect-based partial sort, and
//! the shared introsort engine both delegate to.
//!
//! There is exactly one introsort implementation in the crate
//! ([`introsort_generic`]); [`sort`]'s per-bucket comparison phase,
//! [`sort_partial`]'s final ordering pass, and the public [`sort_intro`]
//! entry point all route through it.

use core::cmp::Ordering;

use super::ByteSeq;
use crate::compare::order as byte_order;
use crate::word::ilog2;

const INSERTION_CUTOFF: usize = 16;

/// Extracts the logical index to look up from a raw `order[]` slot. During
/// the radix phase of [`sort`] a slot temporarily carries a packed
/// `(prefix << 32) | index` value; everywhere else a slot already *is* the
/// plain logical index.
type IdxOf = fn(u64) -> usize;

fn idx_plain(v: u64) -> usize {
    v as usize
}

fn idx_masked(v: u64) -> usize {
    (v & 0xffff_ffff) as usize
}

fn lex_less(a: &[u8], b: &[u8]) -> bool {
    byte_order(a, b) == Ordering::Less
}

/// Unstable Lomuto-style partition: reorders `order` so every element for
/// which `pred` holds precedes every element for which it doesn't, and
/// returns the boundary index.
pub fn partition<S: ByteSeq + ?Sized>(seq: &S, order: &mut [u64], mut pred: impl FnMut(&[u8]) -> bool) -> usize {
    let mut boundary = 0;
    for i in 0..order.len() {
        if pred(seq.str_at(order[i] as usize)) {
            order.swap(i, boundary);
            boundary += 1;
        }
    }
    boundary
}

/// In-place merge of two adjacent sorted runs `order[0..mid)` and
/// `order[mid..]` into one sorted run, under `less`. Copies out whichever
/// run is shorter rather than demanding caller-supplied scratch space.
pub fn merge<S: ByteSeq + ?Sized>(seq: &S, order: &mut [u64], mid: usize, mut less: impl FnMut(&[u8], &[u8]) -> bool) {
    let n = order.len();
    if mid == 0 || mid >= n {
        return;
    }
    let left_len = mid;
    let right_len = n - mid;

    if left_len <= right_len {
        let left_copy: Vec<u64> = order[..mid].to_vec();
        let (mut i, mut j, mut k) = (0usize, mid, 0usize);
        while i < left_copy.len() && j < n {
            let a = seq.str_at(left_copy[i] as usize);
            let b = seq.str_at(order[j] as usize);
            if less(b, a) {
                order[k] = order[j];
                j += 1;
            } else {
                order[k] = left_copy[i];
                i += 1;
            }
            k += 1;
        }
        while i < left_copy.len() {
            order[k] = left_copy[i];
            i += 1;
            k += 1;
        }
    } else {
        let right_copy: Vec<u64> = order[mid..].to_vec();
        let mut i = mid as isize - 1;
        let mut j = right_copy.len() as isize - 1;
        let mut k = n as isize - 1;
        while i >= 0 && j >= 0 {
            let a = seq.str_at(order[i as usize] as usize);
            let b = seq.str_at(right_copy[j as usize] as usize);
            if less(b, a) {
                order[k as usize] = order[i as usize];
                i -= 1;
            } else {
                order[k as usize] = right_copy[j as usize];
                j -= 1;
            }
            k -= 1;
        }
        while j >= 0 {
            order[k as usize] = right_copy[j as usize];
            j -= 1;
            k -= 1;
        }
    }
}

/// Sort `order` with an arbitrary comparator via the shared introsort
/// engine: quicksort with median-of-three pivoting, an insertion-sort
/// cutoff for small ranges, and a heapsort fallback once recursion depth
/// exceeds `2 * log2(count)`.
pub fn sort_intro<S: ByteSeq + ?Sized>(seq: &S, order: &mut [u64], mut less: impl FnMut(&[u8], &[u8]) -> bool) {
    let depth_limit = 2 * ilog2(order.len() as u64);
    introsort_generic(seq, order, depth_limit, idx_plain, &mut less);
}

fn introsort_generic<S: ByteSeq + ?Sized>(
    seq: &S,
    order: &mut [u64],
    depth_limit: u32,
    idx_of: IdxOf,
    less: &mut dyn FnMut(&[u8], &[u8]) -> bool,
) {
    let n = order.len();
    if n <= 1 {
        return;
    }
    if n <= INSERTION_CUTOFF {
        insertion_sort(seq, order, idx_of, less);
        return;
    }
    if depth_limit == 0 {
        heap_sort(seq, order, idx_of, less);
        return;
    }

    let pivot_idx = median_of_three(seq, order, idx_of, less);
    order.swap(pivot_idx, n - 1);
    let mut store = 0;
    for i in 0..n - 1 {
        if less(seq.str_at(idx_of(order[i])), seq.str_at(idx_of(order[n - 1]))) {
            order.swap(i, store);
            store += 1;
        }
    }
    order.swap(store, n - 1);

    let (left, rest) = order.split_at_mut(store);
    let right = &mut rest[1..];
    introsort_generic(seq, left, depth_limit - 1, idx_of, less);
    introsort_generic(seq, right, depth_limit - 1, idx_of, less);
}

fn median_of_three<S: ByteSeq + ?Sized>(
    seq: &S,
    order: &[u64],
    idx_of: IdxOf,
    less: &mut dyn FnMut(&[u8], &[u8]) -> bool,
) -> usize {
    let n = order.len();
    let (a, b, c) = (0, n / 2, n - 1);
    let sa = seq.str_at(idx_of(order[a]));
    let sb = seq.str_at(idx_of(order[b]));
    let sc = seq.str_at(idx_of(order[c]));
    if less(sa, sb) {
        if less(sb, sc) {
            b
        } else if less(sa, sc) {
            c
        } else {
            a
        }
    } else if less(sa, sc) {
        a
    } else if less(sb, sc) {
        c
    } else {
        b
    }
}

fn insertion_sort<S: ByteSeq + ?Sized>(
    seq: &S,
    order: &mut [u64],
    idx_of: IdxOf,
    less: &mut dyn FnMut(&[u8], &[u8]) -> bool,
) {
    for i in 1..order.len() {
        let mut j = i;
        while j > 0 && less(seq.str_at(idx_of(order[j])), seq.str_at(idx_of(order[j - 1]))) {
            order.swap(j, j - 1);
            j -= 1;
        }
    }
}

fn heap_sort<S: ByteSeq + ?Sized>(
    seq: &S,
    order: &mut [u64],
    idx_of: IdxOf,
    less: &mut dyn FnMut(&[u8], &[u8]) -> bool,
) {
    let n = order.len();
    for start in (0..n / 2).rev() {
        sift_down(seq, order, start, n, idx_of, less);
    }
    for end in (1..n).rev() {
        order.swap(0, end);
        sift_down(seq, order, 0, end, idx_of, less);
    }
}

fn sift_down<S: ByteSeq + ?Sized>(
    seq: &S,
    order: &mut [u64],
    start: usize,
    end: usize,
    idx_of: IdxOf,
    less: &mut dyn FnMut(&[u8], &[u8]) -> bool,
) {
    let mut root = start;
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && less(seq.str_at(idx_of(order[child])), seq.str_at(idx_of(order[child + 1]))) {
            child += 1;
        }
        if less(seq.str_at(idx_of(order[root])), seq.str_at(idx_of(order[child]))) {
            order.swap(root, child);
            root = child;
        } else {
            break;
        }
    }
}

/// Hybrid radix + comparison sort, the default full sort.
///
/// Packs a 4-byte big-endian prefix of each string into the high 32 bits of
/// its `order` slot (low 32 bits keep the logical index), runs an MSD
/// 256-way bucket pass over those 4 prefix bytes, and falls back to the
/// shared introsort engine — comparing full strings, which agree with a
/// suffix-from-offset-4 comparison once the prefix is known equal — inside
/// every bucket that still holds more than one element once the prefix is
/// exhausted.
pub fn sort<S: ByteSeq + ?Sized>(seq: &S, order: &mut [u64]) {
    for slot in order.iter_mut() {
        let prefix = prefix_key(seq.str_at(*slot as usize));
        *slot = ((prefix as u64) << 32) | *slot;
    }
    radix_msd(seq, order, 0);
    for slot in order.iter_mut() {
        *slot &= 0xffff_ffff;
    }
}

fn prefix_key(s: &[u8]) -> u32 {
    let mut bytes = [0u8; 4];
    let n = s.len().min(4);
    bytes[..n].copy_from_slice(&s[..n]);
    u32::from_be_bytes(bytes)
}

fn radix_msd<S: ByteSeq + ?Sized>(seq: &S, order: &mut [u64], byte_index: usize) {
    let n = order.len();
    if n <= 1 {
        return;
    }
    if byte_index >= 4 {
        let mut less = lex_less;
        introsort_generic(seq, order, 2 * ilog2(n as u64), idx_masked, &mut less);
        return;
    }

    let shift = 32 + (3 - byte_index) * 8;
    let mut counts = [0usize; 257];
    for &v in order.iter() {
        let b = ((v >> shift) & 0xff) as usize;
        counts[b + 1] += 1;
    }
    for i in 0..256 {
        counts[i + 1] += counts[i];
    }

    let mut buckets = order.to_vec();
    let mut cursor = counts;
    for &v in order.iter() {
        let b = ((v >> shift) & 0xff) as usize;
        buckets[cursor[b]] = v;
        cursor[b] += 1;
    }
    order.copy_from_slice(&buckets);

    for b in 0..256 {
        let start = counts[b];
        let end = counts[b + 1];
        if end - start > 1 {
            radix_msd(seq, &mut order[start..end], byte_index + 1);
        }
    }
}

/// Order only the first `n` elements correctly: an introselect pass
/// (median-of-three quickselect with a heapsort worst-case fallback)
/// partitions around the `n`-th order statistic, then the shared introsort
/// engine finishes ordering just `order[0..n)`.
pub fn sort_partial<S: ByteSeq + ?Sized>(seq: &S, order: &mut [u64], n: usize) {
    let total = order.len();
    let n = n.min(total);
    if n == 0 || total <= 1 {
        return;
    }
    let mut select_less = lex_less;
    introselect(seq, order, n, &mut select_less);
    sort_intro(seq, &mut order[..n], lex_less);
}

fn introselect<S: ByteSeq + ?Sized>(
    seq: &S,
    order: &mut [u64],
    target_len: usize,
    less: &mut dyn FnMut(&[u8], &[u8]) -> bool,
) {
    let mut depth_limit = 2 * ilog2(order.len() as u64);
    let mut slice = order;
    let mut target = target_len;

    loop {
        let len = slice.len();
        if len <= 1 || target == 0 || target >= len {
            return;
        }
        if depth_limit == 0 {
            heap_sort(seq, slice, idx_plain, less);
            return;
        }
        depth_limit -= 1;

        let pivot_idx = median_of_three(seq, slice, idx_plain, less);
        let last = len - 1;
        slice.swap(pivot_idx, last);
        let mut store = 0;
        for i in 0..last {
            if less(seq.str_at(slice[i] as usize), seq.str_at(slice[last] as usize)) {
                slice.swap(i, store);
                store += 1;
            }
        }
        slice.swap(store, last);

        match target.cmp(&store) {
            Ordering::Equal => return,
            Ordering::Less => slice = &mut slice[..store],
            Ordering::Greater => {
                target -= store + 1;
                slice = &mut slice[store + 1..];
            }
        }
    }
}
