// benches/find.rs
//
// Benchmarks `find` against naive (windows().position()), memchr, and
// aho-corasick across the needle-length table the dispatcher chooses
// strategies by: |needle| in {1, 2, 3, 4, 8, 16, 64, 128}.
//
// The haystack is 16 * 1024 = 16 384 pseudo-random bytes built once per
// needle length, with a real occurrence of the needle planted every 256
// bytes so the benchmark never short-circuits on the first comparison.

use byteswar::scan::find;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use memchr::memchr;

const HAYSTACK_LEN: usize = 16 * 1024;

fn build_haystack(needle: &[u8]) -> Vec<u8> {
    let mut state: u64 = 0xdeadbeef_cafebabe;
    let mut buf = vec![0u8; HAYSTACK_LEN];
    for b in buf.iter_mut() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        *b = state as u8;
    }
    for i in (255..HAYSTACK_LEN).step_by(256) {
        let end = (i + needle.len()).min(HAYSTACK_LEN);
        buf[i..end].copy_from_slice(&needle[..end - i]);
    }
    buf
}

#[inline(never)]
fn naive_search(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// memchr only finds single bytes; verify the remainder by hand so longer
/// needles still get a fair comparison point.
#[inline(never)]
fn memchr_search(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let mut start = 0;
    while let Some(rel) = memchr(needle[0], &haystack[start..]) {
        let pos = start + rel;
        if haystack.len() - pos >= needle.len() && &haystack[pos..pos + needle.len()] == needle {
            return Some(pos);
        }
        start = pos + 1;
    }
    None
}

fn bench_group(c: &mut Criterion, label: &str, needle: &'static [u8]) {
    let haystack = build_haystack(needle);
    let aho_searcher = aho_corasick::AhoCorasick::new([needle]).unwrap();

    let mut group = c.benchmark_group(format!("needle_{label}"));
    group.throughput(Throughput::Bytes(haystack.len() as u64));
    group.sample_size(200);

    group.bench_with_input(BenchmarkId::new("byteswar", label), &haystack, |b, hay| {
        b.iter(|| black_box(find(black_box(hay), needle)))
    });

    group.bench_with_input(BenchmarkId::new("naive", label), &haystack, |b, hay| {
        b.iter(|| black_box(naive_search(black_box(hay), needle)))
    });

    group.bench_with_input(BenchmarkId::new("memchr", label), &haystack, |b, hay| {
        b.iter(|| black_box(memchr_search(black_box(hay), needle)))
    });

    group.bench_with_input(BenchmarkId::new("aho", label), &haystack, |b, hay| {
        b.iter(|| black_box(aho_searcher.find(black_box(hay))))
    });

    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_group(c, "n1", b"!");
    bench_group(c, "n2", b"!@");
    bench_group(c, "n3", b"!@#");
    bench_group(c, "n4", b"!@#$");
    bench_group(c, "n8", b"!@#$%^&*");
    bench_group(c, "n16", b"0123456789abcdef");
    bench_group(c, "n64", &[b'x'; 64]);
    bench_group(c, "n128", &[b'y'; 128]);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
