//! # byteswar
//!
//! Byte-string processing primitives built on SWAR (SIMD-within-a-register)
//! and bit-parallel techniques: scanning, lexicographic comparison,
//! similarity hashing, bounded edit distance, alignment scoring, and a
//! permutation-based sort/merge engine over externally-owned strings.
//!
//! Every hot path here — [`scan`], [`compare`], [`hash`], [`edit`] — takes
//! borrowed `&[u8]` input and allocates nothing. The [`seq`] sorting engine
//! is the one place this crate allocates on its own, for its radix buckets;
//! everywhere else, sizing functions tell the caller exactly how much
//! scratch space to bring.
//!
//! ## Dispatch
//!
//! This crate ships exactly one backend: the portable serial/SWAR
//! implementation below. A vendor-specific SIMD backend (AVX2, AVX-512,
//! NEON) could be dropped in beside it provided it is observably identical
//! on every input and differs only in throughput — same signatures, same
//! results, just faster. No such backend is included here. The SWAR lane
//! width is pinned to 64 bits everywhere rather than adapting to the host's
//! pointer width: the scan/compare primitives step their cursors by exactly
//! the width of the `u64` loads they issue, so there is no
//! target-conditional lane-width logic for a dispatcher to select between.
//!
//! ## Usage
//!
//! ```
//! use byteswar::scan::find;
//! use byteswar::compare::order;
//!
//! assert_eq!(find(b"abracadabra", b"cad"), Some(4));
//! assert_eq!(order(b"apple", b"apply"), std::cmp::Ordering::Less);
//! ```
//!
//! A compile-time-known needle can skip the per-call Bitap table build:
//!
//! ```
//! use byteswar::FixedPattern;
//!
//! #[derive(FixedPattern)]
//! #[pattern(bytes = "cad")]
//! struct Cad;
//!
//! assert_eq!(Cad::find(b"abracadabra"), byteswar::scan::find(b"abracadabra", b"cad"));
//! ```

pub mod case;
pub mod compare;
pub mod edit;
pub mod hash;
pub mod scan;
pub mod seq;
pub mod word;

pub use byteswar_pattern_macro::FixedPattern;
pub use scan::FixedPattern;
