use byteswar::edit::{levenshtein, levenshtein_memory_needed};
use byteswar::seq::{ByteSeq, VecByteSeq, sort};
use byteswar::{FixedPattern, compare::order, hash::hash, scan::find};

#[derive(FixedPattern)]
#[pattern(bytes = "cad")]
pub struct Cad;

fn main() {
    // Scanning: a compile-time-known needle skips the per-call table build.
    let hay = b"abracadabra";
    assert_eq!(Cad::find(hay), Some(4));
    assert_eq!(find(hay, b"cad"), Some(4));
    assert_eq!(find(b"x", b"yy"), None);

    // Lexicographic ordering.
    assert_eq!(order(b"apple", b"apply"), std::cmp::Ordering::Less);

    // Similarity hashing: deterministic, alignment-independent.
    assert_eq!(hash(b"same bytes"), hash(b"same bytes"));

    // Bounded edit distance.
    let mut buf = vec![0u8; levenshtein_memory_needed(6, 7)];
    assert_eq!(levenshtein(b"kitten", b"sitting", &mut buf, 10), 3);

    // Sorting a set of strings through the sequence engine.
    let words = ["banana", "apple", "cherry", "apricot"];
    let seq = VecByteSeq::new(words.iter().map(|s| s.as_bytes().to_vec()).collect());
    let mut perm: Vec<u64> = (0..seq.count() as u64).collect();
    sort(&seq, &mut perm);
    let sorted: Vec<&str> = perm.iter().map(|&i| words[i as usize]).collect();
    assert_eq!(sorted, vec!["apple", "apricot", "banana", "cherry"]);

    println!("sorted: {sorted:?}");
}
