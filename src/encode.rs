//! Categorical-to-numeric encoding for non-spatial demo data.
//!
//! [`encode`] sums the UTF-16 code units of a string. It is deterministic but far
//! from injective: anagrams always collide (`"ab"` and `"ba"` both give 195), and
//! unrelated strings can collide too. The value is only shown next to categorical
//! points; it never feeds the clustering math.

/// Sum of the UTF-16 code units of `text`.
///
/// ASCII text encodes to the sum of its byte values. Characters outside the Basic
/// Multilingual Plane contribute both surrogate halves.
pub fn encode(text: &str) -> u64 {
    text.encode_utf16().map(u64::from).sum()
}
