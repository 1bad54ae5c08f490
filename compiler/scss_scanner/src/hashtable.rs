//! Fixed-size byte-keyed hash table with a bucket presence bitmap.
//!
//! Restriction sets are small (a handful of pattern names) and compared on
//! every replayed token, so the table keeps one bit per occupied bucket.
//! Comparing two tables' bitmaps is a cheap approximate subset test: a set
//! bit in `a` that is clear in `b` proves `a` has a key `b` lacks.

use smallvec::{smallvec, SmallVec};

/// Seed for [`murmur3_32`] used by every table.
pub const SEED: u32 = 0x9747_b28c;

/// Bucket count used when none is configured.
pub const DEFAULT_BUCKETS: u32 = 64;

/// MurmurHash3 (x86, 32-bit) of `key`.
///
/// Blocks are read little-endian, so the hash is the same on every platform.
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    #[inline]
    fn scramble(k: u32) -> u32 {
        k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
    }

    let mut hash = seed;
    let mut blocks = key.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        hash ^= scramble(k);
        hash = hash.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .enumerate()
            .fold(0u32, |k, (i, &byte)| k ^ (u32::from(byte) << (8 * i)));
        hash ^= scramble(k);
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "murmur3 mixes in the key length modulo 2^32"
    )]
    let len = key.len() as u32;
    hash ^= len;

    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x85eb_ca6b);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0xc2b2_ae35);
    hash ^= hash >> 16;
    hash
}

/// Hash table keyed by byte strings.
///
/// Each bucket is a chain kept sorted by key, so lookups stop at the first
/// key not less than the probe.
#[derive(Clone, Debug)]
pub struct HashTable<V> {
    buckets: Vec<Vec<(Box<[u8]>, V)>>,
    /// One bit per bucket, set once the bucket holds a key.
    presence: SmallVec<[u64; 1]>,
    len: usize,
}

impl<V> HashTable<V> {
    /// Create a table with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Create a table with a fixed number of buckets (at least 1).
    pub fn with_buckets(buckets: u32) -> Self {
        let buckets = buckets.max(1) as usize;
        HashTable {
            buckets: std::iter::repeat_with(Vec::new).take(buckets).collect(),
            presence: smallvec![0; buckets.div_ceil(64)],
            len: 0,
        }
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn bucket_of(&self, key: &[u8]) -> usize {
        murmur3_32(key, SEED) as usize % self.buckets.len()
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        let bucket = self.bucket_of(key);
        self.presence[bucket / 64] |= 1 << (bucket % 64);

        let chain = &mut self.buckets[bucket];
        match chain.binary_search_by(|(probe, _)| probe.as_ref().cmp(key)) {
            Ok(found) => Some(std::mem::replace(&mut chain[found].1, value)),
            Err(slot) => {
                chain.insert(slot, (key.into(), value));
                self.len += 1;
                None
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let chain = &self.buckets[self.bucket_of(key)];
        chain
            .binary_search_by(|(probe, _)| probe.as_ref().cmp(key))
            .ok()
            .map(|found| &chain[found].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if every bucket occupied in `self` is occupied in
    /// `other`.
    ///
    /// Never true for tables with different bucket counts. Distinct keys can
    /// share a bucket, so a `true` result is only a strong hint.
    pub fn is_subset(&self, other: &HashTable<V>) -> bool {
        self.buckets.len() == other.buckets.len()
            && self
                .presence
                .iter()
                .zip(&other.presence)
                .all(|(&mine, &theirs)| mine & theirs == mine)
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
