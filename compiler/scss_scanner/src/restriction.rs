//! Restriction sets and their cache.
//!
//! A grammar production asks for the next token while permitting only a few
//! pattern names. The permitted names form a [`RestrictionSet`]; the empty set
//! means "unrestricted". The scanner stores the set each token was produced
//! under. A replay may narrow that set but never widen it, since a wider
//! request could have matched a different pattern.

use std::sync::Arc;

use tracing::debug;

use crate::hashtable::{HashTable, DEFAULT_BUCKETS};

/// Set of pattern names permitted for one scan step.
#[derive(Clone, Debug)]
pub struct RestrictionSet {
    /// Names in request order, without duplicates.
    names: Vec<String>,
    table: HashTable<()>,
}

impl RestrictionSet {
    /// Build a set from `names` using `buckets` hash buckets.
    pub fn new<S: AsRef<str>>(names: &[S], buckets: u32) -> Self {
        let mut table = HashTable::with_buckets(buckets);
        let mut ordered = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if table.insert(name.as_bytes(), ()).is_none() {
                ordered.push(name.to_owned());
            }
        }
        RestrictionSet {
            names: ordered,
            table,
        }
    }

    /// The empty set, which permits every pattern.
    pub fn unrestricted() -> Self {
        Self::new::<&str>(&[], DEFAULT_BUCKETS)
    }

    /// Returns `true` if no restriction applies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name.as_bytes())
    }

    /// Whether a scan step under this set may try pattern `name`.
    #[inline]
    pub fn permits(&self, name: &str) -> bool {
        self.is_empty() || self.contains(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` if every name in `self` is in `other`.
    ///
    /// The bucket bitmaps reject most non-subsets without touching the names.
    pub fn is_subset_of(&self, other: &RestrictionSet) -> bool {
        if self.is_empty() {
            return true;
        }
        let same_shape = self.table.bucket_count() == other.table.bucket_count();
        if same_shape && !self.table.is_subset(&other.table) {
            return false;
        }
        self.names.iter().all(|name| other.contains(name))
    }
}

impl PartialEq for RestrictionSet {
    fn eq(&self, other: &Self) -> bool {
        self.names.len() == other.names.len() && self.is_subset_of(other)
    }
}

impl Eq for RestrictionSet {}

/// Memoized restriction sets, keyed by the requested names.
///
/// Identical requests share one [`Arc<RestrictionSet>`].
#[derive(Debug, Default)]
pub struct RestrictionCache {
    sets: HashTable<Arc<RestrictionSet>>,
}

impl RestrictionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct requests seen.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Fetch the set for `names` built with `buckets` buckets, creating it on
    /// first request.
    pub fn get_or_insert<S: AsRef<str>>(&mut self, names: &[S], buckets: u32) -> Arc<RestrictionSet> {
        let key = cache_key(names, buckets);
        if let Some(set) = self.sets.get(&key) {
            return Arc::clone(set);
        }

        let set = Arc::new(RestrictionSet::new(names, buckets));
        debug!(names = ?set.names(), buckets, "restriction cache miss");
        self.sets.insert(&key, Arc::clone(&set));
        set
    }
}

/// Bucket count followed by the NUL-joined names.
fn cache_key<S: AsRef<str>>(names: &[S], buckets: u32) -> Vec<u8> {
    let mut key = buckets.to_le_bytes().to_vec();
    for name in names {
        key.extend_from_slice(name.as_ref().as_bytes());
        key.push(0);
    }
    key
}
