//! Pattern table: named regular expressions in priority order.
//!
//! Registration order is match priority: the scanner tries patterns first to
//! last and takes the first that matches, not the longest. Expressions are
//! syntax-checked on registration and compiled on first use.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use regex_automata::meta::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::PatternError;
use crate::restriction::{RestrictionCache, RestrictionSet};

/// Index of a pattern in its [`PatternTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(u32);

impl PatternId {
    /// Position in priority order.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named expression and its lazily built matcher.
#[derive(Debug)]
pub struct Pattern {
    name: String,
    expression: String,
    regex: OnceLock<Result<Regex, PatternError>>,
}

impl Pattern {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns `true` once the matcher has been built successfully.
    pub fn is_compiled(&self) -> bool {
        self.regex.get().is_some_and(Result::is_ok)
    }

    pub(crate) fn regex(&self) -> Result<&Regex, PatternError> {
        self.regex
            .get_or_init(|| {
                debug!(name = %self.name, expression = %self.expression, "compiling pattern");
                Regex::new(&self.expression).map_err(|err| PatternError::Compile {
                    name: self.name.clone(),
                    message: err.to_string(),
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Ordered registry of named patterns.
///
/// Scanners borrow the table immutably; compilation is thread-safe, so one
/// table can serve scanners on several threads. The table also owns the
/// restriction-set cache those scanners share.
#[derive(Debug, Default)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
    by_name: FxHashMap<String, PatternId>,
    restrictions: Mutex<RestrictionCache>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, expression)` pairs in priority order.
    ///
    /// ```
    /// use scss_scanner::PatternTable;
    ///
    /// let table = PatternTable::from_patterns(&[("NUM", "[0-9]+"), ("ID", "[a-z]+")]).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.find("ID").map(|id| id.index()), Some(1));
    /// ```
    pub fn from_patterns<N: AsRef<str>, E: AsRef<str>>(
        patterns: &[(N, E)],
    ) -> Result<Self, PatternError> {
        let mut table = Self::new();
        for (name, expression) in patterns {
            table.register(name.as_ref(), expression.as_ref())?;
        }
        Ok(table)
    }

    /// Register a pattern, or return the id of the one already named `name`.
    ///
    /// The first registration's expression wins.
    pub fn register(&mut self, name: &str, expression: &str) -> Result<PatternId, PatternError> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }

        regex_automata::util::syntax::parse(expression).map_err(|err| PatternError::Syntax {
            name: name.to_owned(),
            message: err.to_string(),
        })?;
        let id = u32::try_from(self.patterns.len())
            .map(PatternId)
            .map_err(|_| PatternError::Compile {
                name: name.to_owned(),
                message: "pattern table is full".to_owned(),
            })?;

        self.patterns.push(Pattern {
            name: name.to_owned(),
            expression: expression.to_owned(),
            regex: OnceLock::new(),
        });
        self.by_name.insert(name.to_owned(), id);
        debug!(name, expression, index = id.index(), "registered pattern");
        Ok(id)
    }

    /// Build the matcher for `id` if it has not been built yet.
    pub fn compile_if_needed(&self, id: PatternId) -> Result<(), PatternError> {
        match self.get(id) {
            Some(pattern) => pattern.regex().map(drop),
            None => Ok(()),
        }
    }

    /// Build every matcher now, reporting the first failure.
    pub fn compile_all(&self) -> Result<(), PatternError> {
        self.patterns
            .iter()
            .try_for_each(|pattern| pattern.regex().map(drop))
    }

    #[inline]
    pub fn find(&self, name: &str) -> Option<PatternId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id.index())
    }

    #[inline]
    pub fn name(&self, id: PatternId) -> Option<&str> {
        self.get(id).map(Pattern::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &Pattern)> + '_ {
        (0u32..)
            .map(PatternId)
            .zip(&self.patterns)
    }

    /// Shared restriction set for `names`.
    pub fn restriction_set<S: AsRef<str>>(&self, names: &[S], buckets: u32) -> Arc<RestrictionSet> {
        self.restrictions.lock().get_or_insert(names, buckets)
    }

    /// Number of distinct restriction sets built so far.
    pub fn cached_restrictions(&self) -> usize {
        self.restrictions.lock().len()
    }
}
