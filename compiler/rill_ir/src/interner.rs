//! Deduplicated string pool.
//!
//! Indices are dense and start at zero; `put` is idempotent and `get`
//! returns the original text. The same type backs identifier interning
//! during parsing and the string-constant pools of code blocks and the
//! runtime machine.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Index of an interned string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from_index(index: u32) -> Self {
        Name(index)
    }
}

struct PoolInner {
    /// Map from string content to its index.
    map: FxHashMap<&'static str, u32>,
    /// Storage, indexed densely from zero.
    strings: Vec<&'static str>,
}

/// Append-only deduplicated string table.
///
/// Interior locking makes the pool shareable by reference across the
/// pipeline phases without threading `&mut` everywhere.
pub struct StringPool {
    inner: RwLock<PoolInner>,
}

impl StringPool {
    pub fn new() -> Self {
        StringPool {
            inner: RwLock::new(PoolInner {
                map: FxHashMap::default(),
                strings: Vec::new(),
            }),
        }
    }

    /// Intern a string, returning its stable dense index.
    ///
    /// Calling `put` twice with the same text returns the same [`Name`].
    pub fn put(&self, text: &str) -> Name {
        // Fast path: already interned.
        {
            let guard = self.inner.read();
            if let Some(&index) = guard.map.get(text) {
                return Name(index);
            }
        }

        let mut guard = self.inner.write();
        // Double-check after acquiring the write lock.
        if let Some(&index) = guard.map.get(text) {
            return Name(index);
        }

        // Leak to get a 'static key; pool entries live for the process.
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pool size is bounded far below u32::MAX by available memory"
        )]
        let index = guard.strings.len() as u32;
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Name(index)
    }

    /// Look up the original text of an interned string.
    pub fn get(&self, name: Name) -> &'static str {
        self.resolve(u64::from(name.0)).unwrap_or("")
    }

    /// Look up by raw index, as stored in `STRING_LOAD` immediates.
    pub fn resolve(&self, index: u64) -> Option<&'static str> {
        let guard = self.inner.read();
        usize::try_from(index)
            .ok()
            .and_then(|i| guard.strings.get(i).copied())
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringPool")
            .field("len", &self.len())
            .finish()
    }
}
