//! Identifier interning.
//!
//! Maps identifier text to small stable symbol ids. Lookup is a linear
//! scan over existing entries comparing exact byte content - O(n) per
//! call, which is fine at the scale of the programs this language runs.
//! Interned text is copied into chunked storage so entries never move.

/// An interned identifier handle.
///
/// Ids are assigned sequentially starting at 1 (0 is reserved),
/// monotonically increasing, and never reused or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Reconstruct a symbol from a known-valid raw id. Mostly useful in
    /// tests.
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

const CHUNK_SIZE: usize = 512;

/// Location of an entry's text within the chunk storage.
#[derive(Debug, Clone, Copy)]
struct Entry {
    chunk: u32,
    start: u32,
    len: u32,
}

/// Append-only intern table.
///
/// One interner is created per compilation unit and lives for the whole
/// parse+compile+run cycle; nothing is ever removed from it.
#[derive(Debug, Clone)]
pub struct Interner {
    chunks: Vec<String>,
    entries: Vec<Entry>,
}

impl Interner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self {
            chunks: vec![String::with_capacity(CHUNK_SIZE)],
            entries: Vec::new(),
        }
    }

    /// Intern a string, returning its symbol.
    ///
    /// Identical byte content always yields the same symbol; new content
    /// gets the next id in first-seen order.
    pub fn intern(&mut self, text: &str) -> Symbol {
        for (ix, entry) in self.entries.iter().enumerate() {
            if self.entry_text(entry) == text {
                return Symbol(ix as u32 + 1);
            }
        }
        let entry = self.store(text);
        self.entries.push(entry);
        Symbol(self.entries.len() as u32)
    }

    /// Resolve a symbol back to its text.
    ///
    /// # Panics
    ///
    /// Panics if the symbol did not come from this interner.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.entry_text(&self.entries[symbol.0 as usize - 1])
    }

    /// Number of interned entries. Since ids start at 1, this is also the
    /// largest id handed out so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_text(&self, entry: &Entry) -> &str {
        let chunk = &self.chunks[entry.chunk as usize];
        &chunk[entry.start as usize..(entry.start + entry.len) as usize]
    }

    /// Copy text into chunk storage. Oversized strings get a dedicated
    /// chunk; otherwise the current chunk is used, starting a fresh one
    /// when the text does not fit.
    fn store(&mut self, text: &str) -> Entry {
        if text.len() > CHUNK_SIZE {
            self.chunks.push(String::from(text));
            return Entry {
                chunk: self.chunks.len() as u32 - 1,
                start: 0,
                len: text.len() as u32,
            };
        }
        let fits = {
            let current = self.chunks.last().expect("interner has a chunk");
            current.len() + text.len() <= CHUNK_SIZE
        };
        if !fits {
            self.chunks.push(String::with_capacity(CHUNK_SIZE));
        }
        let chunk_ix = self.chunks.len() - 1;
        let current = &mut self.chunks[chunk_ix];
        let start = current.len();
        current.push_str(text);
        Entry {
            chunk: chunk_ix as u32,
            start: start as u32,
            len: text.len() as u32,
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut interner = Interner::new();
        let a = interner.intern("alpha");
        let b = interner.intern("alpha");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_ids_assigned_in_first_seen_order_from_one() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern("a").as_u32(), 1);
        assert_eq!(interner.intern("b").as_u32(), 2);
        assert_eq!(interner.intern("a").as_u32(), 1);
        assert_eq!(interner.intern("c").as_u32(), 3);
    }

    #[test]
    fn test_distinct_content_distinct_ids() {
        let mut interner = Interner::new();
        let a = interner.intern("x");
        let b = interner.intern("x2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolve() {
        let mut interner = Interner::new();
        let sym = interner.intern("hello");
        assert_eq!(interner.resolve(sym), "hello");
    }

    #[test]
    fn test_chunk_rollover() {
        let mut interner = Interner::new();
        // Fill past one chunk with distinct names; every entry must stay
        // resolvable after its chunk is no longer the current one.
        let names: Vec<String> = (0..100).map(|i| format!("identifier_number_{}", i)).collect();
        let syms: Vec<Symbol> = names.iter().map(|n| interner.intern(n)).collect();
        for (name, sym) in names.iter().zip(&syms) {
            assert_eq!(interner.resolve(*sym), name.as_str());
        }
    }

    #[test]
    fn test_oversized_string_gets_dedicated_chunk() {
        let mut interner = Interner::new();
        let big = "x".repeat(CHUNK_SIZE * 2);
        let sym = interner.intern(&big);
        assert_eq!(interner.resolve(sym), big.as_str());
        // Chunk storage keeps working for subsequent small strings.
        let after = interner.intern("small");
        assert_eq!(interner.resolve(after), "small");
    }
}
