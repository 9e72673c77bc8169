//! Symbol identifiers and the token interner.

use indexmap::IndexMap;

/// A symbol identifier. Interned tokens get dense ids starting at 0.
pub type SymbolId = u32;

/// Reserved id for epsilon (λ) transitions.
/// `u32::MAX` is never handed out by [`SymbolTable::intern`].
pub const EPSILON: SymbolId = u32::MAX;

/// The literal token that stands for epsilon in transition text.
pub const EPSILON_MARKER: &str = "#";

#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Maps symbol tokens to ids and back.
///
/// Ids are assigned in first-seen order. The epsilon marker always maps to
/// [`EPSILON`] and is never stored in the table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, bool>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a token that belongs to the declared alphabet.
    pub fn declare(&mut self, token: &str) -> SymbolId {
        let id = self.intern(token);
        if let Some((_, declared)) = self.symbols.get_index_mut(id as usize) {
            *declared = true;
        }
        id
    }

    /// Intern a token, returning its id. The epsilon marker yields [`EPSILON`].
    pub fn intern(&mut self, token: &str) -> SymbolId {
        if token == EPSILON_MARKER {
            return EPSILON;
        }
        if let Some(idx) = self.symbols.get_index_of(token) {
            return idx as SymbolId;
        }
        let (idx, _) = self.symbols.insert_full(token.to_owned(), false);
        idx as SymbolId
    }

    /// Look up a token without interning it.
    pub fn get(&self, token: &str) -> Option<SymbolId> {
        if token == EPSILON_MARKER {
            return Some(EPSILON);
        }
        self.symbols.get_index_of(token).map(|idx| idx as SymbolId)
    }

    /// Resolve an id back to its token.
    pub fn resolve(&self, symbol: SymbolId) -> Option<&str> {
        if is_epsilon(symbol) {
            return Some(EPSILON_MARKER);
        }
        self.symbols
            .get_index(symbol as usize)
            .map(|(token, _)| token.as_str())
    }

    /// Whether the symbol was declared as part of the alphabet.
    /// Epsilon is never an alphabet member.
    pub fn in_alphabet(&self, symbol: SymbolId) -> bool {
        self.symbols
            .get_index(symbol as usize)
            .is_some_and(|(_, declared)| *declared)
    }

    /// Number of interned symbols, including undeclared ones.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
        assert!(!is_epsilon(100));
    }

    #[test]
    fn test_interning_is_stable() {
        let mut table = SymbolTable::new();
        let a = table.declare("a");
        let b = table.declare("b");
        assert_eq!((a, b), (0, 1));
        assert_eq!(table.intern("a"), a);
        assert_eq!(table.get("b"), Some(b));
        assert_eq!(table.get("c"), None);
        assert_eq!(table.resolve(b), Some("b"));
        assert_eq!(table.resolve(7), None);
    }

    #[test]
    fn test_epsilon_marker_is_not_stored() {
        let mut table = SymbolTable::new();
        assert_eq!(table.intern(EPSILON_MARKER), EPSILON);
        assert_eq!(table.get(EPSILON_MARKER), Some(EPSILON));
        assert_eq!(table.resolve(EPSILON), Some(EPSILON_MARKER));
        assert!(table.is_empty());
        assert!(!table.in_alphabet(EPSILON));
    }

    #[test]
    fn test_undeclared_symbols_stay_outside_alphabet() {
        let mut table = SymbolTable::new();
        table.declare("a");
        let c = table.intern("c");
        assert!(!table.in_alphabet(c));
        assert!(table.in_alphabet(0));
        assert_eq!(table.len(), 2);

        // a later declaration promotes it
        table.declare("c");
        assert!(table.in_alphabet(c));
    }
}
