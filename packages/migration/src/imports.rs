//! Import Aggregation
//!
//! Collects the framework symbols referenced by migrated placeholders and
//! renders them as a single ES6 import statement.

use indexmap::IndexSet;

/// Namespace import of the Scout utility object.
pub const SCOUT_IMPORT: &str = "scout";

/// Module all symbols are imported from.
pub const FRAMEWORK_MODULE: &str = "@eclipse-scout/eclipse-scout";

/// De-duplicated set of imported symbols, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    symbols: IndexSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `symbol`. Returns false if it was already present.
    pub fn add(&mut self, symbol: impl Into<String>) -> bool {
        self.symbols.insert(symbol.into())
    }

    pub fn add_scout(&mut self) {
        self.add(SCOUT_IMPORT);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Renders the import statement, followed by an empty line.
    ///
    /// The `scout` namespace import comes first, named imports follow in
    /// braces. An empty set renders as an empty string.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let named: Vec<&str> = self.iter().filter(|s| *s != SCOUT_IMPORT).collect();
        let mut out = String::from("import ");
        if self.contains(SCOUT_IMPORT) {
            out.push_str(SCOUT_IMPORT);
            if !named.is_empty() {
                out.push(',');
            }
            out.push(' ');
        }
        if !named.is_empty() {
            out.push_str("{ ");
            out.push_str(&named.join(", "));
            out.push_str(" } ");
        }
        out.push_str("from '");
        out.push_str(FRAMEWORK_MODULE);
        out.push_str("';\n\n");
        out
    }
}

impl<S: Into<String>> Extend<S> for ImportSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for symbol in iter {
            self.add(symbol);
        }
    }
}
