// Const Placeholder Mappers
//
// Pluggable strategies for `${const:...}` placeholders. The registry asks
// each mapper in registration order; the first one returning an expression
// wins. When none applies the caller falls back to
// `scout.objects.resolveConst`.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::context::MigrationContext;
use crate::imports::ImportSet;

/// Dotted identifier path like `FormField.LabelPosition.TOP`.
static QUALIFIED_CONST_PAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_$][\w$]*)(?:\.[\w$]+)+$").unwrap());

pub trait ConstPlaceholderMapper: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the replacement expression, or `None` if this mapper does not
    /// handle the placeholder. Symbols added to `imports` are kept only when
    /// an expression is returned.
    fn migrate(
        &self,
        key: &str,
        value: &str,
        file: &Path,
        context: &MigrationContext,
        imports: &mut ImportSet,
    ) -> Option<String>;
}

/// Ordered set of const mappers. Built once, read-only afterwards.
#[derive(Default)]
pub struct ConstMapperRegistry {
    mappers: Vec<Box<dyn ConstPlaceholderMapper>>,
}

impl ConstMapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with the built-in mappers described by `config`.
    pub fn from_config(config: &ConstMappingConfig) -> Self {
        let mut registry = Self::new();
        if !config.mappings.is_empty() {
            registry.register(TableConstMapper::new(config.mappings.clone()));
        }
        if !config.qualified_symbols.is_empty() {
            registry.register(QualifiedConstMapper::new(
                config.qualified_symbols.iter().cloned(),
            ));
        }
        registry
    }

    pub fn register(&mut self, mapper: impl ConstPlaceholderMapper + 'static) {
        self.mappers.push(Box::new(mapper));
    }

    pub fn with_mapper(mut self, mapper: impl ConstPlaceholderMapper + 'static) -> Self {
        self.register(mapper);
        self
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.mappers.iter().map(|m| m.name()).collect()
    }

    /// First answer of the registered mappers.
    pub fn migrate(
        &self,
        key: &str,
        value: &str,
        file: &Path,
        context: &MigrationContext,
        imports: &mut ImportSet,
    ) -> Option<String> {
        self.mappers.iter().find_map(|mapper| {
            let mut contributed = ImportSet::new();
            let migrated = mapper.migrate(key, value, file, context, &mut contributed)?;
            imports.extend(contributed.iter());
            Some(migrated)
        })
    }
}

/// Configuration of the built-in mappers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConstMappingConfig {
    #[serde(default, rename = "constMappings")]
    pub mappings: Vec<ConstMapping>,
    /// Framework symbols whose dotted constants are referenced directly.
    #[serde(default, rename = "qualifiedConstSymbols")]
    pub qualified_symbols: Vec<String>,
}

/// A fixed replacement for one const value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConstMapping {
    /// Restricts the mapping to one model attribute.
    #[serde(default)]
    pub key: Option<String>,
    pub value: String,
    pub replacement: String,
    #[serde(default)]
    pub imports: Vec<String>,
}

pub struct TableConstMapper {
    mappings: Vec<ConstMapping>,
}

impl TableConstMapper {
    pub fn new(mappings: Vec<ConstMapping>) -> Self {
        Self { mappings }
    }
}

impl ConstPlaceholderMapper for TableConstMapper {
    fn name(&self) -> &str {
        "table"
    }

    fn migrate(
        &self,
        key: &str,
        value: &str,
        _file: &Path,
        _context: &MigrationContext,
        imports: &mut ImportSet,
    ) -> Option<String> {
        let mapping = self.mappings.iter().find(|m| {
            m.value == value && m.key.as_deref().unwrap_or(key) == key
        })?;
        imports.extend(mapping.imports.iter().cloned());
        Some(mapping.replacement.clone())
    }
}

/// References `Symbol.A.B` directly when `Symbol` is a known framework export.
pub struct QualifiedConstMapper {
    symbols: HashSet<String>,
}

impl QualifiedConstMapper {
    pub fn new(symbols: impl IntoIterator<Item = String>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }
}

impl ConstPlaceholderMapper for QualifiedConstMapper {
    fn name(&self) -> &str {
        "qualified"
    }

    fn migrate(
        &self,
        _key: &str,
        value: &str,
        _file: &Path,
        _context: &MigrationContext,
        imports: &mut ImportSet,
    ) -> Option<String> {
        let caps = QUALIFIED_CONST_PAT.captures(value)?;
        let symbol = caps.get(1)?.as_str();
        if !self.symbols.contains(symbol) {
            return None;
        }
        imports.add(symbol);
        Some(value.to_string())
    }
}
