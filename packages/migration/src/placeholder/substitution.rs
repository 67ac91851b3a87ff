// Placeholder Substitution
//
// Replaces every placeholder of a converted model module with the matching
// JavaScript expression and collects the imports those expressions need.

use std::path::Path;

use super::{has_text, scan, PlaceholderKind};
use crate::context::MigrationContext;
use crate::error::{MigrationError, Result};
use crate::imports::ImportSet;
use crate::transformer::MODEL_OWNER_PARAM_NAME;

/// Output of [`substitute`]: the rewritten text without the import line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub imports: ImportSet,
}

impl Substitution {
    /// The final module text: import line followed by the substituted source.
    pub fn into_module(self) -> String {
        let mut out = self.imports.render();
        out.push_str(&self.text);
        out
    }
}

/// Resolves all placeholders of `source`.
///
/// Fails on the first placeholder that is blank or of an unknown type.
pub fn substitute(source: &str, file: &Path, context: &MigrationContext) -> Result<Substitution> {
    let mut result = String::with_capacity(source.len() * 2);
    let mut imports = ImportSet::new();
    let mut last_pos = 0;

    for token in scan(source) {
        result.push_str(&source[last_pos..token.span.start]);
        result.push_str(token.key);
        result.push_str(": ");

        let expression = match PlaceholderKind::parse(token.kind) {
            Some(PlaceholderKind::TextKey) => {
                migrate_text_key(token.key, token.value, file, &mut imports)?
            }
            Some(PlaceholderKind::Const) => {
                migrate_const(token.key, token.value, file, context, &mut imports)?
            }
            Some(PlaceholderKind::IconId) => {
                migrate_icon_id(token.key, token.value, file, &mut imports)?
            }
            None => {
                return Err(MigrationError::UnknownPlaceholder {
                    kind: token.kind.to_string(),
                    file: file.to_path_buf(),
                })
            }
        };
        result.push_str(&expression);
        last_pos = token.span.end;
    }
    result.push_str(&source[last_pos..]);

    Ok(Substitution {
        text: result,
        imports,
    })
}

/// Resolves all placeholders and prepends the import line.
pub fn migrate_placeholders(source: &str, file: &Path, context: &MigrationContext) -> Result<String> {
    substitute(source, file, context).map(Substitution::into_module)
}

fn empty(kind: PlaceholderKind, key: &str, file: &Path) -> MigrationError {
    MigrationError::EmptyPlaceholder {
        kind: kind.to_string(),
        key: key.to_string(),
        file: file.to_path_buf(),
    }
}

pub fn migrate_text_key(
    key: &str,
    text_key: &str,
    file: &Path,
    imports: &mut ImportSet,
) -> Result<String> {
    if !has_text(text_key) {
        return Err(empty(PlaceholderKind::TextKey, key, file));
    }
    imports.add_scout();
    Ok(format!(
        "scout.texts.resolveText('{}', {}.session.locale.languageTag)",
        text_key, MODEL_OWNER_PARAM_NAME
    ))
}

/// `a.b.c` becomes `a.b.icons.c`. A name without a qualifier (or with a
/// leading dot only) is looked up in `scout.icons`.
pub fn migrate_icon_id(
    key: &str,
    icon_id: &str,
    file: &Path,
    imports: &mut ImportSet,
) -> Result<String> {
    if !has_text(icon_id) {
        return Err(empty(PlaceholderKind::IconId, key, file));
    }

    match icon_id.rfind('.') {
        Some(last_dot) if last_dot > 0 => Ok(format!(
            "{}.icons{}",
            &icon_id[..last_dot],
            &icon_id[last_dot..]
        )),
        _ => {
            imports.add_scout();
            Ok(format!("scout.icons.{}", icon_id))
        }
    }
}

pub fn migrate_const(
    key: &str,
    const_value: &str,
    file: &Path,
    context: &MigrationContext,
    imports: &mut ImportSet,
) -> Result<String> {
    if !has_text(key) || !has_text(const_value) {
        return Err(empty(PlaceholderKind::Const, key, file));
    }

    if let Some(migrated) = context
        .const_mappers()
        .migrate(key, const_value, file, context, imports)
    {
        return Ok(migrated);
    }

    imports.add_scout();
    Ok(format!("scout.objects.resolveConst('{}')", const_value))
}
