//! Textual type references, as written in a declaration or descriptor.
//!
//! Member signatures and `extends`/`implements` clauses keep their types in
//! this form. Adapters turn them into symbols with `resolve_type_ref`.

use std::fmt;

use jsym_util::Name;

use crate::error::{SymbolError, SymbolResult};

/// A possibly-qualified type name plus a number of array dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: Name,
    pub dimensions: usize,
}

impl TypeRef {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            dimensions: 0,
        }
    }

    pub fn array(name: impl Into<Name>, dimensions: usize) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }

    /// Parse `a.b.C`, `int[][]` or a trailing varargs `T...`
    pub fn parse(text: &str) -> SymbolResult<TypeRef> {
        const OP: &str = "TypeRef::parse";

        let mut rest = text.trim();
        let mut dimensions = 0;

        if let Some(stripped) = rest.strip_suffix("...") {
            rest = stripped.trim_end();
            dimensions += 1;
        }
        while let Some(stripped) = rest.strip_suffix(']') {
            let Some(stripped) = stripped.trim_end().strip_suffix('[') else {
                return Err(SymbolError::invalid(OP, format!("unbalanced brackets in `{text}`")));
            };
            rest = stripped.trim_end();
            dimensions += 1;
        }

        if rest.is_empty() {
            return Err(SymbolError::invalid(OP, format!("no type name in `{text}`")));
        }
        if rest.contains(|c: char| c == '[' || c == ']' || c.is_whitespace()) {
            return Err(SymbolError::invalid(OP, format!("malformed type name `{text}`")));
        }
        if rest.starts_with('.') || rest.ends_with('.') || rest.contains("..") {
            return Err(SymbolError::invalid(OP, format!("empty name segment in `{text}`")));
        }

        Ok(TypeRef {
            name: Name::intern(rest),
            dimensions,
        })
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }

    pub fn is_qualified(&self) -> bool {
        self.name.as_str().contains('.')
    }

    /// The same name without array dimensions
    pub fn element(&self) -> TypeRef {
        TypeRef::new(self.name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())?;
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
