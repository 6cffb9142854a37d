//! Classification of field type anchors.
//!
//! protoc-gen-doc links every field type, including scalars (`#int64`), so
//! the only way to tell a leaf from a nested message is a known set of
//! scalar names. The set is injected rather than fixed so other schema
//! conventions can supply their own.

use std::collections::BTreeSet;

/// Protocol Buffers scalar value types.
pub const BUILTIN_SCALARS: &[&str] = &[
    "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32",
    "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Enum,
    Message,
}

#[derive(Debug, Clone)]
pub struct TypeCatalog {
    scalars: BTreeSet<String>,
    enums: BTreeSet<String>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        TypeCatalog::new(BUILTIN_SCALARS.iter().copied())
    }
}

impl TypeCatalog {
    pub fn new<I, S>(scalars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeCatalog {
            scalars: scalars.into_iter().map(Into::into).collect(),
            enums: BTreeSet::new(),
        }
    }

    /// Register enum anchors; fields of these types are leaves.
    pub fn with_enums<I, S>(mut self, enums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums.extend(enums.into_iter().map(Into::into));
        self
    }

    pub fn classify(&self, type_anchor: &str) -> TypeKind {
        if self.scalars.contains(type_anchor) {
            TypeKind::Scalar
        } else if self.enums.contains(type_anchor) {
            TypeKind::Enum
        } else {
            TypeKind::Message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scalars_are_leaves() {
        let catalog = TypeCatalog::default();
        for name in BUILTIN_SCALARS {
            assert_eq!(catalog.classify(name), TypeKind::Scalar);
        }
        assert_eq!(catalog.classify("pkg.User"), TypeKind::Message);
    }

    #[test]
    fn custom_scalar_set_replaces_builtins() {
        let catalog = TypeCatalog::new(["Timestamp"]);
        assert_eq!(catalog.classify("Timestamp"), TypeKind::Scalar);
        assert_eq!(catalog.classify("string"), TypeKind::Message);
    }

    #[test]
    fn enums_are_classified() {
        let catalog = TypeCatalog::default().with_enums(["pkg.Kind"]);
        assert_eq!(catalog.classify("pkg.Kind"), TypeKind::Enum);
    }
}
