//! The built-in type table.
//!
//! Indices 0..4 are reserved for `Type`, `Bool`, `Float64`, `Int64` and
//! `String` in that exact order; higher indices are user declarations.
//! The pool is constructed once per compilation and passed through.

/// Index into a [`TypePool`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    pub const TYPE: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const FLOAT64: TypeId = TypeId(2);
    pub const INT64: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Append-only type table, pre-seeded with the built-in prefix.
#[derive(Debug)]
pub struct TypePool {
    names: Vec<String>,
}

/// Number of pre-seeded built-in types.
const BUILTIN_COUNT: usize = 5;

impl TypePool {
    /// Create a pool seeded with the five built-in types.
    pub fn new() -> Self {
        TypePool {
            names: ["Type", "Bool", "Float64", "Int64", "String"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Append a user-declared type, returning its index.
    pub fn declare(&mut self, name: &str) -> TypeId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pool size is bounded far below u32::MAX by available memory"
        )]
        let id = TypeId(self.names.len() as u32);
        self.names.push(name.to_owned());
        id
    }

    /// Name of a type, or `None` if the index was never allocated.
    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// True for the five pre-seeded built-ins.
    pub fn is_builtin(&self, id: TypeId) -> bool {
        (id.0 as usize) < BUILTIN_COUNT
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the built-in prefix is always present
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_prefix_order() {
        let pool = TypePool::new();
        assert_eq!(pool.name(TypeId::TYPE), Some("Type"));
        assert_eq!(pool.name(TypeId::BOOL), Some("Bool"));
        assert_eq!(pool.name(TypeId::FLOAT64), Some("Float64"));
        assert_eq!(pool.name(TypeId::INT64), Some("Int64"));
        assert_eq!(pool.name(TypeId::STRING), Some("String"));
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn builtin_indices_are_fixed() {
        assert_eq!(TypeId::TYPE.index(), 0);
        assert_eq!(TypeId::BOOL.index(), 1);
        assert_eq!(TypeId::FLOAT64.index(), 2);
        assert_eq!(TypeId::INT64.index(), 3);
        assert_eq!(TypeId::STRING.index(), 4);
    }

    #[test]
    fn declare_appends_after_builtins() {
        let mut pool = TypePool::new();
        let id = pool.declare("Temperature");
        assert_eq!(id.index(), 5);
        assert_eq!(pool.name(id), Some("Temperature"));
        assert!(!pool.is_builtin(id));
        assert!(pool.is_builtin(TypeId::STRING));
    }
}
