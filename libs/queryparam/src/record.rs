use std::any::{Any, TypeId};

/// Read-only metadata for a single record field.
///
/// Descriptors are plain data: the parser decides what participates and how,
/// based on the tag bag and its configured tag names.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name, for error messages.
    pub name: &'static str,
    /// Field type rendered for error messages (e.g. `Vec<String>`).
    pub type_name: &'static str,
    /// Field type identity — registry lookup key.
    ///
    /// A fn pointer rather than a `TypeId` value so descriptor tables can be
    /// built in `const` context.
    pub ty: fn() -> TypeId,
    /// Tag bag: arbitrary string key/value pairs declared on the field.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// The field's type identity.
    pub fn type_id(&self) -> TypeId {
        (self.ty)()
    }

    /// Look up a tag by name. `None` means the tag was not declared, which
    /// is distinct from a tag declared with an empty value.
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// A decodable record: per-field metadata plus mutable access to each field.
///
/// Implemented via `#[derive(Record)]`, which generates both methods from
/// the struct declaration. Hand-written impls are valid as long as
/// `field_mut` accepts every index below `fields().len()` and the handle at
/// index `i` has the type named by descriptor `i`.
pub trait Record {
    /// Field descriptors in declaration order.
    fn fields() -> &'static [FieldDescriptor]
    where
        Self: Sized;

    /// Mutable handle to the field at `index`.
    ///
    /// Panics if `index` is out of range; a derived impl is never called
    /// with one.
    fn field_mut(&mut self, index: usize) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup_distinguishes_absent_from_empty() {
        let desc = FieldDescriptor {
            name: "name",
            type_name: "String",
            ty: TypeId::of::<String>,
            tags: &[("queryparam", "")],
        };

        assert_eq!(desc.tag("queryparam"), Some(""));
        assert_eq!(desc.tag("queryparamdelim"), None);
    }

    #[test]
    fn type_id_matches_field_type() {
        let desc = FieldDescriptor {
            name: "age",
            type_name: "i64",
            ty: TypeId::of::<i64>,
            tags: &[("queryparam", "age")],
        };

        assert_eq!(desc.type_id(), TypeId::of::<i64>());
    }
}
