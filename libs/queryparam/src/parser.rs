use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::Error;
use crate::parsers::{default_value_parsers, ValueParser};
use crate::record::{FieldDescriptor, Record};
use crate::setters::{default_value_setters, generic_setter, generic_type, ValueSetter};
use crate::values::UrlValues;

/// Default name of the tag holding a field's query-parameter name.
pub const TAG: &str = "queryparam";
/// Default name of the tag holding a field's delimiter override.
pub const DELIMITER_TAG: &str = "queryparamdelim";
/// Default delimiter for list-shaped fields.
pub const DELIMITER: &str = ",";

static DEFAULT_PARSER: LazyLock<Parser> = LazyLock::new(Parser::default);

/// Parses query parameters into a [`Record`].
///
/// All fields are public so callers can rename the tags, change the default
/// delimiter, or compose their own parser/setter registries from the
/// builtins. The registries are read-only during [`parse`](Parser::parse),
/// so one `Parser` can serve concurrent decodes.
pub struct Parser {
    /// Tag holding a field's query-parameter name.
    pub tag: String,
    /// Tag holding a field's delimiter override.
    pub delimiter_tag: String,
    /// Delimiter applied when a field has no override.
    pub delimiter: String,
    /// Value parsers, keyed by field type.
    pub value_parsers: HashMap<TypeId, ValueParser>,
    /// Value setters, keyed by field type, with a generic fallback entry.
    pub value_setters: HashMap<TypeId, ValueSetter>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            tag: TAG.to_owned(),
            delimiter_tag: DELIMITER_TAG.to_owned(),
            delimiter: DELIMITER.to_owned(),
            value_parsers: default_value_parsers(),
            value_setters: default_value_setters(),
        }
    }
}

impl Parser {
    /// The delimiter to use for the given field: its override tag when
    /// declared non-empty, otherwise the parser default.
    pub fn field_delimiter(&self, field: &FieldDescriptor) -> &str {
        match field.tag(&self.delimiter_tag) {
            Some(delimiter) if !delimiter.is_empty() => delimiter,
            _ => &self.delimiter,
        }
    }

    /// Parse query parameters from `values` into `target`.
    ///
    /// Fields are processed in declaration order and the first failure is
    /// returned as-is. Fields assigned before the failure keep their new
    /// values; fields after it are never touched.
    pub fn parse<T: Record>(
        &self,
        values: &UrlValues,
        target: &mut T,
    ) -> Result<(), Error> {
        tracing::trace!(
            record = %std::any::type_name::<T>(),
            "parsing query parameters"
        );
        for (index, field) in T::fields().iter().enumerate() {
            self.parse_field(field, target.field_mut(index), values)?;
        }
        Ok(())
    }

    /// Parse a single field.
    ///
    /// `target` must be the handle matching `field` — [`Parser::parse`]
    /// pairs them up by index.
    pub fn parse_field(
        &self,
        field: &FieldDescriptor,
        target: &mut dyn Any,
        values: &UrlValues,
    ) -> Result<(), Error> {
        let Some(parameter) = field.tag(&self.tag) else {
            tracing::trace!(field = %field.name, "no tag, skipping");
            return Ok(());
        };
        if parameter.is_empty() {
            return Err(Error::InvalidTag { field: field.name });
        }

        // Absent key reads as blank; the Present type is how callers
        // distinguish "absent" from "supplied but empty".
        let raw = values.get(parameter).unwrap_or("");

        let value_parser = self
            .value_parsers
            .get(&field.type_id())
            .ok_or(Error::UnhandledFieldType {
                field: field.name,
                type_name: field.type_name,
            })?;

        let parsed = value_parser(raw, self.field_delimiter(field)).map_err(
            |source| Error::InvalidParameterValue {
                field: field.name,
                type_name: field.type_name,
                parameter: parameter.to_owned(),
                value: raw.to_owned(),
                source,
            },
        )?;

        // Setter resolution is total: type-specific entry, then the map's
        // generic entry, then the builtin generic setter.
        let setter = self
            .value_setters
            .get(&field.type_id())
            .or_else(|| self.value_setters.get(&generic_type()))
            .copied()
            .unwrap_or(generic_setter as ValueSetter);

        setter(parsed, target).map_err(|source| Error::CannotSetValue {
            field: field.name,
            type_name: field.type_name,
            parameter: parameter.to_owned(),
            value: raw.to_owned(),
            source,
        })
    }
}

/// Parse query parameters from `values` into `target` using the default
/// parser configuration and registries.
pub fn parse<T: Record>(values: &UrlValues, target: &mut T) -> Result<(), Error> {
    DEFAULT_PARSER.parse(values, target)
}
