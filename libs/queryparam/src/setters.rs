use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::BoxError;
use crate::value::{AnyValue, TypeMismatch};

/// A value setter assigns a converted intermediate value onto a destination
/// field, handling any representation-width difference along the way.
pub type ValueSetter =
    fn(value: Box<dyn AnyValue>, target: &mut dyn Any) -> Result<(), BoxError>;

/// Sentinel marker keyed to the generic setter. Private, so its `TypeId`
/// can never collide with a real field type.
struct Generic;

/// Registry key for the generic setter — use it to override the fallback
/// assignment in a custom setter map.
pub fn generic_type() -> TypeId {
    TypeId::of::<Generic>()
}

/// Default value setters, keyed by field type.
///
/// Only types whose parser emits a wider intermediate need an entry; every
/// other type falls through to [`generic_setter`].
pub fn default_value_setters() -> HashMap<TypeId, ValueSetter> {
    HashMap::from([
        (generic_type(), generic_setter as ValueSetter),
        (TypeId::of::<isize>(), int_value_setter as ValueSetter),
        (TypeId::of::<i32>(), int32_value_setter as ValueSetter),
        (TypeId::of::<f32>(), float32_value_setter as ValueSetter),
    ])
}

/// Direct guarded assignment: the value's concrete type must match the
/// destination field's type exactly.
pub fn generic_setter(
    value: Box<dyn AnyValue>,
    target: &mut dyn Any,
) -> Result<(), BoxError> {
    value.assign(target)
}

fn mismatch(value: &dyn AnyValue) -> BoxError {
    Box::new(TypeMismatch {
        value_type: value.type_name(),
    })
}

/// Narrows an `i64` intermediate onto an `isize` field.
pub fn int_value_setter(
    value: Box<dyn AnyValue>,
    target: &mut dyn Any,
) -> Result<(), BoxError> {
    let wide = match value.downcast_ref::<i64>() {
        Some(wide) => *wide,
        None => return Err(mismatch(&*value)),
    };
    match target.downcast_mut::<isize>() {
        Some(slot) => {
            // Range already validated by the parser.
            *slot = wide as isize;
            Ok(())
        }
        None => Err(mismatch(&*value)),
    }
}

/// Narrows an `i64` intermediate onto an `i32` field.
pub fn int32_value_setter(
    value: Box<dyn AnyValue>,
    target: &mut dyn Any,
) -> Result<(), BoxError> {
    let wide = match value.downcast_ref::<i64>() {
        Some(wide) => *wide,
        None => return Err(mismatch(&*value)),
    };
    match target.downcast_mut::<i32>() {
        Some(slot) => {
            *slot = wide as i32;
            Ok(())
        }
        None => Err(mismatch(&*value)),
    }
}

/// Narrows an `f64` intermediate onto an `f32` field.
pub fn float32_value_setter(
    value: Box<dyn AnyValue>,
    target: &mut dyn Any,
) -> Result<(), BoxError> {
    let wide = match value.downcast_ref::<f64>() {
        Some(wide) => *wide,
        None => return Err(mismatch(&*value)),
    };
    match target.downcast_mut::<f32>() {
        Some(slot) => {
            *slot = wide as f32;
            Ok(())
        }
        None => Err(mismatch(&*value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_setter_assigns_matching_types() {
        let mut target = String::new();
        generic_setter(Box::new(String::from("tom")), &mut target).unwrap();
        assert_eq!(target, "tom");
    }

    #[test]
    fn generic_setter_reports_mismatch_as_error() {
        let mut target = 0i64;
        let err = generic_setter(Box::new(String::from("tom")), &mut target)
            .unwrap_err();
        assert!(err.downcast_ref::<TypeMismatch>().is_some());
    }

    #[test]
    fn int32_setter_narrows_wide_intermediate() {
        let mut target = 0i32;
        int32_value_setter(Box::new(-12i64), &mut target).unwrap();
        assert_eq!(target, -12);
    }

    #[test]
    fn int32_setter_rejects_non_integer_intermediate() {
        let mut target = 0i32;
        let err = int32_value_setter(Box::new(1.5f64), &mut target).unwrap_err();
        let mismatch = err.downcast_ref::<TypeMismatch>().unwrap();
        assert_eq!(mismatch.value_type, std::any::type_name::<f64>());
    }

    #[test]
    fn int_setter_narrows_onto_isize() {
        let mut target = 0isize;
        int_value_setter(Box::new(26i64), &mut target).unwrap();
        assert_eq!(target, 26);
    }

    #[test]
    fn float32_setter_narrows_wide_intermediate() {
        let mut target = 0f32;
        float32_value_setter(Box::new(1.5f64), &mut target).unwrap();
        assert_eq!(target, 1.5);
    }

    #[test]
    fn generic_sentinel_is_not_a_builtin_field_type() {
        let setters = default_value_setters();
        assert!(setters.contains_key(&generic_type()));
        assert_ne!(generic_type(), TypeId::of::<i32>());
        assert_ne!(generic_type(), TypeId::of::<()>());
    }
}
