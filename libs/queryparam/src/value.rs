use std::any::Any;

use crate::error::BoxError;

/// Returned when a converted value's type does not line up with the type the
/// assignment expects.
#[derive(Debug, thiserror::Error)]
#[error("value of type {value_type} does not match the destination type")]
pub struct TypeMismatch {
    /// Type name of the converted value, for diagnostics.
    pub value_type: &'static str,
}

/// Typed intermediate value produced by a value parser.
///
/// Blanket-implemented for every `'static` type, so custom value parsers can
/// box anything. `assign` is the guarded direct assignment: a destination of
/// the wrong type yields a [`TypeMismatch`] error, never a panic.
pub trait AnyValue: Any {
    /// Move the value into `target`, which must hold the same concrete type.
    fn assign(self: Box<Self>, target: &mut dyn Any) -> Result<(), BoxError>;

    /// Borrow the value for inspection (used by narrowing setters).
    fn as_any(&self) -> &dyn Any;

    /// Type name of the value, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl dyn AnyValue {
    /// Borrow the inner value as `T`, if that is its concrete type.
    ///
    /// Inspect boxed values through this helper (or through `&dyn AnyValue`):
    /// a `Box<dyn AnyValue>` is itself `'static` and so carries its own
    /// blanket impl, where `as_any` returns the box rather than its
    /// contents.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl<T: Any> AnyValue for T {
    fn assign(self: Box<Self>, target: &mut dyn Any) -> Result<(), BoxError> {
        match target.downcast_mut::<T>() {
            Some(slot) => {
                *slot = *self;
                Ok(())
            }
            None => Err(Box::new(TypeMismatch {
                value_type: std::any::type_name::<T>(),
            })),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
