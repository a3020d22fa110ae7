//! Tag-driven query-parameter decoder.
//!
//! Populates the fields of a struct from decoded query parameters
//! ([`UrlValues`]), driven by per-field tags. Each field declares the
//! parameter that feeds it and, for list-shaped fields, an optional
//! delimiter override; a type-keyed registry of value parsers converts the
//! raw string and a setter registry assigns the result.
//!
//! ```
//! use queryparam::{parse, Record, UrlValues};
//!
//! #[derive(Record, Default)]
//! struct RequestData {
//!     #[tag(queryparam = "name")]
//!     name: String,
//!
//!     #[tag(queryparam = "age")]
//!     age: i64,
//! }
//!
//! let mut values = UrlValues::new();
//! values.set("name", "Tom");
//! values.set("age", "23");
//!
//! let mut data = RequestData::default();
//! parse(&values, &mut data).unwrap();
//!
//! assert_eq!(data.name, "Tom");
//! assert_eq!(data.age, 23);
//! ```

pub mod error;
pub mod parser;
pub mod parsers;
pub mod record;
pub mod setters;
pub mod value;
pub mod values;

pub use queryparam_derive::Record;

pub use error::{BoxError, Error};
pub use parser::{parse, Parser};
pub use parsers::{Present, ValueParser};
pub use record::{FieldDescriptor, Record};
pub use setters::ValueSetter;
pub use value::{AnyValue, TypeMismatch};
pub use values::UrlValues;
