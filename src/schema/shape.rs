// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field kinds and storage types.
//!
//! Both are computed once per field from its Rust type and then dispatched
//! on with exhaustive matches.
//!
//! # Type Mapping Table
//!
//! | Rust Type | [`ColumnShape`] | [`DataType`] | [`JsonType`] |
//! |-----------|-----------------|--------------|--------------|
//! | `i8`..`i128`, `isize` | `Integer` | `Int` | `integer` |
//! | `u8`..`u128`, `usize` | `Integer` | `Uint` | `integer` |
//! | `f32`, `f64` | `Float` | `Float` | `number` |
//! | `String`, `str`, `char` | `String` | `String` | `string` |
//! | `bool` | `Boolean` | `Bool` | `boolean` |
//! | `DateTime<Utc>`, `NaiveDate`, ... | `Struct` | `Time` | `string` |
//! | `Vec<u8>`, `[u8; N]` | `Slice` | `Bytes` | `string` |
//! | `Vec<T>`, `[T]` | `Slice` | `Custom("array")` | `string` |
//! | `Option<T>`, `Box<T>`, `&T` | `Pointer(T)` | as `T` | as `T` |
//! | `Uuid` | `String` | `Custom("uuid")` | `string` |
//! | `Decimal` | `Struct` | `Custom("decimal")` | `string` |
//! | `HashMap<K, V>`, `serde_json::Value` | `Other` | `Custom("json")` | `string` |
//! | other paths | `Struct` | `Custom(snake_name)` | `string` |

use std::fmt;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use syn::{Path, Type};

use super::TypeIdentity;
use crate::source::types::first_type_argument;

const SIGNED: &[&str] = &["i8", "i16", "i32", "i64", "i128", "isize"];
const UNSIGNED: &[&str] = &["u8", "u16", "u32", "u64", "u128", "usize"];
const POINTERS: &[&str] = &["Option", "Box", "Rc", "Arc"];
const SEQUENCES: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet"];
const MAPS: &[&str] = &["HashMap", "BTreeMap", "Value", "Json"];
const TIMES: &[&str] = &[
    "DateTime",
    "NaiveDate",
    "NaiveTime",
    "NaiveDateTime",
    "SystemTime",
    "OffsetDateTime",
    "PrimitiveDateTime"
];

/// Kind of a field's type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnShape {
    /// Any integer width, signed or not.
    Integer,

    /// `f32` / `f64`.
    Float,

    /// Text.
    String,

    /// `bool`.
    Boolean,

    /// A named record type.
    Struct(TypeIdentity),

    /// A sequence.
    Slice,

    /// Maps, tuples and everything else.
    #[default]
    Other,

    /// Indirection (`Option`, `Box`, references) around another shape.
    Pointer(Box<ColumnShape>)
}

impl ColumnShape {
    /// Classify a Rust type. `pkg_path` resolves single-segment paths.
    #[must_use]
    pub fn from_type(ty: &Type, pkg_path: &str) -> Self {
        match ty {
            Type::Path(type_path) if type_path.qself.is_none() => {
                let Some(segment) = type_path.path.segments.last() else {
                    return Self::Other;
                };
                let ident = segment.ident.to_string();
                match ident.as_str() {
                    name if POINTERS.contains(&name) => first_type_argument(&segment.arguments)
                        .map_or(Self::Other, |inner| {
                            Self::Pointer(Box::new(Self::from_type(inner, pkg_path)))
                        }),
                    name if SEQUENCES.contains(&name) => Self::Slice,
                    name if MAPS.contains(&name) => Self::Other,
                    name if SIGNED.contains(&name) || UNSIGNED.contains(&name) => Self::Integer,
                    "f32" | "f64" => Self::Float,
                    "String" | "str" | "char" | "Uuid" => Self::String,
                    "bool" => Self::Boolean,
                    _ => Self::Struct(path_identity(&type_path.path, pkg_path))
                }
            }
            Type::Reference(reference) => {
                Self::Pointer(Box::new(Self::from_type(&reference.elem, pkg_path)))
            }
            Type::Ptr(ptr) => Self::Pointer(Box::new(Self::from_type(&ptr.elem, pkg_path))),
            Type::Array(_) | Type::Slice(_) => Self::Slice,
            Type::Paren(paren) => Self::from_type(&paren.elem, pkg_path),
            Type::Group(group) => Self::from_type(&group.elem, pkg_path),
            _ => Self::Other
        }
    }

    /// Shape with all pointer indirection removed.
    #[must_use]
    pub fn base(&self) -> &Self {
        match self {
            Self::Pointer(inner) => inner.base(),
            other => other
        }
    }

    /// Check for pointer indirection.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }
}

/// Identity of the type a path names.
///
/// Leading `crate` is dropped; a bare name belongs to `pkg_path`.
fn path_identity(path: &Path, pkg_path: &str) -> TypeIdentity {
    let mut segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let name = segments.pop().unwrap_or_default();
    if segments.first().is_some_and(|first| first == "crate") {
        segments.remove(0);
    }

    let pkg = if segments.is_empty() {
        pkg_path.to_string()
    } else {
        segments.join("/")
    };
    TypeIdentity::new(pkg, name)
}

/// Storage data type of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Text.
    #[default]
    String,

    /// Signed integer.
    Int,

    /// Unsigned integer.
    Uint,

    /// Boolean.
    Bool,

    /// Floating point.
    Float,

    /// Date and/or time.
    Time,

    /// Byte sequence.
    Bytes,

    /// Anything else, by name.
    Custom(String)
}

impl DataType {
    /// Map a Rust type to its storage type. Indirection is transparent.
    #[must_use]
    pub fn from_type(ty: &Type) -> Self {
        match ty {
            Type::Path(type_path) if type_path.qself.is_none() => {
                let Some(segment) = type_path.path.segments.last() else {
                    return Self::Custom("unknown".to_string());
                };
                let inner = first_type_argument(&segment.arguments);
                let ident = segment.ident.to_string();
                match ident.as_str() {
                    name if POINTERS.contains(&name) => {
                        inner.map_or_else(|| Self::Custom(name.to_case(Case::Snake)), Self::from_type)
                    }
                    "Vec" if inner.is_some_and(is_byte) => Self::Bytes,
                    "Bytes" => Self::Bytes,
                    name if SEQUENCES.contains(&name) => Self::Custom("array".to_string()),
                    name if MAPS.contains(&name) => Self::Custom("json".to_string()),
                    name if SIGNED.contains(&name) => Self::Int,
                    name if UNSIGNED.contains(&name) => Self::Uint,
                    "f32" | "f64" => Self::Float,
                    "String" | "str" | "char" => Self::String,
                    "bool" => Self::Bool,
                    name if TIMES.contains(&name) => Self::Time,
                    "Uuid" => Self::Custom("uuid".to_string()),
                    "Decimal" | "BigDecimal" => Self::Custom("decimal".to_string()),
                    "IpAddr" | "Ipv4Addr" | "Ipv6Addr" => Self::Custom("inet".to_string()),
                    name => Self::Custom(name.to_case(Case::Snake))
                }
            }
            Type::Reference(reference) => match reference.elem.as_ref() {
                Type::Slice(slice) if is_byte(&slice.elem) => Self::Bytes,
                elem => Self::from_type(elem)
            },
            Type::Array(array) if is_byte(&array.elem) => Self::Bytes,
            Type::Array(_) | Type::Slice(_) => Self::Custom("array".to_string()),
            Type::Paren(paren) => Self::from_type(&paren.elem),
            Type::Group(group) => Self::from_type(&group.elem),
            _ => Self::Custom("unknown".to_string())
        }
    }

    /// Name of the storage type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Time => "time",
            Self::Bytes => "bytes",
            Self::Custom(name) => name
        }
    }

    /// Coarse JSON category of the storage type.
    #[must_use]
    pub fn json_type(&self) -> JsonType {
        match self {
            Self::Int | Self::Uint => JsonType::Integer,
            Self::Bool => JsonType::Boolean,
            Self::Float => JsonType::Number,
            Self::String | Self::Time | Self::Bytes | Self::Custom(_) => JsonType::String
        }
    }

    /// Check for a known non-record storage type.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        match self {
            Self::Custom(name) => matches!(name.as_str(), "uuid" | "decimal" | "inet" | "json"),
            _ => true
        }
    }
}

fn is_byte(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.path.is_ident("u8"))
}

/// Coarse JSON category of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// JSON string.
    #[default]
    String,

    /// JSON integer.
    Integer,

    /// JSON boolean.
    Boolean,

    /// JSON number.
    Number
}

impl JsonType {
    /// Lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Number => "number"
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn shape(ty: Type) -> ColumnShape {
        ColumnShape::from_type(&ty, "shop")
    }

    #[test]
    fn scalar_shapes() {
        assert_eq!(shape(parse_quote!(i64)), ColumnShape::Integer);
        assert_eq!(shape(parse_quote!(u8)), ColumnShape::Integer);
        assert_eq!(shape(parse_quote!(f32)), ColumnShape::Float);
        assert_eq!(shape(parse_quote!(String)), ColumnShape::String);
        assert_eq!(shape(parse_quote!(bool)), ColumnShape::Boolean);
        assert_eq!(shape(parse_quote!(HashMap<String, i32>)), ColumnShape::Other);
        assert_eq!(shape(parse_quote!((i32, i32))), ColumnShape::Other);
    }

    #[test]
    fn struct_identity_resolution() {
        assert_eq!(
            shape(parse_quote!(Category)),
            ColumnShape::Struct(TypeIdentity::new("shop", "Category"))
        );
        assert_eq!(
            shape(parse_quote!(crate::billing::Invoice)),
            ColumnShape::Struct(TypeIdentity::new("billing", "Invoice"))
        );
        assert_eq!(
            shape(parse_quote!(chrono::DateTime<Utc>)),
            ColumnShape::Struct(TypeIdentity::new("chrono", "DateTime"))
        );
    }

    #[test]
    fn pointers_wrap_and_base_strips() {
        let ty = shape(parse_quote!(Option<Box<Category>>));
        assert!(ty.is_pointer());
        assert_eq!(
            ty.base(),
            &ColumnShape::Struct(TypeIdentity::new("shop", "Category"))
        );
        assert_eq!(shape(parse_quote!(&str)).base(), &ColumnShape::String);
        assert_eq!(shape(parse_quote!(Vec<Category>)), ColumnShape::Slice);
        assert_eq!(shape(parse_quote!([u8; 16])), ColumnShape::Slice);
    }

    #[test]
    fn data_types() {
        let data = |ty: Type| DataType::from_type(&ty);
        assert_eq!(data(parse_quote!(i32)), DataType::Int);
        assert_eq!(data(parse_quote!(Option<u64>)), DataType::Uint);
        assert_eq!(data(parse_quote!(f64)), DataType::Float);
        assert_eq!(data(parse_quote!(DateTime<Utc>)), DataType::Time);
        assert_eq!(data(parse_quote!(Vec<u8>)), DataType::Bytes);
        assert_eq!(data(parse_quote!(&[u8])), DataType::Bytes);
        assert_eq!(data(parse_quote!(Vec<String>)), DataType::Custom("array".to_string()));
        assert_eq!(data(parse_quote!(rust_decimal::Decimal)), DataType::Custom("decimal".to_string()));
        assert_eq!(data(parse_quote!(OrderItem)), DataType::Custom("order_item".to_string()));
    }

    #[test]
    fn json_types() {
        assert_eq!(DataType::Int.json_type(), JsonType::Integer);
        assert_eq!(DataType::Uint.json_type(), JsonType::Integer);
        assert_eq!(DataType::Bool.json_type(), JsonType::Boolean);
        assert_eq!(DataType::Float.json_type(), JsonType::Number);
        assert_eq!(DataType::Time.json_type(), JsonType::String);
        assert_eq!(DataType::Bytes.json_type(), JsonType::String);
        assert_eq!(DataType::Custom("uuid".to_string()).json_type(), JsonType::String);
        assert_eq!(serde_json::to_string(&JsonType::Number).unwrap(), "\"number\"");
    }

    #[test]
    fn scalar_custom_types() {
        assert!(DataType::Time.is_scalar());
        assert!(DataType::Custom("decimal".to_string()).is_scalar());
        assert!(!DataType::Custom("category".to_string()).is_scalar());
    }
}
