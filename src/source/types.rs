// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Canonical type signatures.
//!
//! Turns an arbitrarily nested `syn::Type` into a stable string. Unknown
//! shapes degrade to [`UNKNOWN`] instead of failing, and every placeholder
//! is itself a valid Rust type so reassembled declarations still parse.
//!
//! | Type expression | Signature |
//! |-----------------|-----------|
//! | `String` | `String` |
//! | `*const T` / `*mut T` | `*const T` / `*mut T` |
//! | `&'a mut T` | `&'a mut T` |
//! | `[T; 4]` | `[T; 4]` |
//! | `[T]` | `[T]` |
//! | `chrono::DateTime<Utc>` | `chrono::DateTime<Utc>` |
//! | `HashMap<K, V>` | `HashMap<K, V>` |
//! | `dyn Trait`, `impl Trait` | `dyn Any` |
//! | `fn(A) -> B`, `m!()`, `_` | `_` |
//! | `(A, B)` | `(A, B)` |
//! | `<T as Trait>::Out` | `unknown` |

use quote::ToTokens;
use syn::{Expr, GenericArgument, Path, PathArguments, ReturnType, Type};

/// Signature of types the resolver does not understand.
pub const UNKNOWN: &str = "unknown";

/// Placeholder for trait objects and `impl Trait`.
pub const INTERFACE: &str = "dyn Any";

/// Placeholder for anonymous and opaque types.
pub const OPAQUE: &str = "_";

/// Render the canonical signature of a type.
#[must_use]
pub fn type_signature(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => path_signature(&type_path.path),
        Type::Ptr(ptr) => {
            let qualifier = if ptr.mutability.is_some() { "mut" } else { "const" };
            format!("*{} {}", qualifier, type_signature(&ptr.elem))
        }
        Type::Reference(reference) => {
            let mut out = String::from("&");
            if let Some(lifetime) = &reference.lifetime {
                out.push_str(&format!("'{} ", lifetime.ident));
            }
            if reference.mutability.is_some() {
                out.push_str("mut ");
            }
            out.push_str(&type_signature(&reference.elem));
            out
        }
        Type::Array(array) => format!(
            "[{}; {}]",
            type_signature(&array.elem),
            expr_signature(&array.len)
        ),
        Type::Slice(slice) => format!("[{}]", type_signature(&slice.elem)),
        Type::Tuple(tuple) => {
            let elems: Vec<String> = tuple.elems.iter().map(type_signature).collect();
            match elems.len() {
                1 => format!("({},)", elems[0]),
                _ => format!("({})", elems.join(", "))
            }
        }
        Type::TraitObject(_) | Type::ImplTrait(_) => INTERFACE.to_string(),
        Type::BareFn(_) | Type::Macro(_) | Type::Infer(_) => OPAQUE.to_string(),
        Type::Paren(paren) => type_signature(&paren.elem),
        Type::Group(group) => type_signature(&group.elem),
        Type::Never(_) => "!".to_string(),
        _ => UNKNOWN.to_string()
    }
}

/// Render a path with every segment and its generic arguments.
#[must_use]
pub fn path_signature(path: &Path) -> String {
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| {
            let ident = segment.ident.to_string();
            match &segment.arguments {
                PathArguments::None => ident,
                PathArguments::AngleBracketed(args) => {
                    let params: Vec<String> = args.args.iter().map(argument_signature).collect();
                    format!("{}<{}>", ident, params.join(", "))
                }
                PathArguments::Parenthesized(args) => {
                    let inputs: Vec<String> = args.inputs.iter().map(type_signature).collect();
                    let output = match &args.output {
                        ReturnType::Default => String::new(),
                        ReturnType::Type(_, ty) => format!(" -> {}", type_signature(ty))
                    };
                    format!("{}({}){}", ident, inputs.join(", "), output)
                }
            }
        })
        .collect();

    let joined = segments.join("::");
    if path.leading_colon.is_some() {
        format!("::{joined}")
    } else {
        joined
    }
}

fn argument_signature(arg: &GenericArgument) -> String {
    match arg {
        GenericArgument::Type(ty) => type_signature(ty),
        GenericArgument::Lifetime(lifetime) => format!("'{}", lifetime.ident),
        GenericArgument::Const(expr) => expr_signature(expr),
        GenericArgument::AssocType(assoc) => {
            format!("{} = {}", assoc.ident, type_signature(&assoc.ty))
        }
        _ => UNKNOWN.to_string()
    }
}

/// Array lengths and const arguments: literals and paths only.
fn expr_signature(expr: &Expr) -> String {
    match expr {
        Expr::Lit(lit) => lit.lit.to_token_stream().to_string(),
        Expr::Path(path) if path.qself.is_none() => path_signature(&path.path),
        Expr::Paren(paren) => expr_signature(&paren.expr),
        Expr::Group(group) => expr_signature(&group.expr),
        _ => UNKNOWN.to_string()
    }
}

/// Last path segment of a type with `Option`/`Box` peeled, without
/// generics (e.g. `Option<rust_decimal::Decimal>` → `Decimal`).
#[must_use]
pub fn base_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            if segment.ident == "Option" || segment.ident == "Box" {
                return first_type_argument(&segment.arguments).and_then(base_type_name);
            }
            Some(segment.ident.to_string())
        }
        Type::Paren(paren) => base_type_name(&paren.elem),
        Type::Group(group) => base_type_name(&group.elem),
        _ => None
    }
}

/// First generic type argument of a path segment (`T` in `Vec<T>`).
#[must_use]
pub fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = arguments {
        return args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(input: &str) -> String {
        let ty: Type = syn::parse_str(input).unwrap();
        type_signature(&ty)
    }

    #[test]
    fn plain_identifiers() {
        assert_eq!(sig("String"), "String");
        assert_eq!(sig("i64"), "i64");
    }

    #[test]
    fn pointers_and_references() {
        assert_eq!(sig("*const u8"), "*const u8");
        assert_eq!(sig("*mut Node"), "*mut Node");
        assert_eq!(sig("&str"), "&str");
        assert_eq!(sig("&'a mut Vec<u8>"), "&'a mut Vec<u8>");
    }

    #[test]
    fn arrays_and_slices() {
        assert_eq!(sig("[u8; 16]"), "[u8; 16]");
        assert_eq!(sig("[u8; SIZE]"), "[u8; SIZE]");
        assert_eq!(sig("[u8; { 4 + 4 }]"), "[u8; unknown]");
        assert_eq!(sig("&[String]"), "&[String]");
    }

    #[test]
    fn qualified_paths_keep_segments() {
        assert_eq!(sig("chrono::DateTime<chrono::Utc>"), "chrono::DateTime<chrono::Utc>");
        assert_eq!(sig("::std::string::String"), "::std::string::String");
    }

    #[test]
    fn generic_instantiations() {
        assert_eq!(sig("Option<String>"), "Option<String>");
        assert_eq!(sig("HashMap<String, Vec<i32>>"), "HashMap<String, Vec<i32>>");
        assert_eq!(sig("Json<HashMap<String, Box<dyn Any>>>"), "Json<HashMap<String, Box<dyn Any>>>");
        assert_eq!(sig("Cow<'static, str>"), "Cow<'static, str>");
        assert_eq!(sig("Box<dyn Iterator<Item = u8>>"), "Box<dyn Any>");
        assert_eq!(sig("Pin<Box<dyn Fn(u8) -> bool>>"), "Pin<Box<dyn Any>>");
    }

    #[test]
    fn interfaces_and_opaque_shapes() {
        assert_eq!(sig("dyn Display"), "dyn Any");
        assert_eq!(sig("impl Display"), "dyn Any");
        assert_eq!(sig("fn(u8) -> u8"), "_");
        assert_eq!(sig("_"), "_");
        assert_eq!(sig("ty!()"), "_");
    }

    #[test]
    fn tuples_and_never() {
        assert_eq!(sig("()"), "()");
        assert_eq!(sig("(i32,)"), "(i32,)");
        assert_eq!(sig("(i32, String)"), "(i32, String)");
        assert_eq!(sig("(String)"), "String");
        assert_eq!(sig("!"), "!");
    }

    #[test]
    fn qualified_self_is_unknown() {
        assert_eq!(sig("<T as Iterator>::Item"), UNKNOWN);
    }

    #[test]
    fn signatures_parse_back() {
        for input in [
            "dyn Display",
            "fn() -> u8",
            "Option<Vec<&'a [u8; 4]>>",
            "(u8,)",
            "<T as Trait>::Out"
        ] {
            let signature = sig(input);
            assert!(
                syn::parse_str::<Type>(&signature).is_ok(),
                "signature `{signature}` should parse"
            );
        }
    }

    #[test]
    fn base_type_name_peels_wrappers() {
        let ty: Type = syn::parse_str("Option<rust_decimal::Decimal>").unwrap();
        assert_eq!(base_type_name(&ty).as_deref(), Some("Decimal"));
        let ty: Type = syn::parse_str("Box<Vec<u8>>").unwrap();
        assert_eq!(base_type_name(&ty).as_deref(), Some("Vec"));
        let ty: Type = syn::parse_str("&str").unwrap();
        assert_eq!(base_type_name(&ty), None);
    }
}
