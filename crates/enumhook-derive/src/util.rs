use darling::Error as DarlingError;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, ExprLit, ExprUnary, Generics, Ident, Lit, UnOp};

/// Path tokens for a derived type: the explicit `path = "..."` if given,
/// otherwise the defining module's path joined with the type name.
pub fn type_path(explicit: Option<&String>, ident: &Ident) -> TokenStream {
    match explicit {
        Some(path) => quote!(#path),
        None => quote!(::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident))),
    }
}

/// Derived types are registered as `'static` models, so they cannot be generic.
pub fn reject_generics(generics: &Generics, derive: &str) -> Result<(), DarlingError> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(DarlingError::custom(format!("{derive} cannot be derived for generic types"))
            .with_span(generics))
    }
}

///
/// ScalarLit
/// Literal member value as written in `#[value = ...]`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScalarLit {
    Int(i64),
    Text(String),
}

impl ScalarLit {
    pub fn from_expr(expr: &Expr) -> Result<Self, DarlingError> {
        match expr {
            Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(Self::Text(s.value())),
            Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => i
                .base10_parse::<i64>()
                .map(Self::Int)
                .map_err(|err| DarlingError::custom(err.to_string()).with_span(i)),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr: inner,
                ..
            }) => match inner.as_ref() {
                Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => format!("-{}", i.base10_digits())
                    .parse::<i64>()
                    .map(Self::Int)
                    .map_err(|err| DarlingError::custom(err.to_string()).with_span(i)),
                other => Err(Self::unsupported(other)),
            },
            Expr::Group(group) => Self::from_expr(&group.expr),
            other => Err(Self::unsupported(other)),
        }
    }

    fn unsupported(expr: &Expr) -> DarlingError {
        DarlingError::custom("enum member values must be string or integer literals")
            .with_span(expr)
    }

    pub fn to_member_value(&self) -> TokenStream {
        match self {
            Self::Int(v) => quote!(::enumhook::value::MemberValue::Int(#v)),
            Self::Text(v) => quote!(::enumhook::value::MemberValue::Text(#v)),
        }
    }
}

impl std::fmt::Display for ScalarLit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}
