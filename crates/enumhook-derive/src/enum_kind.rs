use crate::util::{ScalarLit, reject_generics, type_path};
use darling::{Error as DarlingError, FromDeriveInput, FromVariant, ast::Data};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Expr, Generics, Ident, Meta};

///
/// EnumKindInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(enum_kind), supports(enum_unit))]
struct EnumKindInput {
    ident: Ident,
    generics: Generics,
    data: Data<EnumKindVariant, ()>,

    /// Overrides the default `module_path!()::Name` type path.
    #[darling(default)]
    path: Option<String>,
}

///
/// EnumKindVariant
///

#[derive(FromVariant)]
#[darling(forward_attrs(value))]
struct EnumKindVariant {
    ident: Ident,
    attrs: Vec<Attribute>,
}

impl EnumKindVariant {
    fn value(&self) -> Result<ScalarLit, DarlingError> {
        let mut values = self.attrs.iter().filter(|attr| attr.path().is_ident("value"));

        let Some(attr) = values.next() else {
            return Err(DarlingError::custom(format!(
                "variant '{}' is missing #[value = ...]",
                self.ident
            ))
            .with_span(&self.ident));
        };
        if let Some(extra) = values.next() {
            return Err(DarlingError::custom("duplicate #[value] attribute").with_span(extra));
        }

        // `#[value = "A"]` for literals, `#[value(-1)]` for negative integers
        match &attr.meta {
            Meta::NameValue(nv) => ScalarLit::from_expr(&nv.value),
            Meta::List(list) => {
                let expr = list.parse_args::<Expr>().map_err(DarlingError::from)?;
                ScalarLit::from_expr(&expr)
            }
            Meta::Path(path) => Err(
                DarlingError::custom("expected #[value = ...] or #[value(...)]").with_span(path),
            ),
        }
    }
}

// derive_enum_kind
pub fn derive_enum_kind(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match EnumKindInput::from_derive_input(&input).and_then(|node| expand(&node)) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(node: &EnumKindInput) -> Result<TokenStream, DarlingError> {
    reject_generics(&node.generics, "EnumKind")?;

    let Data::Enum(variants) = &node.data else {
        return Err(DarlingError::unsupported_shape("struct").with_span(&node.ident));
    };
    if variants.is_empty() {
        return Err(
            DarlingError::custom("EnumKind requires at least one variant").with_span(&node.ident)
        );
    }

    // Phase 1: collect every member value, reporting all problems at once.
    let mut errors = DarlingError::accumulator();
    let mut values: Vec<ScalarLit> = Vec::with_capacity(variants.len());
    for variant in variants {
        let Some(value) = errors.handle(variant.value()) else {
            continue;
        };

        if values.contains(&value) {
            errors.push(
                DarlingError::custom(format!("duplicate enum member value {value}"))
                    .with_span(&variant.ident),
            );
        }
        values.push(value);
    }
    errors.finish()?;

    // Phase 2: emit the model and the typed view.
    let ident = &node.ident;
    let path = type_path(node.path.as_ref(), ident);

    let members = variants.iter().zip(&values).map(|(variant, value)| {
        let name = variant.ident.to_string();
        let value = value.to_member_value();

        quote! {
            ::enumhook::enums::EnumMember {
                name: #name,
                value: #value,
            }
        }
    });
    let from_index_arms = variants.iter().enumerate().map(|(index, variant)| {
        let variant = &variant.ident;
        quote!(#index => ::core::option::Option::Some(Self::#variant),)
    });
    let index_arms = variants.iter().enumerate().map(|(index, variant)| {
        let variant = &variant.ident;
        quote!(Self::#variant => #index,)
    });

    Ok(quote! {
        impl ::enumhook::traits::Path for #ident {
            const PATH: &'static str = #path;
        }

        impl ::enumhook::traits::EnumKind for #ident {
            const MODEL: &'static ::enumhook::enums::EnumModel = &::enumhook::enums::EnumModel {
                path: <Self as ::enumhook::traits::Path>::PATH,
                members: &[#(#members),*],
            };

            fn from_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#from_index_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn index(self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }
        }

        impl ::core::convert::From<#ident> for ::enumhook::value::Value {
            fn from(value: #ident) -> Self {
                ::enumhook::value::Value::Enum(::enumhook::traits::EnumKind::to_enum_ref(value))
            }
        }
    })
}

///
/// TESTS
///
