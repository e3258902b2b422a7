use crate::util::{reject_generics, type_path};
use darling::{Error as DarlingError, FromDeriveInput, FromField, ast::Data};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident};

///
/// EntityInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityInput {
    ident: Ident,
    generics: Generics,
    data: Data<(), EntityField>,

    #[darling(default)]
    path: Option<String>,
}

///
/// EntityField
///

#[derive(FromField)]
#[darling(attributes(field))]
struct EntityField {
    ident: Option<Ident>,

    /// Declared enum type name, relative to the entity's namespace or
    /// fully qualified.
    #[darling(default)]
    enum_type: Option<String>,

    /// Leave the field out of the record model.
    #[darling(default)]
    skip: bool,
}

impl EntityField {
    fn validate(&self) -> Result<(), DarlingError> {
        match (&self.enum_type, self.skip) {
            (Some(_), true) => Err(DarlingError::custom(
                "a skipped field cannot declare an enum_type",
            )
            .with_span(&self.ident)),
            (Some(declared), false) if declared.trim().is_empty() => {
                Err(DarlingError::custom("enum_type must not be empty").with_span(&self.ident))
            }
            _ => Ok(()),
        }
    }
}

// derive_entity
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match EntityInput::from_derive_input(&input).and_then(|node| expand(&node)) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(node: &EntityInput) -> Result<TokenStream, DarlingError> {
    reject_generics(&node.generics, "Entity")?;

    let Data::Struct(fields) = &node.data else {
        return Err(DarlingError::unsupported_shape("enum").with_span(&node.ident));
    };

    let mut errors = DarlingError::accumulator();
    for field in fields.iter() {
        errors.handle(field.validate());
    }
    errors.finish()?;

    let mapped: Vec<(&Ident, &EntityField)> = fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, field)))
        .collect();

    let ident = &node.ident;
    let path = type_path(node.path.as_ref(), ident);

    let field_models = mapped.iter().map(|(field_ident, field)| {
        let name = field_ident.to_string();
        let attributes = field.enum_type.as_ref().map(|declared| {
            quote! {
                ::enumhook::model::Attribute {
                    name: ::enumhook::ENUM_ATTRIBUTE,
                    value: #declared,
                }
            }
        });
        let attributes = attributes.into_iter();

        quote! {
            ::enumhook::model::FieldModel {
                name: #name,
                attributes: &[#(#attributes),*],
            }
        }
    });
    let get_arms = mapped.iter().map(|(field_ident, _)| {
        let name = field_ident.to_string();
        quote!(#name => ::core::option::Option::Some(&self.#field_ident),)
    });
    let get_mut_arms = mapped.iter().map(|(field_ident, _)| {
        let name = field_ident.to_string();
        quote!(#name => ::core::option::Option::Some(&mut self.#field_ident),)
    });

    Ok(quote! {
        impl ::enumhook::traits::Path for #ident {
            const PATH: &'static str = #path;
        }

        impl ::enumhook::traits::EntityKind for #ident {
            const MODEL: &'static ::enumhook::model::RecordModel = &::enumhook::model::RecordModel {
                path: <Self as ::enumhook::traits::Path>::PATH,
                fields: &[#(#field_models),*],
            };
        }

        impl ::enumhook::traits::Entity for #ident {
            fn model(&self) -> &'static ::enumhook::model::RecordModel {
                <Self as ::enumhook::traits::EntityKind>::MODEL
            }

            fn field(&self, name: &str) -> ::core::option::Option<&::enumhook::value::Value> {
                match name {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut ::enumhook::value::Value> {
                match name {
                    #(#get_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

///
/// TESTS
///
