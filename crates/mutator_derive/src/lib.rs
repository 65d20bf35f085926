//! Derive macros for mutator record types.
//!
//! `#[derive(Record)]` implements `mutator::reflect::Record` for a struct with named fields:
//! - `fields()`: one descriptor per field, carrying the `#[mutate(...)]` annotations
//! - `field()` / `field_mut()`: index-based `&dyn Any` access to each field
//!
//! # Annotation syntax
//! ```ignore
//! #[derive(Default, Record)]
//! pub struct Frog {
//!     #[mutate(Prince = "name")]
//!     pub name: String,
//!     #[mutate(Prince = "nationality")]
//!     pub species: String,
//!     #[mutate(readonly)]
//!     pub legs: i64,
//! }
//! ```
//!
//! Each `Type = "field"` pair says: when transforming into `Type`, this field's value goes to `Type`'s field `field`.
//! Keys are full types, so a generic destination is named by its instantiation (`Pond<i64> = "value"`). Field names
//! are matched without the raw-identifier prefix: `"type"` names a field declared as `r#type`.
//! `readonly` keeps transformers from writing the field when the struct is a destination; private fields (no `pub`) are
//! treated the same way.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{
    Data, DeriveInput, Field, Fields, GenericParam, LitStr, Token, Type, Visibility, parse_macro_input, parse_quote,
};

/// Generates the `Record` trait implementation for reflection-driven transformers.
///
/// # Example
/// ```ignore
/// #[derive(Default, Record)]
/// pub struct Tadpole {
///     #[mutate(Frog = "name")]
///     pub name: String,
///     #[mutate(Frog = "legs")]
///     pub leglets: i64,
/// }
///
/// // Generates (abridged):
/// impl ::mutator::reflect::Record for Tadpole {
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new::<String>("name", 0, true).annotate::<Frog>("name"),
///             FieldDescriptor::new::<i64>("leglets", 1, true).annotate::<Frog>("legs"),
///         ]
///     }
///     fn field(&self, index: usize) -> Option<&dyn Any> { /* match on index */ }
///     fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any> { /* match on index */ }
/// }
/// ```
#[proc_macro_derive(Record, attributes(mutate))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed `#[mutate(...)]` options for one field.
#[derive(Default)]
struct FieldOptions {
    readonly: bool,
    targets: Vec<(Type, LitStr)>,
}

/// One entry inside `#[mutate(...)]`.
enum MutateArg {
    Readonly,
    Target(Type, LitStr),
}

impl Parse for MutateArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ty: Type = input.parse()?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            return Ok(Self::Target(ty, input.parse()?));
        }
        match &ty {
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("readonly") => Ok(Self::Readonly),
            _ => Err(syn::Error::new_spanned(
                ty,
                "expected `readonly` or `Type = \"field\"`",
            )),
        }
    }
}

fn expand_record(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ));
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record only supports structs")),
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut getters = Vec::with_capacity(fields.len());
    let mut setters = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let ident_str = ident.unraw().to_string();
        let ty = &field.ty;
        let options = parse_field_options(field)?;
        let writable = !options.readonly && !matches!(field.vis, Visibility::Inherited);

        let annotations = options.targets.iter().map(|(target, target_field)| {
            quote!(.annotate::<#target>(#target_field))
        });

        descriptors.push(quote! {
            ::mutator::reflect::FieldDescriptor::new::<#ty>(#ident_str, #index, #writable) #(#annotations)*
        });
        getters.push(quote!(#index => ::std::option::Option::Some(&self.#ident)));
        setters.push(quote!(#index => ::std::option::Option::Some(&mut self.#ident)));
    }

    // Records are `'static` and their field values are cloned, so every type parameter must be too.
    let mut bounded = Vec::new();
    for param in &input.generics.params {
        match param {
            GenericParam::Type(ty) => bounded.push(ty.ident.clone()),
            GenericParam::Lifetime(lt) => {
                return Err(syn::Error::new_spanned(
                    lt,
                    "Record does not support lifetime parameters; records must be 'static",
                ));
            }
            GenericParam::Const(_) => {}
        }
    }
    let self_ty = {
        let (_, ty_generics, _) = input.generics.split_for_impl();
        quote!(#name #ty_generics)
    };
    let has_type_params = !bounded.is_empty();
    let where_clause = input.generics.make_where_clause();
    for ident in bounded {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::std::clone::Clone + 'static));
    }
    if has_type_params {
        where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::std::default::Default));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::mutator::reflect::Record for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::mutator::reflect::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn field(&self, index: usize) -> ::std::option::Option<&dyn ::std::any::Any> {
                match index {
                    #(#getters,)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                match index {
                    #(#setters,)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

fn parse_field_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("mutate") {
            continue;
        }
        let args = attr.parse_args_with(Punctuated::<MutateArg, Token![,]>::parse_terminated)?;
        for arg in args {
            let (target, target_field) = match arg {
                MutateArg::Readonly => {
                    options.readonly = true;
                    continue;
                }
                MutateArg::Target(target, target_field) => (target, target_field),
            };

            if target_field.value().trim().is_empty() {
                return Err(syn::Error::new_spanned(
                    &target_field,
                    "destination field name must not be empty",
                ));
            }

            let key = type_key(&target);
            if options.targets.iter().any(|(seen, _)| type_key(seen) == key) {
                return Err(syn::Error::new_spanned(
                    &target,
                    format!("duplicate mapping for destination `{key}`; a field may name one destination field per type"),
                ));
            }
            options.targets.push((target, target_field));
        }
    }

    Ok(options)
}

fn type_key(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}
