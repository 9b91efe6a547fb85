extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields};

const REQUIRED_FIELDS: [&str; 2] = ["position", "radius"];

#[proc_macro_derive(Entity)]
pub fn entity_derive(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match missing_fields(&input) {
        Ok(()) => implement_entity(&input),
        Err(error) => error,
    };

    TokenStream::from(expanded)
}

/// The entity needs named `position` and `radius` fields
fn missing_fields(input: &DeriveInput) -> Result<(), TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref().map(|i| i.to_string()))
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        },
        _ => {
            return Err(quote_spanned! { input.span() =>
                compile_error!("#[derive(Entity)] only supports structs");
            });
        }
    };

    for required in REQUIRED_FIELDS {
        if !fields.iter().any(|f| f == required) {
            let message = format!("#[derive(Entity)] requires a `{}` field", required);
            return Err(quote_spanned! { input.ident.span() =>
                compile_error!(#message);
            });
        }
    }
    Ok(())
}

fn implement_entity(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident; // Struct name
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Generate the trait implementation
    quote! {
        impl #impl_generics ::ast_lib::CosmicEntity for #name #ty_generics #where_clause {
            fn get_position(&self) -> ::macroquad::prelude::Vec2 { self.position }
            fn get_radius(&self) -> f32 { self.radius }
        }
    }
}
