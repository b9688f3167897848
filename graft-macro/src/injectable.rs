use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Ident, ItemStruct, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

struct InjectableArgs {
    implements: Vec<Type>,
}

impl Parse for InjectableArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut implements = Vec::new();

        while !input.is_empty() {
            let key: Ident = input.parse()?;

            match key.to_string().as_str() {
                "implements" => {
                    let content;
                    syn::parenthesized!(content in input);
                    let types: Punctuated<Type, Token![,]> =
                        content.parse_terminated(Type::parse, Token![,])?;
                    implements.extend(types);
                }
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown injectable option `{}`, expected `implements`", other),
                    ));
                }
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(InjectableArgs { implements })
    }
}

pub fn injectable_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as InjectableArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let upcasts = args.implements.iter().map(|iface| {
        quote! {
            impl #impl_generics ::graft::Implements<#iface> for #struct_name #ty_generics #where_clause {
                fn upcast(instance: ::std::sync::Arc<Self>) -> ::std::sync::Arc<#iface> {
                    instance
                }
            }
        }
    });

    let expanded = quote! {
        #input

        impl #impl_generics ::graft::Injectable for #struct_name #ty_generics #where_clause {}

        #(#upcasts)*
    };

    TokenStream::from(expanded)
}
