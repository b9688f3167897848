use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, Type, parse_macro_input};

pub fn provider_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(attr as Type);
    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::graft::ProviderDelegate for #struct_name #ty_generics #where_clause {
            type Target = #target;
        }
    };

    TokenStream::from(expanded)
}
