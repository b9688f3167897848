use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemTrait, parse_macro_input};

pub fn interface_impl(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemTrait);
    let trait_name = &input.ident;

    // `dyn Trait<T>` would need one key per instantiation
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[interface] does not support generic traits, use `dependency!` per instantiation",
        )
        .to_compile_error()
        .into();
    }

    let expanded = quote! {
        #input

        impl ::graft::Dependency for dyn #trait_name {}
    };

    TokenStream::from(expanded)
}
