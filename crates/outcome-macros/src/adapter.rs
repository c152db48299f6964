use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{FnArg, Ident, ItemFn, parse_macro_input};

/// Implementation of the `#[adapter(name)]` attribute macro.
///
/// Leaves the decorated function unchanged and appends a
/// `#[::outcome_core::linkme::distributed_slice]` static that adds it to
/// `outcome_core::BUILTIN_ADAPTERS` under `name`.
pub fn adapter(attr: TokenStream, item: TokenStream) -> TokenStream {
    let name = parse_macro_input!(attr as Ident);
    let func = parse_macro_input!(item as ItemFn);

    let typed_inputs = func
        .sig
        .inputs
        .iter()
        .filter(|arg| matches!(arg, FnArg::Typed(_)))
        .count();
    if typed_inputs != 1 || func.sig.inputs.len() != 1 {
        return syn::Error::new_spanned(
            &func.sig.inputs,
            "adapter functions take exactly one argument: the `outcome_core::Callback` to run",
        )
        .into_compile_error()
        .into();
    }

    if let Some(asyncness) = &func.sig.asyncness {
        return syn::Error::new_spanned(asyncness, "adapter functions must not be async")
            .into_compile_error()
            .into();
    }

    let fn_name = &func.sig.ident;
    let name_str = name.to_string();
    let static_name = Ident::new(
        &format!("_ADAPTER_REGISTER_{}", name_str.to_uppercase()),
        Span::call_site(),
    );

    quote! {
        #func

        #[::outcome_core::linkme::distributed_slice(::outcome_core::BUILTIN_ADAPTERS)]
        #[linkme(crate = ::outcome_core::linkme)]
        static #static_name: ::outcome_core::BuiltinAdapter = ::outcome_core::BuiltinAdapter {
            name: #name_str,
            convert: #fn_name,
        };
    }
    .into()
}
