use parsing::validate_sddl;
use proc_macro_crate::{Error as MacroCrateError, FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

pub fn sddl_impl(input: &LitStr) -> Result<TokenStream, syn::Error> {
    let value = input.value();
    validate_sddl(&value).map_err(|e| syn::Error::new_spanned(input, e))?;
    let root = crate_root("win-sddl").map_err(|err| {
        syn::Error::new(
            proc_macro2::Span::call_site(),
            format!("Root crate not found:{err}"),
        )
    })?;

    let expanded = quote! {
        #root::internal::sddl_string_from_validated(#input)
    };
    Ok(expanded)
}

fn crate_root(name: &str) -> Result<TokenStream, MacroCrateError> {
    crate_name(name).map(|found| match found {
        FoundCrate::Name(found_name) => {
            let ident = syn::Ident::new(&found_name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        FoundCrate::Itself => quote!(crate),
    })
}
