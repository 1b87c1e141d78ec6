use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive macro that reads `#[pattern(bytes = "...")]` on a struct and
/// implements `FixedPattern` for it with its Bitap `pattern_mask` table
/// computed at compile time.
///
/// # Example
/// ```rust,ignore
/// #[derive(FixedPattern)]
/// #[pattern(bytes = "cad")]
/// pub struct Cad;
/// ```
#[proc_macro_derive(FixedPattern, attributes(pattern))]
pub fn derive_fixed_pattern(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match impl_fixed_pattern(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn impl_fixed_pattern(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let bytes_str = extract_bytes_attr(&input.attrs)?;
    let needle: Vec<u8> = bytes_str.bytes().collect();

    if needle.is_empty() {
        return Err(syn::Error::new_spanned(&input.ident, "pattern bytes must have >=1 bytes"));
    }
    if needle.len() > 64 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!("pattern bytes must be at most 64 bytes long, got {}", needle.len()),
        ));
    }

    let mask = build_pattern_mask(&needle);
    let mask_tokens = mask.iter().map(|m| quote! { #m });
    let pattern_tokens = needle.iter().map(|b| quote! { #b });
    let pattern_repr = bytes_str.clone();

    Ok(quote! {
        impl #impl_generics ::byteswar::FixedPattern for #name #ty_generics #where_clause {
            const PATTERN: &'static [u8] = &[#(#pattern_tokens),*];
            const PATTERN_MASK: [u64; 256] = [#(#mask_tokens),*];
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// The literal pattern this derive was given, as a string.
            #[allow(dead_code)]
            const PATTERN_STR: &'static str = #pattern_repr;
        }
    })
}

// ---------------------------------------------------------------------------
// Attribute parsing
// ---------------------------------------------------------------------------

fn extract_bytes_attr(attrs: &[syn::Attribute]) -> syn::Result<String> {
    for attr in attrs {
        if !attr.path().is_ident("pattern") {
            continue;
        }

        let mut found: Option<String> = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("bytes") {
                let value = meta.value()?; // consumes `=`
                let lit: Lit = value.parse()?;
                if let Lit::Str(ls) = lit {
                    found = Some(ls.value());
                    Ok(())
                } else {
                    Err(meta.error("expected string literal for `bytes`"))
                }
            } else {
                Err(meta.error("unknown pattern attribute key"))
            }
        })?;

        if let Some(s) = found {
            return Ok(s);
        }
    }
    Err(syn::Error::new(proc_macro2::Span::call_site(), "missing #[pattern(bytes = \"...\")] attribute"))
}

// ---------------------------------------------------------------------------
// Compile-time table construction (mirrors byteswar::scan::bitap_mask64)
// ---------------------------------------------------------------------------

fn build_pattern_mask(needle: &[u8]) -> [u64; 256] {
    let mut mask = [!0u64; 256];
    for (i, &b) in needle.iter().enumerate() {
        mask[b as usize] &= !(1u64 << i);
    }
    mask
}
