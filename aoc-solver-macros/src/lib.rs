//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::{Attribute, DeriveInput, Lit, LitInt, parse_macro_input};

/// Derive `Solver` from the type's `PartSolver<N>` impls.
///
/// Requires `#[aoc_solver(max_parts = N)]`. Part `k` in `1..=N` is forwarded
/// to `<T as PartSolver<k>>::solve`; any other part answers
/// `SolveError::PartNotImplemented`.
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct SonarSweep;
///
/// impl AocParser for SonarSweep { /* ... */ }
/// impl PartSolver<1> for SonarSweep { /* ... */ }
/// impl PartSolver<2> for SonarSweep { /* ... */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = find_attr(&input.attrs, "aoc_solver", name)?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let value: LitInt = meta.value()?.parse()?;
            max_parts = Some(value.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver property, expected `max_parts`"))
        }
    })?;

    let max_parts = max_parts
        .ok_or_else(|| syn::Error::new_spanned(attr, "missing required `max_parts = N`"))?;
    if max_parts == 0 {
        return Err(syn::Error::new_spanned(attr, "`max_parts` must be at least 1"));
    }

    let parts: Vec<Literal> = (1..=max_parts).map(Literal::u8_unsuffixed).collect();
    let parts_count = Literal::u8_unsuffixed(max_parts);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::aoc_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #parts_count;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #( #parts => <Self as ::aoc_solver::PartSolver<#parts>>::solve(shared), )*
                    _ => ::core::result::Result::Err(
                        ::aoc_solver::SolveError::PartNotImplemented(part),
                    ),
                }
            }
        }
    })
}

/// Submit the solver to the plugin inventory.
///
/// # Attributes
///
/// - `year`: required, e.g. `2021`
/// - `day`: required, `1..=25`
/// - `tags`: optional string array used for filtering
/// - `labels`: optional string array, one human-readable title per part
///
/// The type must implement `Solver`; otherwise compilation fails on a
/// `MustImplementSolver` bound pointing at the type.
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2021, day = 1, tags = ["sequence"], labels = ["Number of increases", "Number of sliding increases"])]
/// pub struct SonarSweep;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = find_attr(&input.attrs, "aoc", name)?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let value: LitInt = meta.value()?.parse()?;
            year = Some(value.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let value: LitInt = meta.value()?.parse()?;
            let parsed: u8 = value.base10_parse()?;
            if !(1..=25).contains(&parsed) {
                return Err(syn::Error::new_spanned(value, "day must be in 1..=25"));
            }
            day = Some(parsed);
        } else if meta.path.is_ident("tags") {
            tags = parse_string_array(&meta)?;
        } else if meta.path.is_ident("labels") {
            labels = parse_string_array(&meta)?;
        } else {
            return Err(meta.error("unsupported aoc property"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(attr, "missing required `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(attr, "missing required `day`"))?;
    let year = Literal::u16_unsuffixed(year);
    let day = Literal::u8_unsuffixed(day);

    Ok(quote! {
        const _: () = {
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
                labels: &[#(#labels),*],
            }
        }
    })
}

fn find_attr<'a>(
    attrs: &'a [Attribute],
    ident: &str,
    name: &syn::Ident,
) -> syn::Result<&'a Attribute> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident(ident))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, format!("missing #[{}(...)] attribute", ident))
        })
}

/// Parse `= ["a", "b"]` after a nested meta path
fn parse_string_array(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<Vec<String>> {
    let _ = meta.value()?;
    let content;
    syn::bracketed!(content in meta.input);
    let mut values = Vec::new();
    while !content.is_empty() {
        match content.parse::<Lit>()? {
            Lit::Str(lit_str) => values.push(lit_str.value()),
            other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
        }
        if content.peek(syn::Token![,]) {
            let _: syn::Token![,] = content.parse()?;
        }
    }
    Ok(values)
}
