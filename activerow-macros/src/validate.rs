use proc_macro2::TokenStream;
use quote::quote;

use crate::common::type_utils::is_option_type;
use crate::context::{ExpansionCtx, FieldSpec};

/// The `validate()` member delegates to the shared entry point; the checks
/// themselves live on the generated `Validate` impl below it.
pub(crate) fn validate_members(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    let checks: Vec<TokenStream> = ctx
        .fields
        .iter()
        .filter(|field| !field.skip && field.checks.is_some())
        .map(|field| field_checks(field, krate))
        .collect();

    // Keep the parameter used when no checks are declared.
    let checks = if checks.is_empty() {
        vec![quote! { let _ = report; }]
    } else {
        checks
    };

    quote! {
        impl #ident {
            pub fn validate(
                &self,
            ) -> Result<Vec<#krate::validation::Violation>, #krate::validation::ValidationError> {
                #krate::db::Table::validate(self, false)
            }
        }

        impl #krate::validation::Validate for #ident {
            fn check(&self, report: &mut Vec<#krate::validation::Violation>) {
                #(#checks)*
            }
        }
    }
}

fn field_checks(field: &FieldSpec, krate: &syn::Path) -> TokenStream {
    let checks = field.checks.as_ref().expect("filtered on presence");
    let ident = &field.ident;
    let name = ident.to_string();
    let optional = is_option_type(&field.ty);

    let mut calls: Vec<TokenStream> = Vec::new();

    if checks.non_empty {
        calls.push(string_check(
            &name,
            optional,
            ident,
            quote!(#krate::validators::non_empty(value)),
        ));
    }
    if checks.email {
        calls.push(string_check(
            &name,
            optional,
            ident,
            quote!(#krate::validators::email(value)),
        ));
    }
    if let Some(n) = checks.min_length {
        calls.push(string_check(
            &name,
            optional,
            ident,
            quote!(#krate::validators::min_len(#n)(value)),
        ));
    }
    if let Some(n) = checks.max_length {
        calls.push(string_check(
            &name,
            optional,
            ident,
            quote!(#krate::validators::max_len(#n)(value)),
        ));
    }
    if let Some(n) = checks.min_value {
        calls.push(numeric_check(
            &name,
            optional,
            ident,
            quote!(#krate::validators::min_value(#n)(i64::from(value))),
        ));
    }
    if let Some(n) = checks.max_value {
        calls.push(numeric_check(
            &name,
            optional,
            ident,
            quote!(#krate::validators::max_value(#n)(i64::from(value))),
        ));
    }

    quote! { #(#calls)* }
}

fn string_check(
    name: &str,
    optional: bool,
    ident: &syn::Ident,
    check: TokenStream,
) -> TokenStream {
    if optional {
        quote! {
            if let Some(ref value) = self.#ident {
                if let Err(failure) = #check {
                    report.push(failure.at(#name));
                }
            }
        }
    } else {
        quote! {
            {
                let value = &self.#ident;
                if let Err(failure) = #check {
                    report.push(failure.at(#name));
                }
            }
        }
    }
}

fn numeric_check(
    name: &str,
    optional: bool,
    ident: &syn::Ident,
    check: TokenStream,
) -> TokenStream {
    if optional {
        quote! {
            if let Some(value) = self.#ident {
                if let Err(failure) = #check {
                    report.push(failure.at(#name));
                }
            }
        }
    } else {
        quote! {
            {
                let value = self.#ident;
                if let Err(failure) = #check {
                    report.push(failure.at(#name));
                }
            }
        }
    }
}
