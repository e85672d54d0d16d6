use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::context::ExpansionCtx;

/// Getter + setter for every non-skipped declared field.
pub(crate) fn field_accessors(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;

    let members = ctx
        .fields
        .iter()
        .filter(|field| !field.skip)
        .map(|field| accessor_pair(&field.ident, &field.ty, ctx.fluent));

    quote! {
        impl #ident {
            #(#members)*
        }
    }
}

/// Accessors for the injected primary-key field. The field itself is added
/// to the struct by the driver before any rule runs.
pub(crate) fn primary_key_members(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let pk_ty = &ctx.pk.ty;
    let key_ty: syn::Type = syn::parse_quote!(Option<#pk_ty>);
    let pair = accessor_pair(&ctx.pk.ident, &key_ty, ctx.fluent);

    quote! {
        impl #ident {
            #pair
        }
    }
}

fn accessor_pair(field: &syn::Ident, ty: &syn::Type, fluent: bool) -> TokenStream {
    let setter = format_ident!("set_{}", field);

    let getter = quote! {
        pub fn #field(&self) -> &#ty {
            &self.#field
        }
    };

    let setter = if fluent {
        quote! {
            pub fn #setter(mut self, value: #ty) -> Self {
                self.#field = value;
                self
            }
        }
    } else {
        quote! {
            pub fn #setter(&mut self, value: #ty) {
                self.#field = value;
            }
        }
    };

    quote! {
        #getter
        #setter
    }
}
