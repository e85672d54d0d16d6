use proc_macro2::TokenStream;
use quote::quote;

use crate::context::ExpansionCtx;

/// Ordered row scan matching the schema's column order, with the key column
/// last. Skipped fields fall back to `Default`.
pub(crate) fn scannable_impl(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    let mut field_inits: Vec<TokenStream> = Vec::new();
    for field in &ctx.fields {
        let ident = &field.ident;
        let ty = &field.ty;
        if field.skip {
            field_inits.push(quote! {
                #ident: <#ty as ::core::default::Default>::default()
            });
        } else {
            field_inits.push(quote! {
                #ident: {
                    let value = #krate::db::Row::try_get::<#ty, _>(row, *start_idx)?;
                    *start_idx += 1;
                    value
                }
            });
        }
    }
    let pk_ident = &ctx.pk.ident;
    let pk_ty = &ctx.pk.ty;
    field_inits.push(quote! {
        #pk_ident: {
            let value = #krate::db::Row::try_get::<Option<#pk_ty>, _>(row, *start_idx)?;
            *start_idx += 1;
            value
        }
    });

    quote! {
        impl #krate::db::Scannable for #ident {
            fn scan_row_ordered(
                row: &#krate::db::PgRow,
                start_idx: &mut usize,
            ) -> Result<Self, #krate::db::SqlxError> {
                Ok(Self {
                    #(#field_inits),*
                })
            }
        }

        impl<'r> #krate::db::FromRow<'r, #krate::db::PgRow> for #ident {
            fn from_row(row: &'r #krate::db::PgRow) -> Result<Self, #krate::db::SqlxError> {
                <Self as #krate::db::Scannable>::scan_row(row)
            }
        }
    }
}
