use proc_macro2::TokenStream;
use quote::quote;

use crate::context::ExpansionCtx;

/// Binds the non-key columns in schema order; the key is bound separately by
/// whichever statement needs it.
pub(crate) fn bindable_impl(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    let bind_stmts: Vec<TokenStream> = ctx
        .fields
        .iter()
        .filter(|field| !field.skip)
        .map(|field| {
            let ident = &field.ident;
            quote! {
                <#krate::db::PgArguments as #krate::db::Arguments<'_>>::add(args, &self.#ident)
                    .map_err(#krate::db::SqlxError::Encode)?;
            }
        })
        .collect();

    // Keep the parameter used when every column is skipped.
    let bind_stmts = if bind_stmts.is_empty() {
        vec![quote! { let _ = args; }]
    } else {
        bind_stmts
    };

    quote! {
        impl #krate::db::Bindable for #ident {
            fn bind_values(
                &self,
                args: &mut #krate::db::PgArguments,
            ) -> Result<(), #krate::db::SqlxError> {
                #(#bind_stmts)*
                Ok(())
            }
        }
    }
}
