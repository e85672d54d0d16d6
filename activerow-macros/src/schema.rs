use proc_macro2::TokenStream;
use quote::quote;

use crate::context::ExpansionCtx;

/// The storage-table identifier, resolved once; every other rule refers to
/// `Self::TABLE_NAME` instead of recomputing it.
pub(crate) fn table_name_const(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let table_name = &ctx.table_name;

    quote! {
        impl #ident {
            pub const TABLE_NAME: &'static str = #table_name;
        }
    }
}

/// Column table plus the `DomainModel` impl tying the type into the runtime.
pub(crate) fn schema_members(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    let mut column_specs = Vec::new();
    for field in ctx.fields.iter().filter(|field| !field.skip) {
        let name = field.ident.to_string();
        let column = &field.column;
        column_specs.push(quote! {
            #krate::db::ColumnSpec {
                name: #name,
                column: #column,
                primary_key: false,
            }
        });
    }
    let pk_name = ctx.pk.ident.to_string();
    let pk_column = &ctx.pk.column;
    column_specs.push(quote! {
        #krate::db::ColumnSpec {
            name: #pk_name,
            column: #pk_column,
            primary_key: true,
        }
    });

    let pk_ident = &ctx.pk.ident;

    quote! {
        impl #ident {
            pub const SCHEMA: &'static [#krate::db::ColumnSpec] = &[
                #(#column_specs),*
            ];
        }

        impl #krate::db::DomainModel for #ident {
            fn table_name() -> &'static str {
                Self::TABLE_NAME
            }

            fn schema() -> &'static [#krate::db::ColumnSpec] {
                Self::SCHEMA
            }

            fn primary_token(&self) -> Option<#krate::db::SqlValue> {
                self.#pk_ident.clone().map(#krate::db::SqlValue::from)
            }
        }
    }
}
