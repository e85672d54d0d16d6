use proc_macro2::TokenStream;
use quote::quote;

use crate::context::ExpansionCtx;

pub(crate) fn create_query(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub fn create_query() -> #krate::db::Query<#ident> {
                let query_factory = #krate::db::QueryFactory::new();
                query_factory.create_query::<#ident>()
            }
        }
    }
}

pub(crate) fn query(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn query(
                predicate: &str,
                params: &[#krate::db::SqlValue],
            ) -> Result<Vec<#ident>, #krate::db::DbError> {
                let query = Self::create_query();
                query.where_(predicate, params).execute().await
            }
        }
    }
}

pub(crate) fn query_with(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn query_with(
                predicate: &str,
                relations: &[#krate::db::Relationship],
                params: &[#krate::db::SqlValue],
            ) -> Result<Vec<#ident>, #krate::db::DbError> {
                let query = Self::create_query();
                query.where_(predicate, params).eager(relations).execute().await
            }
        }
    }
}

pub(crate) fn query_by_sql(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn query_by_sql(
                sql: &str,
                params: &[#krate::db::SqlValue],
            ) -> Result<Vec<#ident>, #krate::db::DbError> {
                #krate::db::Table::query_by_sql::<#ident>(sql, params).await
            }
        }
    }
}

pub(crate) fn query_first(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn query_first(
                predicate: &str,
                params: &[#krate::db::SqlValue],
            ) -> Result<Option<#ident>, #krate::db::DbError> {
                let query = Self::create_query();
                query.where_(predicate, params).query_first().await
            }
        }
    }
}

pub(crate) fn query_first_with(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn query_first_with(
                predicate: &str,
                relations: &[#krate::db::Relationship],
                params: &[#krate::db::SqlValue],
            ) -> Result<Option<#ident>, #krate::db::DbError> {
                let query = Self::create_query();
                query.where_(predicate, params).eager(relations).query_first().await
            }
        }
    }
}

pub(crate) fn count(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn count(
                predicate: &str,
                params: &[#krate::db::SqlValue],
            ) -> Result<i64, #krate::db::DbError> {
                #krate::db::Table::count::<#ident>(predicate, params).await
            }
        }
    }
}
