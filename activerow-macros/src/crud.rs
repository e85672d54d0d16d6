use proc_macro2::TokenStream;
use quote::quote;

use crate::context::ExpansionCtx;

/// Every persistence-touching member below obtains its own fresh handle;
/// nothing is cached across generated members.
pub(crate) fn create_persistence(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub fn create_persistence() -> #krate::db::Persistence<#ident> {
                let persistence_factory = #krate::db::PersistenceFactory::new();
                persistence_factory.create_persistence::<#ident>()
            }
        }
    }
}

pub(crate) fn save(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn save(&self, skip_validation: bool) -> Result<(), #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.save(self, skip_validation).await
            }
        }
    }
}

pub(crate) fn create(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn create(
                dirty_object: #ident,
                skip_validation: bool,
            ) -> Result<#ident, #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.insert(&dirty_object, skip_validation).await
            }
        }
    }
}

pub(crate) fn create_many(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn create_many(
                dirty_objects: &[#ident],
                skip_validation: bool,
            ) -> Result<Vec<u64>, #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.insert_many(dirty_objects, skip_validation).await
            }
        }
    }
}

pub(crate) fn update(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;
    let pk_ty = &ctx.pk.ty;

    quote! {
        impl #ident {
            pub async fn update(
                id: #pk_ty,
                dirty_object: #ident,
                skip_validation: bool,
            ) -> Result<u64, #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.update_by_id(id, &dirty_object, skip_validation).await
            }
        }
    }
}

pub(crate) fn update_where(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn update_where(
                updates: &str,
                predicate: &str,
            ) -> Result<u64, #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.update_where(updates, predicate).await
            }
        }
    }
}

pub(crate) fn destroy(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;
    let pk_ty = &ctx.pk.ty;

    quote! {
        impl #ident {
            pub async fn destroy(id: #pk_ty) -> Result<u64, #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.delete_by_id(id).await
            }
        }
    }
}

pub(crate) fn destroy_where(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn destroy_where(predicate: &str) -> Result<u64, #krate::db::DbError> {
                let persistence = Self::create_persistence();
                persistence.delete_where(predicate).await
            }
        }
    }
}

pub(crate) fn execute(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    quote! {
        impl #ident {
            pub async fn execute(
                sql: &str,
                params: &[#krate::db::SqlValue],
            ) -> Result<u64, #krate::db::DbError> {
                #krate::db::Table::execute::<#ident>(sql, params).await
            }
        }
    }
}
