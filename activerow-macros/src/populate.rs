use heck::ToLowerCamelCase;
use proc_macro2::TokenStream;
use quote::quote;

use crate::context::ExpansionCtx;

/// Builds a blank instance and fills it field by field from a property map.
/// `underscore` keys are the field names as written; otherwise the
/// lowerCamelCase form is looked up. Missing keys fall back to `Default`.
pub(crate) fn new_instance_from(ctx: &ExpansionCtx) -> TokenStream {
    let ident = &ctx.ident;
    let krate = &ctx.krate;

    let mut field_inits: Vec<TokenStream> = Vec::new();
    for field in &ctx.fields {
        let field_ident = &field.ident;
        let ty = &field.ty;
        if field.skip {
            field_inits.push(quote! {
                #field_ident: <#ty as ::core::default::Default>::default()
            });
            continue;
        }
        let snake_key = field_ident.to_string();
        let camel_key = snake_key.to_lower_camel_case();
        field_inits.push(quote! {
            #field_ident: #krate::db::populate::field_from_map(
                properties,
                if underscore { #snake_key } else { #camel_key },
            )?
        });
    }
    let pk_ident = &ctx.pk.ident;
    let pk_snake = pk_ident.to_string();
    let pk_camel = pk_snake.to_lower_camel_case();
    field_inits.push(quote! {
        #pk_ident: #krate::db::populate::field_from_map(
            properties,
            if underscore { #pk_snake } else { #pk_camel },
        )?
    });

    quote! {
        impl #ident {
            pub fn new_instance_from(
                properties: &#krate::db::populate::Properties,
                underscore: bool,
            ) -> Result<#ident, #krate::db::DbError> {
                Ok(Self {
                    #(#field_inits),*
                })
            }
        }
    }
}
