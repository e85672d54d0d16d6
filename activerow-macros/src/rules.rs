use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemStruct;

use crate::context::ExpansionCtx;
use crate::descriptor::{DomainModelArgs, strip_helper_attrs};
use crate::{accessors, bind, crud, populate, queries, scan, schema, validate};

/// One generated-member shape. Each rule is a pure function of the context
/// and runs exactly once per expansion, in catalogue order.
pub(crate) struct Rule {
    pub name: &'static str,
    pub produce: fn(&ExpansionCtx) -> TokenStream,
}

/// The full member catalogue. Accessors come first, then the key members;
/// everything after that refers to the resolved type name, `Self::TABLE_NAME`
/// and, where relevant, the key type.
pub(crate) const CATALOGUE: &[Rule] = &[
    Rule { name: "accessors", produce: accessors::field_accessors },
    Rule { name: "primary_key", produce: accessors::primary_key_members },
    Rule { name: "table_name", produce: schema::table_name_const },
    Rule { name: "schema", produce: schema::schema_members },
    Rule { name: "scan", produce: scan::scannable_impl },
    Rule { name: "bind", produce: bind::bindable_impl },
    Rule { name: "create_query", produce: queries::create_query },
    Rule { name: "create_persistence", produce: crud::create_persistence },
    Rule { name: "save", produce: crud::save },
    Rule { name: "create", produce: crud::create },
    Rule { name: "create_many", produce: crud::create_many },
    Rule { name: "update", produce: crud::update },
    Rule { name: "update_where", produce: crud::update_where },
    Rule { name: "destroy", produce: crud::destroy },
    Rule { name: "destroy_where", produce: crud::destroy_where },
    Rule { name: "execute", produce: crud::execute },
    Rule { name: "query", produce: queries::query },
    Rule { name: "query_with", produce: queries::query_with },
    Rule { name: "query_by_sql", produce: queries::query_by_sql },
    Rule { name: "query_first", produce: queries::query_first },
    Rule { name: "query_first_with", produce: queries::query_first_with },
    Rule { name: "count", produce: queries::count },
    Rule { name: "validate", produce: validate::validate_members },
    Rule { name: "new_instance_from", produce: populate::new_instance_from },
];

/// Driver: resolve the context, inject the key field into the struct, then
/// fold every catalogue rule's output after it.
pub(crate) fn expand(args: DomainModelArgs, mut item: ItemStruct) -> syn::Result<TokenStream> {
    let ctx = ExpansionCtx::resolve(&args, &item)?;

    strip_helper_attrs(&mut item);
    inject_primary_key_field(&mut item, &ctx);

    let mut generated = TokenStream::new();
    for rule in CATALOGUE {
        generated.extend((rule.produce)(&ctx));
    }

    Ok(quote! {
        #item

        #generated
    })
}

/// The key field is always synthesized, whether or not the caller already
/// declares one; a clash is a plain duplicate-field error on the struct.
fn inject_primary_key_field(item: &mut ItemStruct, ctx: &ExpansionCtx) {
    let pk_ident = &ctx.pk.ident;
    let pk_ty = &ctx.pk.ty;

    if let syn::Fields::Named(named) = &mut item.fields {
        let field: syn::Field = syn::parse_quote! {
            #pk_ident: Option<#pk_ty>
        };
        named.named.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::CATALOGUE;

    #[test]
    fn catalogue_order_is_fixed() {
        let names: Vec<&str> = CATALOGUE.iter().map(|rule| rule.name).collect();
        assert_eq!(names[0], "accessors");
        assert_eq!(names[1], "primary_key");
        assert_eq!(names[2], "table_name");
        assert_eq!(names.len(), 24);
        assert!(names.contains(&"new_instance_from"));
    }

    #[test]
    fn catalogue_names_are_unique() {
        let mut names: Vec<&str> = CATALOGUE.iter().map(|rule| rule.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CATALOGUE.len());
    }
}
