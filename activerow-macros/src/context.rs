use darling::FromField;
use heck::ToSnakeCase;
use syn::ItemStruct;

use crate::common::type_utils::resolve_crate_path;
use crate::descriptor::{DomainModelArgs, FieldChecks, ModelField, NamingStrategy, extract_checks};

pub(crate) struct PrimaryKeySpec {
    pub ident: syn::Ident,
    /// Inner type; the injected field is `Option<ty>`.
    pub ty: syn::Type,
    pub column: String,
}

pub(crate) struct FieldSpec {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub column: String,
    pub skip: bool,
    pub checks: Option<FieldChecks>,
}

/// Everything a generation rule may depend on, resolved once per expansion.
pub(crate) struct ExpansionCtx {
    pub ident: syn::Ident,
    pub krate: syn::Path,
    pub fluent: bool,
    pub table_name: String,
    pub pk: PrimaryKeySpec,
    pub fields: Vec<FieldSpec>,
}

impl ExpansionCtx {
    pub fn resolve(args: &DomainModelArgs, item: &ItemStruct) -> syn::Result<Self> {
        let ident = item.ident.clone();

        if !item.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &item.generics,
                "domain_model does not support generic structs",
            ));
        }

        let named = match &item.fields {
            syn::Fields::Named(named) => named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &item.ident,
                    "domain_model only supports structs with named fields",
                ));
            }
        };

        let mut fields = Vec::new();
        for field in &named.named {
            let parsed = ModelField::from_field(field).map_err(darling_to_syn)?;
            let checks = extract_checks(&field.attrs).map_err(darling_to_syn)?;
            let ident = parsed.ident.clone().ok_or_else(|| {
                syn::Error::new_spanned(field, "domain_model fields must be named")
            })?;
            let column = parsed.name.clone().unwrap_or_else(|| ident.to_string());
            fields.push(FieldSpec {
                ident,
                ty: parsed.ty.clone(),
                column,
                skip: parsed.skip,
                checks,
            });
        }

        let pk = resolve_primary_key(args, &ident)?;
        let table_name = resolve_table_name(args, &ident);
        let krate = resolve_crate_path(args.crate_path.clone(), "::activerow");

        Ok(ExpansionCtx {
            ident,
            krate,
            fluent: args.fluent,
            table_name,
            pk,
            fields,
        })
    }
}

fn resolve_primary_key(args: &DomainModelArgs, target: &syn::Ident) -> syn::Result<PrimaryKeySpec> {
    let pk_args = args.primary_key.clone().unwrap_or_default();
    let name = pk_args.name.unwrap_or_else(|| "id".to_string());
    let column = pk_args.column.unwrap_or_else(|| name.clone());
    let ty_src = pk_args.ty.unwrap_or_else(|| "i64".to_string());

    let ident = syn::parse_str::<syn::Ident>(&name).map_err(|_| {
        syn::Error::new(
            target.span(),
            format!("primary key name `{}` is not a valid identifier", name),
        )
    })?;
    let ty = syn::parse_str::<syn::Type>(&ty_src).map_err(|_| {
        syn::Error::new(
            target.span(),
            format!("primary key type `{}` cannot be resolved", ty_src),
        )
    })?;

    Ok(PrimaryKeySpec { ident, ty, column })
}

fn resolve_table_name(args: &DomainModelArgs, ident: &syn::Ident) -> String {
    if let Some(explicit) = &args.table_name {
        return explicit.clone();
    }
    let snake = ident.to_string().to_snake_case();
    match args.naming.unwrap_or(NamingStrategy::Snake) {
        NamingStrategy::Snake => snake,
        NamingStrategy::PluralSnake => tableize(&snake),
    }
}

/// Pluralization for table identifiers; deliberately covers only the
/// regular English forms a type name produces.
pub(crate) fn tableize(snake: &str) -> String {
    if let Some(stem) = snake.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) && !stem.is_empty() {
            return format!("{}ies", stem);
        }
    }
    if snake.ends_with('s') || snake.ends_with('x') || snake.ends_with("ch") || snake.ends_with("sh")
    {
        return format!("{}es", snake);
    }
    format!("{}s", snake)
}

fn darling_to_syn(err: darling::Error) -> syn::Error {
    syn::Error::new(err.span(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::tableize;

    #[test]
    fn tableize_regular_forms() {
        assert_eq!(tableize("member"), "members");
        assert_eq!(tableize("address"), "addresses");
        assert_eq!(tableize("category"), "categories");
        assert_eq!(tableize("day"), "days");
        assert_eq!(tableize("box"), "boxes");
    }
}
