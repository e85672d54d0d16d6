use darling::{FromField, FromMeta};
use darling::ast::NestedMeta;
use syn::ItemStruct;

/// Options accepted by `#[domain_model(...)]`.
#[derive(Debug, FromMeta)]
pub(crate) struct DomainModelArgs {
    /// Setters consume and return `Self` instead of mutating in place.
    #[darling(default)]
    pub fluent: bool,

    /// Explicit storage-table identifier; wins over `naming`.
    #[darling(default)]
    pub table_name: Option<String>,

    /// Strategy applied to the type name when `table_name` is absent.
    #[darling(default)]
    pub naming: Option<NamingStrategy>,

    #[darling(default)]
    pub primary_key: Option<PrimaryKeyArgs>,

    /// Path of the runtime crate in generated code: #[domain_model(crate = "activerow")]
    #[darling(default, rename = "crate")]
    pub crate_path: Option<syn::Path>,
}

#[derive(Debug, Clone, Default, FromMeta)]
pub(crate) struct PrimaryKeyArgs {
    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub column: Option<String>,

    /// Inner key type, e.g. `ty = "i64"`; the injected field is `Option<ty>`.
    #[darling(default)]
    pub ty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NamingStrategy {
    Snake,
    PluralSnake,
}

impl FromMeta for NamingStrategy {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "snake" => Ok(NamingStrategy::Snake),
            "plural_snake" => Ok(NamingStrategy::PluralSnake),
            other => Err(darling::Error::unknown_value(other)),
        }
    }
}

/// Per-field mapping attributes: #[column(name = "...", skip)]
#[derive(FromField)]
#[darling(attributes(column))]
pub(crate) struct ModelField {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,

    /// Column name override; defaults to the field name.
    #[darling(default)]
    pub name: Option<String>,

    /// Excluded from accessors, schema, binding, scanning and population.
    #[darling(default)]
    pub skip: bool,
}

/// Declarative checks carried by `#[validate(...)]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldChecks {
    pub non_empty: bool,
    pub email: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
}

impl FieldChecks {
    pub fn has_any(&self) -> bool {
        self.non_empty
            || self.email
            || self.min_length.is_some()
            || self.max_length.is_some()
            || self.min_value.is_some()
            || self.max_value.is_some()
    }
}

impl FromMeta for FieldChecks {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        use syn::{Expr, ExprLit, Lit, Meta};

        let mut result = Self::default();

        for item in items {
            match item {
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("non_empty") => {
                    result.non_empty = true;
                }
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("email") => {
                    result.email = true;
                }
                NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("min_length") => {
                    if let Expr::Lit(ExprLit { lit: Lit::Int(lit), .. }) = &nv.value {
                        result.min_length = Some(lit.base10_parse()?);
                    }
                }
                NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("max_length") => {
                    if let Expr::Lit(ExprLit { lit: Lit::Int(lit), .. }) = &nv.value {
                        result.max_length = Some(lit.base10_parse()?);
                    }
                }
                NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("min_value") => {
                    result.min_value = Some(parse_i64_expr(&nv.value)?);
                }
                NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("max_value") => {
                    result.max_value = Some(parse_i64_expr(&nv.value)?);
                }
                other => {
                    return Err(darling::Error::custom("unknown validation rule").with_span(other));
                }
            }
        }

        Ok(result)
    }
}

fn parse_i64_expr(expr: &syn::Expr) -> darling::Result<i64> {
    use syn::{Expr, ExprLit, ExprUnary, Lit, UnOp};

    match expr {
        Expr::Lit(ExprLit { lit: Lit::Int(lit_int), .. }) => lit_int
            .base10_parse()
            .map_err(|e| darling::Error::custom(format!("invalid integer: {}", e))),
        Expr::Unary(ExprUnary { op: UnOp::Neg(_), expr, .. }) => {
            let val = parse_i64_expr(expr)?;
            Ok(-val)
        }
        _ => Err(darling::Error::custom("expected integer literal")),
    }
}

pub(crate) fn extract_checks(attrs: &[syn::Attribute]) -> darling::Result<Option<FieldChecks>> {
    let attr = match attrs.iter().find(|attr| attr.path().is_ident("validate")) {
        Some(attr) => attr,
        None => return Ok(None),
    };
    let checks = FieldChecks::from_meta(&attr.meta)?;
    Ok(checks.has_any().then_some(checks))
}

/// The mapping/check attributes are consumed here; they must not survive
/// into the emitted struct where the compiler would reject them.
pub(crate) fn strip_helper_attrs(item: &mut ItemStruct) {
    for field in item.fields.iter_mut() {
        field
            .attrs
            .retain(|attr| !attr.path().is_ident("column") && !attr.path().is_ident("validate"));
    }
}
