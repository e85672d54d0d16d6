
mod accessors;
mod bind;
mod common;
mod context;
mod crud;
mod descriptor;
mod populate;
mod queries;
mod rules;
mod scan;
mod schema;
mod validate;

use darling::FromMeta;
use darling::ast::NestedMeta;
use proc_macro::TokenStream;
use syn::{ItemStruct, parse_macro_input};

use crate::descriptor::DomainModelArgs;
extern crate proc_macro;


/// Expands a record struct into a full data-access type.
///
/// Usage:
/// ```ignore
/// use activerow::domain_model;
///
/// #[domain_model(table_name = "members", fluent)]
/// struct Member {
///     #[column(name = "member_name")]
///     #[validate(non_empty, max_length = 50)]
///     name: String,
///     age: i32,
/// }
/// ```
///
/// Generates, per non-skipped field, a getter and a setter (consuming `self`
/// when `fluent` is set), injects the primary-key field (`id: Option<i64>`
/// unless overridden via `primary_key(...)`), and attaches the fixed member
/// catalogue: `TABLE_NAME`, `SCHEMA`, `create_query`, `create_persistence`,
/// `save`, `create`, `create_many`, `update`, `update_where`, `destroy`,
/// `destroy_where`, `execute`, `query`, `query_with`, `query_by_sql`,
/// `query_first`, `query_first_with`, `count`, `validate` and
/// `new_instance_from`, plus the row-scan and value-bind impls the runtime
/// needs.
///
/// # Attributes
///
/// ## `#[domain_model(...)]` - Type-level options
/// - `table_name = "..."` - Explicit table identifier
/// - `naming = "snake" | "plural_snake"` - Strategy applied to the type name
///   when `table_name` is absent (defaults to `snake`)
/// - `fluent` - Setters consume and return `Self`
/// - `primary_key(name = "id", column = "id", ty = "i64")` - Synthesized key
///   field; all parts optional
/// - `crate = "path"` - Runtime crate path in generated code
///
/// ## `#[column(...)]` - Field mapping
/// - `name = "column_name"` - Database column (defaults to field name)
/// - `skip` - Exclude the field from the generated surface
///
/// ## `#[validate(...)]` - Declarative checks
/// - `non_empty`, `email`, `min_length = n`, `max_length = n`,
///   `min_value = n`, `max_value = n`; `Option` fields are checked when `Some`
#[proc_macro_attribute]
pub fn domain_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let meta = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(meta) => meta,
        Err(e) => return darling::Error::from(e).write_errors().into(),
    };
    let args = match DomainModelArgs::from_list(&meta) {
        Ok(args) => args,
        Err(e) => return e.write_errors().into(),
    };
    let item = parse_macro_input!(item as ItemStruct);

    match rules::expand(args, item) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.into_compile_error().into(),
    }
}
