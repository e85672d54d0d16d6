use activerow::db::DomainModel;
use activerow::domain_model;

#[domain_model]
#[derive(Debug, Default, PartialEq)]
struct Member {
    #[column(name = "member_name")]
    #[validate(non_empty, max_length = 50)]
    name: String,

    #[validate(min_value = 18, max_value = 120)]
    age: i32,

    email: Option<String>,
}

#[test]
fn table_name_defaults_to_snake_case() {
    assert_eq!(Member::TABLE_NAME, "member");
    assert_eq!(<Member as DomainModel>::table_name(), "member");
}

#[test]
fn schema_lists_columns_in_order_with_the_key_last() {
    let schema = Member::SCHEMA;
    assert_eq!(schema.len(), 4);

    assert_eq!(schema[0].name, "name");
    assert_eq!(schema[0].column, "member_name");
    assert!(!schema[0].primary_key);

    assert_eq!(schema[1].name, "age");
    assert_eq!(schema[1].column, "age");

    assert_eq!(schema[2].name, "email");

    assert_eq!(schema[3].name, "id");
    assert_eq!(schema[3].column, "id");
    assert!(schema[3].primary_key);
}

#[test]
fn accessors_read_and_write_fields() {
    let mut member = Member::default();
    member.set_name("ada".to_string());
    member.set_age(36);
    assert_eq!(member.name(), "ada");
    assert_eq!(*member.age(), 36);
    assert_eq!(*member.id(), None);
}

#[test]
fn unsaved_records_have_no_primary_token() {
    let member = Member::default();
    assert!(member.primary_token().is_none());

    let mut saved = Member::default();
    saved.set_id(Some(7));
    assert!(saved.primary_token().is_some());
}

#[test]
fn validate_reports_declared_checks() {
    let mut member = Member::default();
    member.set_age(36);
    member.set_name("".to_string());

    let err = member.validate().unwrap_err();
    let codes: Vec<&str> = err.violations().iter().map(|v| v.code).collect();
    assert_eq!(codes, vec!["blank"]);
    assert_eq!(err.violations()[0].field, "name");

    member.set_name("ada".to_string());
    assert!(member.validate().unwrap().is_empty());
}

#[test]
fn optional_fields_are_checked_only_when_present() {
    #[domain_model]
    #[derive(Default)]
    struct Contact {
        #[validate(email)]
        address: Option<String>,
    }

    let mut contact = Contact::default();
    assert!(contact.validate().is_ok());

    contact.set_address(Some("not-an-email".to_string()));
    let err = contact.validate().unwrap_err();
    assert_eq!(err.violations()[0].code, "email");

    contact.set_address(Some("ada@example.com".to_string()));
    assert!(contact.validate().is_ok());
}

#[test]
fn new_instance_from_reads_snake_or_camel_keys() {
    let mut underscore_props = activerow::db::populate::Properties::new();
    underscore_props.insert("member_name".into(), serde_json::json!("ignored"));
    underscore_props.insert("name".into(), serde_json::json!("ada"));
    underscore_props.insert("age".into(), serde_json::json!(36));
    underscore_props.insert("id".into(), serde_json::json!(5));

    let member = Member::new_instance_from(&underscore_props, true).unwrap();
    assert_eq!(member.name(), "ada");
    assert_eq!(*member.age(), 36);
    assert_eq!(*member.id(), Some(5));

    #[domain_model]
    #[derive(Default)]
    struct Profile {
        full_name: String,
    }

    let mut camel_props = activerow::db::populate::Properties::new();
    camel_props.insert("fullName".into(), serde_json::json!("Ada Lovelace"));
    let profile = Profile::new_instance_from(&camel_props, false).unwrap();
    assert_eq!(profile.full_name(), "Ada Lovelace");

    let missing = Profile::new_instance_from(&activerow::db::populate::Properties::new(), true)
        .unwrap();
    assert_eq!(missing.full_name(), "");
}

#[test]
fn fluent_setters_chain() {
    #[domain_model(fluent)]
    #[derive(Default)]
    struct Tag {
        label: String,
    }

    let tag = Tag::default().set_label("draft".to_string()).set_id(Some(1));
    assert_eq!(tag.label(), "draft");
    assert_eq!(*tag.id(), Some(1));
}

#[test]
fn naming_strategy_and_overrides() {
    #[domain_model(naming = "plural_snake")]
    #[derive(Default)]
    struct Category {
        title: String,
    }
    assert_eq!(Category::TABLE_NAME, "categories");

    #[domain_model(table_name = "member_archive")]
    #[derive(Default)]
    struct ArchivedMember {
        title: String,
    }
    assert_eq!(ArchivedMember::TABLE_NAME, "member_archive");
}

#[test]
fn primary_key_can_be_customised() {
    #[domain_model(primary_key(name = "member_id", column = "mid", ty = "i32"))]
    #[derive(Default)]
    struct LegacyMember {
        name: String,
    }

    let schema = LegacyMember::SCHEMA;
    assert_eq!(schema[1].name, "member_id");
    assert_eq!(schema[1].column, "mid");
    assert!(schema[1].primary_key);

    let mut member = LegacyMember::default();
    member.set_member_id(Some(9_i32));
    assert!(member.primary_token().is_some());
}

#[test]
fn skipped_fields_stay_out_of_the_schema() {
    #[domain_model]
    #[derive(Default)]
    struct Draft {
        title: String,
        #[column(skip)]
        scratch: String,
    }

    let schema = Draft::SCHEMA;
    assert_eq!(schema.len(), 2);
    assert_eq!(schema[0].name, "title");
    assert!(schema[1].primary_key);

    let draft = Draft::new_instance_from(&activerow::db::populate::Properties::new(), true)
        .unwrap();
    assert_eq!(draft.title(), "");
}

#[test]
fn expansions_do_not_share_identifiers() {
    #[domain_model]
    #[derive(Default)]
    struct First {
        value: i32,
    }

    #[domain_model]
    #[derive(Default)]
    struct Second {
        value: i32,
    }

    assert_eq!(First::TABLE_NAME, "first");
    assert_eq!(Second::TABLE_NAME, "second");
    assert_eq!(First::SCHEMA.len(), Second::SCHEMA.len());
}
