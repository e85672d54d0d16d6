use activerow::db::{ColumnSpec, DomainModel, Query, QueryFactory, Relationship, SqlValue};
use activerow::params;

struct Order;

impl DomainModel for Order {
    fn table_name() -> &'static str {
        "orders"
    }

    fn schema() -> &'static [ColumnSpec] {
        &[
            ColumnSpec {
                name: "total",
                column: "total",
                primary_key: false,
            },
            ColumnSpec {
                name: "customer_id",
                column: "customer_id",
                primary_key: false,
            },
            ColumnSpec {
                name: "id",
                column: "id",
                primary_key: true,
            },
        ]
    }

    fn primary_token(&self) -> Option<SqlValue> {
        None
    }
}

#[test]
fn default_projection_follows_schema_order() {
    let query: Query<Order> = QueryFactory::new().create_query();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT total, customer_id, id FROM orders"
    );
}

#[test]
fn where_params_become_numbered_placeholders() {
    let query: Query<Order> = Query::new();
    let sql = query
        .where_("total > ? AND customer_id = ?", params![100_i64, 7_i64])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT total, customer_id, id FROM orders WHERE total > $1 AND customer_id = $2"
    );
}

#[test]
fn repeated_where_chains_with_and() {
    let query: Query<Order> = Query::new();
    let sql = query
        .where_("total > ?", params![100_i64])
        .where_("customer_id = ?", params![7_i64])
        .to_sql()
        .unwrap();
    assert!(sql.contains("WHERE total > $1 AND customer_id = $2"));
}

#[test]
fn order_limit_offset_render_in_contract_order() {
    let query: Query<Order> = Query::new();
    let sql = query
        .where_("total > 0", params![])
        .order_by("total", false)
        .offset(20)
        .limit(10)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT total, customer_id, id FROM orders WHERE total > 0 ORDER BY total DESC OFFSET 20 LIMIT 10"
    );
}

#[test]
fn eager_relations_join_and_qualify_projections() {
    let customers = Relationship::new("customers", "customers.id = orders.customer_id");
    let query: Query<Order> = Query::new();
    let sql = query.eager(&[customers]).to_sql().unwrap();
    assert_eq!(
        sql,
        "SELECT orders.total, orders.customer_id, orders.id \
         FROM orders LEFT JOIN customers ON customers.id = orders.customer_id"
    );
}

#[tokio::test]
async fn raw_execute_without_pool_reports_not_configured() {
    let err = activerow::db::Table::execute::<Order>("DELETE FROM orders", params![])
        .await
        .unwrap_err();
    assert!(matches!(err, activerow::db::DbError::NotConfigured));
}

#[test]
fn explicit_projection_wins() {
    let query: Query<Order> = Query::new();
    let sql = query
        .projections("COUNT(*)")
        .group_by("customer_id")
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT COUNT(*) FROM orders GROUP BY customer_id");
}
