//! Integration tests for the listing and analytics paths.
//!
//! Each test builds a small dataset the way the upload step would (every row
//! spans the full column list, missing cells are null) and runs it through
//! `QueryRunner`.

use tabula_core::{Dataset, DatasetId, Row, UserId, Value};
use tabula_query::ast::{AggregateOp, AggregateQuery, CoercionPolicy, ListQuery, RowFilter, SortOrder};
use tabula_query::executor::{QueryRunner, SortMode};

/// Helper to build a dataset from column names and string-keyed records.
fn dataset(columns: &[&str], records: Vec<Vec<Value>>) -> Dataset {
    Dataset::new(
        DatasetId::new(1),
        UserId::from("owner@example.com"),
        "fixture.csv",
        columns.iter().map(|c| c.to_string()).collect(),
        records.into_iter().map(Row::new).collect(),
    )
    .unwrap()
}

fn column(page_rows: &[&Row], idx: usize) -> Vec<Value> {
    page_rows.iter().map(|r| r.get_or_null(idx).clone()).collect()
}

#[test]
fn test_sort_stability_example() {
    let ds = dataset(
        &["a", "id"],
        vec![
            vec![Value::Int64(2), Value::from("first")],
            vec![Value::Int64(1), Value::from("x")],
            vec![Value::Int64(2), Value::from("second")],
        ],
    );
    let query = ListQuery::new(0, 10).unwrap().sort("a", SortOrder::Asc);
    let page = QueryRunner::new(&ds).list(&query);
    assert_eq!(
        column(&page.rows, 1),
        vec![Value::from("x"), Value::from("first"), Value::from("second")]
    );
}

#[test]
fn test_mixed_type_sort_example() {
    let ds = dataset(
        &["x"],
        vec![vec![Value::from("10")], vec![Value::from("abc")], vec![Value::from("2")]],
    );
    let query = ListQuery::new(0, 10).unwrap().sort("x", SortOrder::Asc);
    let page = QueryRunner::new(&ds).list(&query);
    assert_eq!(page.sort_mode, Some(SortMode::Lexical));
    assert_eq!(
        column(&page.rows, 0),
        vec![Value::from("10"), Value::from("2"), Value::from("abc")]
    );
}

#[test]
fn test_search_case_insensitive_example() {
    let ds = dataset(&["name"], vec![vec![Value::from("Alice")], vec![Value::from("bob")]]);
    let query = ListQuery::new(0, 10).unwrap().search("ALI");
    let page = QueryRunner::new(&ds).list(&query);
    assert_eq!(page.info.total_count, 1);
    assert_eq!(column(&page.rows, 0), vec![Value::from("Alice")]);
}

#[test]
fn test_aggregation_determinism_example() {
    let ds = dataset(
        &["team", "score"],
        vec![
            vec![Value::from("B"), Value::from("10")],
            vec![Value::from("A"), Value::from("5")],
            vec![Value::from("A"), Value::from("x")],
        ],
    );
    let query = AggregateQuery::new("team")
        .unwrap()
        .operation(AggregateOp::Sum)
        .column("score");
    let groups = QueryRunner::new(&ds).aggregate(&query).unwrap();
    let got: Vec<(String, f64)> = groups
        .iter()
        .map(|g| (g.label.clone(), g.value.as_f64().unwrap()))
        .collect();
    assert_eq!(got, vec![("A".to_string(), 5.0), ("B".to_string(), 10.0)]);
}

/// The whole-group policy reproduces the legacy behavior where one bad cell
/// zeroes an otherwise valid group. Kept selectable, not the default.
#[test]
fn test_aggregation_zero_group_policy() {
    let ds = dataset(
        &["team", "score"],
        vec![
            vec![Value::from("B"), Value::from("10")],
            vec![Value::from("A"), Value::from("5")],
            vec![Value::from("A"), Value::from("x")],
        ],
    );
    let query = AggregateQuery::new("team")
        .unwrap()
        .operation(AggregateOp::Sum)
        .column("score")
        .policy(CoercionPolicy::ZeroGroup);
    let groups = QueryRunner::new(&ds).aggregate(&query).unwrap();
    assert_eq!(groups[0].label, "A");
    assert_eq!(groups[0].value, Value::Int64(0));
    assert_eq!(groups[1].value.as_f64(), Some(10.0));
}

#[test]
fn test_missing_group_label() {
    let ds = dataset(
        &["team", "score"],
        vec![
            vec![Value::from("A"), Value::Int64(1)],
            vec![Value::Null, Value::Int64(2)],
        ],
    );
    let groups = QueryRunner::new(&ds)
        .aggregate(&AggregateQuery::new("team").unwrap())
        .unwrap();
    assert_eq!(groups[1].label, "Unknown");
    assert_eq!(groups[1].value, Value::Int64(1));
}

#[test]
fn test_round_trip_identity() {
    let ds = dataset(
        &["n"],
        vec![vec![Value::Int64(3)], vec![Value::Int64(1)], vec![Value::Int64(2)]],
    );
    let runner = QueryRunner::new(&ds);

    let page = runner.list(&ListQuery::new(0, 100).unwrap().with_filter(RowFilter::default()));
    assert_eq!(
        column(&page.rows, 0),
        vec![Value::Int64(3), Value::Int64(1), Value::Int64(2)]
    );

    let page = runner.list(&ListQuery::new(0, 100).unwrap().sort("nope", SortOrder::Asc));
    assert_eq!(
        column(&page.rows, 0),
        vec![Value::Int64(3), Value::Int64(1), Value::Int64(2)]
    );
}

#[test]
fn test_paging_through_sorted_results() {
    let records: Vec<Vec<Value>> = (0..25).rev().map(|i| vec![Value::Int64(i)]).collect();
    let ds = dataset(&["n"], records);
    let runner = QueryRunner::new(&ds);

    let mut seen = Vec::new();
    for skip in (0..25).step_by(10) {
        let query = ListQuery::new(skip, 10).unwrap().sort("n", SortOrder::Asc);
        let page = runner.list(&query);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.info.page, skip as usize / 10 + 1);
        seen.extend(column(&page.rows, 0));
    }
    let expected: Vec<Value> = (0..25).map(Value::Int64).collect();
    assert_eq!(seen, expected);

    let past_end = runner.list(&ListQuery::new(30, 10).unwrap());
    assert!(past_end.rows.is_empty());
    assert_eq!(past_end.info.total_count, 25);
}

#[test]
fn test_empty_dataset() {
    let ds = dataset(&[], Vec::new());
    let runner = QueryRunner::new(&ds);
    let page = runner.list(&ListQuery::default());
    assert_eq!(page.info.total_count, 0);
    assert_eq!(page.info.total_pages, 0);
    assert!(page.columns.is_empty());

    let groups = runner.aggregate(&AggregateQuery::new("any").unwrap()).unwrap();
    assert!(groups.is_empty());
}
