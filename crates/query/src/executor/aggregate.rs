//! Aggregate executor.

use crate::ast::{AggregateOp, CoercionPolicy};
use crate::coerce::{render, to_number};
use crate::executor::Relation;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use libm::{fmax, fmin};
use tabula_core::{Row, Value};

/// Label given to rows without a value in the group-by column.
pub const UNKNOWN_LABEL: &str = "Unknown";

static NULL: Value = Value::Null;

/// One output bucket of an aggregation.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub label: String,
    /// `Int64` for `count` and for zeroed groups, `Float64` otherwise.
    pub value: Value,
}

/// Running state for one group.
#[derive(Clone, Debug)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    saw_invalid: bool,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            saw_invalid: false,
        }
    }

    fn push(&mut self, value: Option<f64>) {
        self.count += 1;
        let v = match value {
            Some(v) => v,
            None => {
                self.saw_invalid = true;
                0.0
            }
        };
        self.sum += v;
        self.min = fmin(self.min, v);
        self.max = fmax(self.max, v);
    }

    fn finish(&self, op: AggregateOp, policy: CoercionPolicy) -> Value {
        let zeroed = self.count == 0 || (self.saw_invalid && policy == CoercionPolicy::ZeroGroup);
        match op {
            AggregateOp::Count => Value::Int64(self.count as i64),
            _ if zeroed => Value::Int64(0),
            AggregateOp::Sum => Value::Float64(self.sum),
            AggregateOp::Avg => Value::Float64(self.sum / self.count as f64),
            AggregateOp::Min => Value::Float64(self.min),
            AggregateOp::Max => Value::Float64(self.max),
        }
    }
}

/// Aggregate executor - groups rows by one column and reduces another.
pub struct AggregateExecutor {
    /// Group-by column index; `None` puts every row under [`UNKNOWN_LABEL`].
    group_by: Option<usize>,
    /// Value column index; `None` reads every value as null.
    column: Option<usize>,
    op: AggregateOp,
    policy: CoercionPolicy,
}

impl AggregateExecutor {
    /// Creates a new aggregate executor.
    pub fn new(group_by: Option<usize>, op: AggregateOp, column: Option<usize>) -> Self {
        Self {
            group_by,
            column,
            op,
            policy: CoercionPolicy::default(),
        }
    }

    /// Sets how non-numeric values are handled.
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executes the aggregation, returning groups sorted by label.
    pub fn execute(&self, input: &Relation<'_>) -> Vec<Group> {
        let mut groups: HashMap<String, Accumulator> = HashMap::new();

        for row in input.iter() {
            let acc = groups
                .entry(self.group_key(row))
                .or_insert_with(Accumulator::new);
            if self.op == AggregateOp::Count {
                acc.count += 1;
            } else {
                let value = match self.column {
                    Some(idx) => row.get_or_null(idx),
                    None => &NULL,
                };
                acc.push(to_number(value));
            }
        }

        let mut result: Vec<Group> = groups
            .into_iter()
            .map(|(label, acc)| Group {
                value: acc.finish(self.op, self.policy),
                label,
            })
            .collect();
        // Labels are unique, so an unstable sort is deterministic here.
        result.sort_unstable_by(|a, b| a.label.cmp(&b.label));
        result
    }

    fn group_key(&self, row: &Row) -> String {
        match self.group_by.map(|idx| row.get_or_null(idx)) {
            None | Some(Value::Null) => String::from(UNKNOWN_LABEL),
            Some(v) => render(v).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn teams() -> (Vec<String>, Vec<Row>) {
        let columns = vec![String::from("team"), String::from("score")];
        let rows = vec![
            Row::new(vec![Value::from("B"), Value::from("10")]),
            Row::new(vec![Value::from("A"), Value::from("5")]),
            Row::new(vec![Value::from("A"), Value::from("x")]),
        ];
        (columns, rows)
    }

    fn labels(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    #[test]
    fn test_count_by_group() {
        let (columns, rows) = teams();
        let rel = Relation::new(&columns, &rows);
        let groups = AggregateExecutor::new(Some(0), AggregateOp::Count, None).execute(&rel);
        assert_eq!(labels(&groups), vec!["A", "B"]);
        assert_eq!(groups[0].value, Value::Int64(2));
        assert_eq!(groups[1].value, Value::Int64(1));
    }

    #[test]
    fn test_sum_zeroes_bad_value() {
        let (columns, rows) = teams();
        let rel = Relation::new(&columns, &rows);
        let groups = AggregateExecutor::new(Some(0), AggregateOp::Sum, Some(1)).execute(&rel);
        assert_eq!(groups[0], Group { label: "A".into(), value: Value::Float64(5.0) });
        assert_eq!(groups[1], Group { label: "B".into(), value: Value::Float64(10.0) });
    }

    #[test]
    fn test_zero_group_policy_discards_partial_sum() {
        // A single unparsable cell wipes out the valid "5" in the same group.
        let (columns, rows) = teams();
        let rel = Relation::new(&columns, &rows);
        let groups = AggregateExecutor::new(Some(0), AggregateOp::Sum, Some(1))
            .with_policy(CoercionPolicy::ZeroGroup)
            .execute(&rel);
        assert_eq!(groups[0].value, Value::Int64(0));
        assert_eq!(groups[1].value, Value::Float64(10.0));
    }

    #[test]
    fn test_avg_min_max() {
        let columns = vec![String::from("k"), String::from("v")];
        let rows = vec![
            Row::new(vec![Value::from("g"), Value::Int64(4)]),
            Row::new(vec![Value::from("g"), Value::Float64(-1.5)]),
            Row::new(vec![Value::from("g"), Value::Null]),
        ];
        let rel = Relation::new(&columns, &rows);
        let run = |op| AggregateExecutor::new(Some(0), op, Some(1)).execute(&rel)[0].value.clone();
        assert_eq!(run(AggregateOp::Avg), Value::Float64(2.5 / 3.0));
        assert_eq!(run(AggregateOp::Min), Value::Float64(-1.5));
        assert_eq!(run(AggregateOp::Max), Value::Float64(4.0));
        assert_eq!(run(AggregateOp::Sum), Value::Float64(2.5));
    }

    #[test]
    fn test_missing_group_key_is_unknown() {
        let columns = vec![String::from("k")];
        let rows = vec![
            Row::new(vec![Value::Null]),
            Row::new(vec![Value::from("x")]),
        ];
        let rel = Relation::new(&columns, &rows);
        let groups = AggregateExecutor::new(Some(0), AggregateOp::Count, None).execute(&rel);
        assert_eq!(labels(&groups), vec!["Unknown", "x"]);

        let groups = AggregateExecutor::new(None, AggregateOp::Count, None).execute(&rel);
        assert_eq!(groups, vec![Group { label: "Unknown".into(), value: Value::Int64(2) }]);
    }

    #[test]
    fn test_labels_sort_case_sensitive() {
        let columns = vec![String::from("k")];
        let rows = vec![
            Row::new(vec![Value::from("b")]),
            Row::new(vec![Value::from("B")]),
            Row::new(vec![Value::from("a")]),
            Row::new(vec![Value::Int64(3)]),
        ];
        let rel = Relation::new(&columns, &rows);
        let groups = AggregateExecutor::new(Some(0), AggregateOp::Count, None).execute(&rel);
        assert_eq!(labels(&groups), vec!["3", "B", "a", "b"]);
    }

    #[test]
    fn test_unknown_value_column_reads_zero() {
        let (columns, rows) = teams();
        let rel = Relation::new(&columns, &rows);
        let groups = AggregateExecutor::new(Some(0), AggregateOp::Max, None).execute(&rel);
        assert_eq!(groups[0].value, Value::Float64(0.0));
    }

    #[test]
    fn test_empty_input() {
        let columns: Vec<String> = Vec::new();
        let rows: Vec<Row> = Vec::new();
        let rel = Relation::new(&columns, &rows);
        assert!(AggregateExecutor::new(None, AggregateOp::Sum, None).execute(&rel).is_empty());
    }
}
