//! Stable single-field sorting.

use std::cmp::Ordering;

use crate::model::{Row, Value};

/// Sorting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    Descending,
    /// Rows keep their search order.
    #[default]
    None,
}

impl SortDirection {
    /// Parse `"asc"`, `"desc"` and `"none"` (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }

    /// Direction after another click on the same column header.
    ///
    /// `None -> Ascending -> Descending`, then back to `None` when
    /// `force_sort` is set, otherwise back to `Ascending`.
    pub fn cycle(self, force_sort: bool) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending if force_sort => Self::None,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Rank used when two cells hold different kinds of value.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::String(_) => 3,
    }
}

/// Compare two cells for sorting.
///
/// Strings compare lowercased, numbers by exact numeric value (an `Int` and
/// a `Float` compare as numbers, NaN above all of them), booleans
/// `false < true`. Cells of different kinds order as
/// `Null < Bool < number < String`. The result is a total order for any mix
/// of cells.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
        (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

/// NaN sorts above every other number and equal to itself.
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float, without rounding the
/// integer to `f64`.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float above every i64
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() || float >= I64_END {
        return Ordering::Less;
    }
    if float < -I64_END {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    // in range and integral, so the cast is exact
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&float).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

/// Sort rows by one field.
///
/// Equal keys keep their input order in both directions: each row is
/// decorated with its input position and ties break on it. `Descending`
/// reverses the comparison, not the sorted output. Rows without the field
/// sort as `Null`.
pub fn sort<'a>(rows: Vec<&'a Row>, field: &str, direction: SortDirection) -> Vec<&'a Row> {
    if direction == SortDirection::None {
        return rows;
    }

    let mut decorated: Vec<(usize, &'a Row)> = rows.into_iter().enumerate().collect();
    decorated.sort_by(|(pos_a, a), (pos_b, b)| {
        let ord = compare_values(a.value(field), b.value(field));
        let ord = match direction {
            SortDirection::Descending => ord.reverse(),
            _ => ord,
        };
        ord.then(pos_a.cmp(pos_b))
    });

    decorated.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_comparison_ignores_case() {
        assert_eq!(
            compare_values(&Value::from("amy"), &Value::from("Bob")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from("BOB"), &Value::from("bob")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_mixed_numeric_comparison() {
        assert_eq!(
            compare_values(&Value::Int(2), &Value::Float(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&Value::Float(3.0), &Value::Int(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_large_int_against_float_is_exact() {
        let edge = 1_i64 << 53;
        let float = Value::Float(edge as f64);
        assert_eq!(compare_values(&Value::Int(edge), &float), Ordering::Equal);
        assert_eq!(compare_values(&Value::Int(edge + 1), &float), Ordering::Greater);
        assert_eq!(compare_values(&float, &Value::Int(edge + 1)), Ordering::Less);
        assert_eq!(
            compare_values(&Value::Int(i64::MAX), &Value::Float(9.3e18)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Int(-3), &Value::Float(-2.5)),
            Ordering::Less
        );
    }

    #[test]
    fn test_nan_sorts_above_numbers() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(compare_values(&nan, &nan), Ordering::Equal);
        assert_eq!(compare_values(&nan, &Value::Float(f64::INFINITY)), Ordering::Greater);
        assert_eq!(compare_values(&Value::Int(i64::MAX), &nan), Ordering::Less);
        assert_eq!(compare_values(&nan, &Value::from("a")), Ordering::Less);
    }

    #[test]
    fn test_cross_type_rank() {
        assert_eq!(
            compare_values(&Value::Null, &Value::Bool(false)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Bool(true), &Value::Int(0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Int(100), &Value::from("1")),
            Ordering::Less
        );
    }

    #[test]
    fn test_cycle() {
        assert_eq!(SortDirection::None.cycle(false), SortDirection::Ascending);
        assert_eq!(
            SortDirection::Descending.cycle(false),
            SortDirection::Ascending
        );
        assert_eq!(SortDirection::Descending.cycle(true), SortDirection::None);
    }
}
