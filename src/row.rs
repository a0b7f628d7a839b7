use crate::value::Value;

/// One fixed-width tuple of nullable values from the input stream.
///
/// All rows of one source are assumed to share the same length; nothing
/// enforces it, and the helpers below stay in bounds if it is violated.
pub type Row = Vec<Value>;

/// Build a [`Row`] from anything convertible to [`Value`].
///
/// ```
/// use rowtree::{Value, row};
///
/// let r = row!["X", 1i64, Value::Null];
/// assert_eq!(r.len(), 3);
/// assert!(r[2].is_null());
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}

/// Number of leading columns equal between two consecutive rows.
///
/// Two nulls count as equal, a null and a non-null never do. Rows of
/// different lengths are compared over the shorter one.
pub fn shared_prefix_len(prev: &[Value], next: &[Value]) -> usize {
    prev.iter().zip(next).take_while(|(a, b)| a == b).count()
}

/// Smallest index `k` such that `row[k..]` is entirely null.
///
/// Equals `row.len()` when the last column is non-null, and `0` for a row
/// of nothing but nulls (or an empty row).
pub fn trailing_null_from(row: &[Value]) -> usize {
    row.iter().rposition(|v| !v.is_null()).map_or(0, |i| i + 1)
}
