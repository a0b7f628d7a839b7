/// A nullable scalar cell of a result-set row.
///
/// Comparison is identity only: two `Null`s are equal, `Null` never equals
/// a non-null, and there is no cross-type coercion (`SignedInt(1)` does not
/// equal `UnsignedInt(1)`). `Double` compares by bit pattern, so grouping
/// sees identical `NaN`s as one group and `0.0`/`-0.0` as two.
#[derive(Debug, Clone)]
pub enum Value {
    /// NULL value
    Null,
    /// Signed integer (TINYINT, SMALLINT, INT, BIGINT)
    SignedInt(i64),
    /// Unsigned integer (TINYINT UNSIGNED, .., BIGINT UNSIGNED)
    UnsignedInt(u64),
    /// FLOAT/DOUBLE, compared by bit pattern
    Double(f64),
    /// CHAR, VARCHAR, TEXT, ..
    Text(String),
    /// BLOB, VARBINARY, GEOMETRY, ..
    Byte(Vec<u8>),
    /// BOOLEAN
    Bool(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::SignedInt(a), Value::SignedInt(b)) => a == b,
            (Value::UnsignedInt(a), Value::UnsignedInt(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

// Bit-pattern comparison for Double makes equality reflexive.
impl Eq for Value {}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::SignedInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::SignedInt(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UnsignedInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Byte(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
