//! Hierarchical (nested group-by) iteration over a sorted, flat stream of
//! fixed-width rows, the typical shape of a result set returned by a
//! relational query with a multi-column `ORDER BY`.

pub mod error;
pub mod row;
pub mod source;
pub mod value;

mod cursor;
mod group;
mod hint;

pub use error::{Error, Result};
pub use group::{GroupIterator, Leaves, Pulled, Want};
pub use hint::WidthHint;
pub use row::Row;
pub use source::{PullFn, RowList, RowSource, pull_fn};
pub use value::Value;

#[cfg(test)]
mod group_test;
