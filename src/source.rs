use auto_impl::auto_impl;

use crate::row::Row;

/// A pull-based supplier of fixed-width rows.
///
/// `None` signals exhaustion and must be monotonic: once a source has
/// returned `None` it keeps returning `None`. No seek or rewind is ever
/// required. Database cursors and similar fetch-next handles implement
/// this directly; closures and in-memory tables go through [`pull_fn`]
/// and [`RowList`].
#[auto_impl(&mut, Box)]
pub trait RowSource {
    fn next_row(&mut self) -> Option<Row>;
}

/// In-memory source over pre-built rows, consumed front-to-back.
pub struct RowList {
    rows: std::vec::IntoIter<Row>,
}

impl RowList {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl From<Vec<Row>> for RowList {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl RowSource for RowList {
    fn next_row(&mut self) -> Option<Row> {
        self.rows.next()
    }
}

/// Adapter turning a zero-argument pull closure into a [`RowSource`].
pub struct PullFn<F>(F);

/// Wrap a pull closure. The closure is the source: it is called once per
/// fetched row and owes the same stays-exhausted contract.
pub fn pull_fn<F>(f: F) -> PullFn<F>
where
    F: FnMut() -> Option<Row>,
{
    PullFn(f)
}

impl<F> RowSource for PullFn<F>
where
    F: FnMut() -> Option<Row>,
{
    fn next_row(&mut self) -> Option<Row> {
        (self.0)()
    }
}
