use crate::row::{self, Row};
use crate::source::RowSource;
use crate::value::Value;

/// One-row lookahead buffer over the adapted row source, shared by every
/// iterator of one tree.
///
/// Boundary metadata is recomputed exactly once per fetch, immediately
/// after fetching and before any iterator inspects it. `advance` is only
/// ever called once the buffered row has been fully processed; never
/// speculatively.
pub(crate) struct RowCursor {
    source: Box<dyn RowSource>,
    /// Most recently fetched row. `None` before the first fetch; the
    /// empty row once the source is exhausted.
    current: Option<Row>,
    /// Leading columns equal between `current` and the row before it.
    /// `None` until two rows have been fetched.
    unchanged_prefix: Option<usize>,
    /// Smallest index from which `current` is entirely null.
    trailing_null_from: usize,
    /// Offset up to which `current` has been handed out, if at all.
    /// `None` is distinct from `Some(0)`: offset 0 is a valid consumed
    /// amount.
    consumed_up_to: Option<usize>,
    /// Number of rows fetched so far. Iterators record this at creation
    /// to recognize the row they were created from.
    serial: u64,
}

impl RowCursor {
    pub(crate) fn new(source: Box<dyn RowSource>) -> Self {
        Self {
            source,
            current: None,
            unchanged_prefix: None,
            trailing_null_from: 0,
            consumed_up_to: None,
            serial: 0,
        }
    }

    /// Whether any row has been fetched yet.
    pub(crate) fn fetched(&self) -> bool {
        self.current.is_some()
    }

    /// The buffered row is the empty row an exhausted source yields.
    pub(crate) fn exhausted(&self) -> bool {
        self.current.as_ref().is_some_and(|r| r.is_empty())
    }

    pub(crate) fn unchanged_prefix(&self) -> Option<usize> {
        self.unchanged_prefix
    }

    pub(crate) fn trailing_null_from(&self) -> usize {
        self.trailing_null_from
    }

    pub(crate) fn consumed_up_to(&self) -> Option<usize> {
        self.consumed_up_to
    }

    pub(crate) fn serial(&self) -> u64 {
        self.serial
    }

    /// Replace the buffered row with the next one from the source and
    /// recompute the boundary metadata against the row it replaces.
    #[tracing::instrument(skip_all)]
    pub(crate) fn advance(&mut self) {
        if self.exhausted() {
            // Sources never un-exhaust; don't ask again.
            self.unchanged_prefix = Some(0);
            self.consumed_up_to = None;
            return;
        }

        let next = self.source.next_row().unwrap_or_default();
        let prev = self.current.replace(next);
        self.serial += 1;

        let current = self.current.as_deref().unwrap_or(&[]);
        self.unchanged_prefix = prev.as_deref().map(|p| row::shared_prefix_len(p, current));
        self.trailing_null_from = row::trailing_null_from(current);
        self.consumed_up_to = None;

        tracing::trace!(
            serial = self.serial,
            prefix = ?self.unchanged_prefix,
            nulls_from = self.trailing_null_from,
            columns = current.len(),
            "advanced"
        );
    }

    /// Hand out columns `offset..offset + width` of the buffered row, or
    /// `offset..` when `width` is `None` (terminal call), and record how
    /// deep the row has now been consumed. Slicing is clamped to the
    /// actual row length so a short row degrades to fewer columns instead
    /// of a panic.
    pub(crate) fn yield_at(&mut self, offset: usize, width: Option<usize>) -> Vec<Value> {
        let Some(current) = &self.current else {
            return Vec::new();
        };

        let len = current.len();
        // The nominal last column, not the clamped one: a child created at
        // `offset + width` must still see this row as unconsumed.
        let last_col = width.map_or_else(|| len.saturating_sub(1), |w| offset + w - 1);
        self.consumed_up_to = Some(last_col);

        let start = offset.min(len);
        let end = width.map_or(len, |w| (offset + w).min(len));
        current[start..end].to_vec()
    }
}
