use std::cell::RefCell;
use std::rc::Rc;

use crate::cursor::RowCursor;
use crate::error::{Error, Result};
use crate::hint::WidthHint;
use crate::row::Row;
use crate::source::{RowList, RowSource, pull_fn};
use crate::value::Value;

/// State shared by every iterator of one tree: the lookahead cursor plus
/// the host's optional arity hint.
struct Shared {
    cursor: RefCell<RowCursor>,
    hint: Option<Box<dyn WidthHint>>,
}

/// What a [`pull`](GroupIterator::pull) call asks for.
#[derive(Clone, Copy, Debug)]
pub enum Want {
    /// Terminal call: every remaining column of the row, no child.
    Rest,
    /// Recursive call: exactly this many columns plus a nested iterator.
    Columns(usize),
    /// Recursive call whose width comes from the tree's [`WidthHint`].
    Hinted,
}

/// What a [`pull`](GroupIterator::pull) call produced.
#[derive(Debug)]
pub enum Pulled {
    /// The remaining columns of the next row at this depth.
    Leaf(Vec<Value>),
    /// A fixed-width slice of the next distinct group, plus the iterator
    /// over that group's deeper columns.
    Group(Vec<Value>, GroupIterator),
    /// This group (or the whole source) has no more rows. Every later
    /// call on the same iterator yields `Eof` again.
    Eof,
}

/// A view over the shared row cursor starting at a fixed column offset.
///
/// One tree of `GroupIterator`s, rooted at offset 0, walks a sorted row
/// stream depth-first: each recursive [`group`](Self::group) call yields
/// the next distinct slice of columns at this depth together with a child
/// iterator over the columns to its right, and each terminal
/// [`rest`](Self::rest) call yields plain leaf rows. All iterators of one
/// tree share a single one-row lookahead, so at most one of them is active
/// at a time; a child that is dropped half-way is skipped by the parent's
/// next call.
///
/// ```
/// use rowtree::{GroupIterator, row};
///
/// let rows = vec![
///     row!["X", "B", "fizz"],
///     row!["X", "D", "bang"],
///     row!["Y", "B", "pow"],
/// ];
/// let mut groups = GroupIterator::over_rows(rows);
/// while let Some((head, sounds)) = groups.group(2).unwrap() {
///     for sound in sounds.leaves() {
///         println!("{head:?}: {sound:?}");
///     }
/// }
/// ```
pub struct GroupIterator {
    shared: Rc<Shared>,
    /// First column of this iterator's window; fixed at creation.
    offset: usize,
    /// Cursor serial at creation. The row buffered then is the row this
    /// iterator was created from: its leading columns are the very prefix
    /// this iterator tracks, so the ancestor-ended check must not apply
    /// to it.
    born: u64,
    /// Latched once this iterator has seen its end.
    done: bool,
}

impl GroupIterator {
    /// Build the depth-0 iterator over any fetch-next-capable handle.
    pub fn over(source: impl RowSource + 'static) -> Self {
        Self::build(Box::new(source), None)
    }

    /// Depth-0 iterator over an ordered sequence of pre-built rows.
    pub fn over_rows(rows: Vec<Row>) -> Self {
        Self::over(RowList::from(rows))
    }

    /// Depth-0 iterator over a zero-argument pull closure.
    pub fn over_fn<F>(f: F) -> Self
    where
        F: FnMut() -> Option<Row> + 'static,
    {
        Self::over(pull_fn(f))
    }

    /// Like [`over`](Self::over), with a host-provided arity hint backing
    /// [`Want::Hinted`].
    pub fn with_hint(source: impl RowSource + 'static, hint: Box<dyn WidthHint>) -> Self {
        Self::build(Box::new(source), Some(hint))
    }

    fn build(source: Box<dyn RowSource>, hint: Option<Box<dyn WidthHint>>) -> Self {
        Self {
            shared: Rc::new(Shared {
                cursor: RefCell::new(RowCursor::new(source)),
                hint,
            }),
            offset: 0,
            born: 0,
            done: false,
        }
    }

    fn child(&self, offset: usize) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            offset,
            born: self.shared.cursor.borrow().serial(),
            done: false,
        }
    }

    /// One call of the iteration protocol. Dispatches to
    /// [`rest`](Self::rest) or [`group`](Self::group); `Want::Hinted`
    /// resolves the width through the tree's [`WidthHint`] first, one slot
    /// reserved for the child handle.
    ///
    /// Usage errors (`ZeroWidth`, `MissingWidth`) are raised before the
    /// cursor moves, so a failed call never loses rows.
    pub fn pull(&mut self, want: Want) -> Result<Pulled> {
        match want {
            Want::Rest => Ok(self.rest().map_or(Pulled::Eof, Pulled::Leaf)),
            Want::Columns(width) => self.pull_group(width),
            Want::Hinted => {
                let width = self.hinted_width()?;
                self.pull_group(width)
            }
        }
    }

    /// Recursive call: the first `width` columns of the next distinct
    /// group at this depth, plus the iterator over that group's remaining
    /// columns. `None` once this iterator's own group has ended.
    pub fn group(&mut self, width: usize) -> Result<Option<(Vec<Value>, GroupIterator)>> {
        if width == 0 {
            return Err(Error::ZeroWidth);
        }
        Ok(self.next_values(Some(width)).map(|values| {
            let child = self.child(self.offset + width);
            (values, child)
        }))
    }

    /// Terminal call: every remaining column of the next row at this
    /// depth. `None` once this iterator's group has ended.
    pub fn rest(&mut self) -> Option<Vec<Value>> {
        self.next_values(None)
    }

    /// Consume the rest of this group as terminal rows.
    pub fn leaves(self) -> Leaves {
        Leaves(self)
    }

    fn pull_group(&mut self, width: usize) -> Result<Pulled> {
        Ok(self
            .group(width)?
            .map_or(Pulled::Eof, |(values, child)| Pulled::Group(values, child)))
    }

    fn hinted_width(&self) -> Result<usize> {
        let slots = self
            .shared
            .hint
            .as_ref()
            .and_then(|hint| hint.expected_values())
            .ok_or(Error::MissingWidth)?;
        // One slot carries the child handle; the rest are data columns.
        match slots.saturating_sub(1) {
            0 => Err(Error::ZeroWidth),
            width => Ok(width),
        }
    }

    /// Land the shared cursor on the next row this iterator is entitled
    /// to yield and hand out its columns. `width` is `None` for terminal
    /// calls. Advances the cursor zero or more whole rows; never buffers
    /// more than one row ahead.
    fn next_values(&mut self, width: Option<usize>) -> Option<Vec<Value>> {
        if self.done {
            return None;
        }

        let mut cursor = self.shared.cursor.borrow_mut();
        if !cursor.fetched() {
            cursor.advance();
        }

        loop {
            if cursor.exhausted() {
                break;
            }
            // A prefix column before our offset changed: an ancestor group
            // ended, and so did this iterator. The row this iterator was
            // created from is exempt; its prefix relates it to the row
            // before our group, not to us.
            if cursor.serial() != self.born
                && cursor.unchanged_prefix().is_some_and(|p| p < self.offset)
            {
                break;
            }
            // Recursive calls only: a row unchanged through our whole
            // window and beyond still belongs to a child group the caller
            // abandoned. Skip it without yielding.
            if let (Some(w), Some(p)) = (width, cursor.unchanged_prefix())
                && p >= self.offset + w
            {
                tracing::trace!(offset = self.offset, "skipping rest of abandoned child group");
                cursor.advance();
                continue;
            }
            // All-null from our offset onward: invisible at this depth and
            // below, though its leading columns still drove the boundary
            // checks above.
            if cursor.trailing_null_from() <= self.offset {
                cursor.advance();
                continue;
            }
            // Already handed out at or past this offset.
            if cursor.consumed_up_to().is_some_and(|c| c >= self.offset) {
                cursor.advance();
                continue;
            }
            return Some(cursor.yield_at(self.offset, width));
        }

        drop(cursor);
        self.done = true;
        None
    }
}

impl std::fmt::Debug for GroupIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupIterator")
            .field("offset", &self.offset)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Terminal-mode adapter returned by [`GroupIterator::leaves`].
pub struct Leaves(GroupIterator);

impl Iterator for Leaves {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.rest()
    }
}

// Exhaustion is latched, so the iterator is fused for free.
impl std::iter::FusedIterator for Leaves {}
