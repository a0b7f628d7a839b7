/// Optional host capability: how many values the caller's binding site
/// expects a pull to produce.
///
/// Purely sugar over explicit widths. One slot is reserved for the child
/// handle, the remaining slots become the group width, so a tree built
/// without a hint simply requires [`Want::Columns`](crate::Want::Columns)
/// at every nested call.
pub trait WidthHint {
    /// Expected number of binding slots, if the host can tell.
    fn expected_values(&self) -> Option<usize>;
}
