//! Process-wide foreign constants with once-only resolution.
//!
//! Frameworks export well-known constant objects (sentinel values, option
//! keys) whose handles must be looked up at runtime, typically through a
//! dynamic symbol lookup that is only worth doing once. [`ForeignConstant`]
//! caches the result of that lookup for the life of the process and hands
//! out borrows; constants are owned by the framework and are never retained
//! or released here.

use std::sync::OnceLock;

use crate::api::ForeignRc;
use crate::handle::BorrowedRef;

/// A lazily resolved, process-wide constant handle.
///
/// Const-constructible, so it can live in a `static`. The resolver runs at
/// most once, on first access, guarded by [`std::sync::OnceLock`]; a
/// resolver that comes back with the null sentinel (symbol not found) makes
/// every subsequent [`get`](ForeignConstant::get) return an empty borrow.
pub struct ForeignConstant<F: ForeignRc> {
    cell: OnceLock<F::Raw>,
    resolve: fn() -> F::Raw,
}

impl<F: ForeignRc> ForeignConstant<F> {
    /// Create an unresolved constant.
    ///
    /// # Safety
    ///
    /// The resolver must return either the null sentinel or a handle that
    /// stays live for the remainder of the process without this crate
    /// holding an increment on it.
    pub const unsafe fn new(resolve: fn() -> F::Raw) -> Self {
        Self {
            cell: OnceLock::new(),
            resolve,
        }
    }

    /// The constant's handle, resolving it on first call.
    ///
    /// Returns an empty borrow if resolution came back null.
    pub fn get(&self) -> BorrowedRef<'_, F> {
        let raw = *self.cell.get_or_init(self.resolve);
        // Live for the process per the new() contract.
        unsafe { BorrowedRef::from_raw(raw) }
    }

    /// Whether the resolver has already run.
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}
