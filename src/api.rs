//! The contract an external reference-counting system must satisfy.
//!
//! Everything the crate does reduces to four operations on an opaque handle:
//! retain, release, type-tag lookup, and comparison against a null sentinel.
//! A binding to a real framework implements [`ForeignRc`] over its
//! `extern "C"` surface; the crate's tests implement it over an in-process
//! fake object table.

use std::fmt;

/// An external reference-counting system.
///
/// Implementations describe how to manipulate the reference count and query
/// the runtime type of handles belonging to one foreign object system. The
/// trait has no methods taking `self`; implementors are zero-sized marker
/// types.
///
/// # Safety
///
/// Implementations must uphold the wrapped system's refcount contract:
///
/// * `retain` increments the count of a live handle by exactly one and
///   returns the same handle it was given.
/// * `release` decrements by exactly one and may deallocate at zero.
/// * Increment and decrement are atomic with respect to each other, so
///   handles may be retained and released from any thread.
/// * `tag_of` on a live handle returns a stable identifier for the handle's
///   concrete type.
/// * [`NULL`](ForeignRc::NULL) never refers to a live object.
///
/// The crate only ever calls these functions with handles that were vouched
/// for at an `unsafe` construction boundary and are still covered by an
/// outstanding increment.
pub unsafe trait ForeignRc {
    /// Opaque handle representation (pointer-sized in practice).
    type Raw: Copy + Eq + fmt::Debug;

    /// Runtime type identifier distinguishing concrete foreign types.
    type Tag: Copy + Eq + fmt::Debug;

    /// The null sentinel. A handle equal to `NULL` refers to nothing.
    const NULL: Self::Raw;

    /// Increment the reference count of `raw` and return the same handle.
    fn retain(raw: Self::Raw) -> Self::Raw;

    /// Decrement the reference count of `raw`.
    fn release(raw: Self::Raw);

    /// Runtime type tag of the live handle `raw`.
    fn tag_of(raw: Self::Raw) -> Self::Tag;
}

/// How to take ownership of a raw handle.
///
/// Foreign APIs hand out references under two conventions: functions that
/// transfer their increment to the caller, and functions that return a
/// reference the caller must retain to keep. The wrong choice is the classic
/// refcounting bug (a leak one way, a double release the other), so the
/// policy is always spelled out at the construction site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Take over an increment the caller already holds. No retain is issued;
    /// the handle arrives already counted.
    Adopt,
    /// Create a new owned reference alongside an existing one by issuing a
    /// retain.
    Retain,
}
