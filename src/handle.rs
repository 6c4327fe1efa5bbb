//! Owning and borrowing handles for external reference-counted resources.
//!
//! [`OwnedRef`] holds exactly one increment of an external object's reference
//! count and releases it on drop. [`BorrowedRef`] refers to an object without
//! touching its count at all. Keeping the two apart is the point of the
//! crate: treating a borrow as owned is a use-after-free, treating an owned
//! reference as a borrow is a leak.

use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::api::{ForeignRc, Ownership};

/// An owned reference to an external reference-counted resource.
///
/// Either empty, or holds a handle whose external count this instance has
/// incremented by exactly one. Cloning retains, dropping releases, and the
/// handle itself is the only state.
///
/// There is no error path anywhere on this type: constructing from the null
/// sentinel yields an empty handle, and every operation on an empty handle
/// returns a sentinel (`NULL`, `None`, `false`) or is a no-op.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use foreign_rc::{ForeignRc, OwnedRef, Ownership};
///
/// static REFS: AtomicU32 = AtomicU32::new(0);
///
/// struct Counted;
/// unsafe impl ForeignRc for Counted {
///     type Raw = u32;
///     type Tag = u8;
///     const NULL: u32 = 0;
///     fn retain(raw: u32) -> u32 {
///         REFS.fetch_add(1, Ordering::SeqCst);
///         raw
///     }
///     fn release(_raw: u32) {
///         REFS.fetch_sub(1, Ordering::SeqCst);
///     }
///     fn tag_of(_raw: u32) -> u8 {
///         7
///     }
/// }
///
/// // The external system allocated an object and handed us its increment.
/// REFS.store(1, Ordering::SeqCst);
/// let a = unsafe { OwnedRef::<Counted>::from_raw(1, Ownership::Adopt) };
///
/// let b = a.clone();
/// assert_eq!(REFS.load(Ordering::SeqCst), 2);
///
/// drop(a);
/// drop(b);
/// assert_eq!(REFS.load(Ordering::SeqCst), 0);
/// ```
pub struct OwnedRef<F: ForeignRc> {
    raw: F::Raw,
    _system: PhantomData<F>,
}

impl<F: ForeignRc> OwnedRef<F> {
    /// An empty handle holding no resource. No external call.
    pub fn empty() -> Self {
        Self {
            raw: F::NULL,
            _system: PhantomData,
        }
    }

    /// Wrap a raw handle under the given ownership policy.
    ///
    /// A [`NULL`](ForeignRc::NULL) input yields an empty handle regardless
    /// of policy. With [`Ownership::Retain`] the count is incremented; with
    /// [`Ownership::Adopt`] the handle is stored as-is and the caller's
    /// increment travels into the new instance.
    ///
    /// # Safety
    ///
    /// `raw` must be `NULL` or a live handle of the `F` object system. Under
    /// [`Ownership::Adopt`] the caller must hold an increment it is giving
    /// up; under [`Ownership::Retain`] the handle must stay live for the
    /// duration of the call.
    pub unsafe fn from_raw(raw: F::Raw, ownership: Ownership) -> Self {
        if raw == F::NULL {
            return Self::empty();
        }
        let raw = match ownership {
            Ownership::Adopt => raw,
            Ownership::Retain => F::retain(raw),
        };
        Self {
            raw,
            _system: PhantomData,
        }
    }

    /// Whether this handle refers to a resource.
    pub fn is_valid(&self) -> bool {
        self.raw != F::NULL
    }

    /// The raw handle, `NULL` when empty. No refcount effect.
    ///
    /// The resource is only guaranteed live while `self` (or another owner)
    /// is; callers must not treat the result as owned.
    pub fn as_raw(&self) -> F::Raw {
        self.raw
    }

    /// Transfer ownership of the raw handle to the caller.
    ///
    /// The increment this instance held travels with the returned handle;
    /// no release happens. Returns `NULL` if the handle was empty.
    pub fn into_raw(self) -> F::Raw {
        let raw = self.raw;
        mem::forget(self);
        raw
    }

    /// Steal the handle, leaving `self` empty. No refcount change.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Exchange handles with `other`. No refcount effect, never panics.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Runtime type tag of the held resource, `None` when empty.
    pub fn tag(&self) -> Option<F::Tag> {
        if self.is_valid() {
            Some(F::tag_of(self.raw))
        } else {
            None
        }
    }

    /// Borrow the resource without affecting its count.
    pub fn as_borrowed(&self) -> BorrowedRef<'_, F> {
        BorrowedRef {
            raw: self.raw,
            _life: PhantomData,
        }
    }
}

impl<F: ForeignRc> Clone for OwnedRef<F> {
    /// Retains the resource if valid; cloning an empty handle is free.
    ///
    /// Plain assignment (`a = b.clone()`) releases whatever `a` previously
    /// held once the replacement is in place, so there is no separate
    /// assignment operation.
    fn clone(&self) -> Self {
        if self.is_valid() {
            Self {
                raw: F::retain(self.raw),
                _system: PhantomData,
            }
        } else {
            Self::empty()
        }
    }
}

impl<F: ForeignRc> Drop for OwnedRef<F> {
    fn drop(&mut self) {
        if self.is_valid() {
            F::release(self.raw);
        }
    }
}

impl<F: ForeignRc> Default for OwnedRef<F> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Handle identity: two owned references are equal when they refer to the
/// same external object (or are both empty).
impl<F: ForeignRc> PartialEq for OwnedRef<F> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<F: ForeignRc> Eq for OwnedRef<F> {}

impl<F: ForeignRc> fmt::Debug for OwnedRef<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedRef")
            .field("raw", &self.raw)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// A non-owning reference to an external resource.
///
/// Never touches the reference count. Used for transient values where the
/// foreign API hands back a reference it still owns, e.g. a container
/// returning a momentary pointer to an element. The lifetime ties the borrow
/// to whatever guarantees the resource stays live (typically an [`OwnedRef`]
/// or the process itself for immortal constants).
///
/// Promote to an owned reference with [`BorrowedRef::retain`].
pub struct BorrowedRef<'a, F: ForeignRc> {
    raw: F::Raw,
    _life: PhantomData<&'a F>,
}

impl<'a, F: ForeignRc> BorrowedRef<'a, F> {
    /// An empty borrow.
    pub fn empty() -> Self {
        Self {
            raw: F::NULL,
            _life: PhantomData,
        }
    }

    /// Wrap a raw handle without taking ownership. `NULL` yields an empty
    /// borrow.
    ///
    /// # Safety
    ///
    /// `raw` must be `NULL` or a handle that stays live for `'a`.
    pub unsafe fn from_raw(raw: F::Raw) -> Self {
        Self {
            raw,
            _life: PhantomData,
        }
    }

    /// Whether this borrow refers to a resource.
    pub fn is_valid(&self) -> bool {
        self.raw != F::NULL
    }

    /// The raw handle, `NULL` when empty.
    pub fn as_raw(&self) -> F::Raw {
        self.raw
    }

    /// Runtime type tag, `None` when empty.
    pub fn tag(&self) -> Option<F::Tag> {
        if self.is_valid() {
            Some(F::tag_of(self.raw))
        } else {
            None
        }
    }

    /// Promote the borrow into an owned reference by retaining.
    ///
    /// An empty borrow promotes to an empty handle.
    pub fn retain(&self) -> OwnedRef<F> {
        // Live for 'a by the from_raw contract, so retaining here is sound.
        unsafe { OwnedRef::from_raw(self.raw, Ownership::Retain) }
    }
}

impl<F: ForeignRc> Clone for BorrowedRef<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ForeignRc> Copy for BorrowedRef<'_, F> {}

impl<F: ForeignRc> PartialEq for BorrowedRef<'_, F> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<F: ForeignRc> Eq for BorrowedRef<'_, F> {}

impl<F: ForeignRc> fmt::Debug for BorrowedRef<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorrowedRef")
            .field("raw", &self.raw)
            .field("valid", &self.is_valid())
            .finish()
    }
}
