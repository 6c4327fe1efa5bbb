//! Typed wrappers over untyped handles, gated by runtime type tags.
//!
//! A foreign object system hands out untyped handles; concrete wrapper types
//! (a string type, a list type, ...) accept one only after checking its
//! runtime tag. On mismatch the handle is discarded and the wrapper comes out
//! empty — the wrapped frameworks' own convention, kept here so call sites
//! probe validity instead of handling errors. [`ForeignType::try_from_handle`]
//! is the opt-in alternative that reports the mismatch instead.

use crate::api::ForeignRc;
use crate::error::{Error, Result};
use crate::handle::OwnedRef;

/// A concrete wrapper type over one foreign object type.
///
/// Usually implemented via [`foreign_type!`](crate::foreign_type), which also
/// generates the standard construction and access surface. Wrapper types add
/// type-specific accessors on top; those are pure pass-throughs to the
/// foreign API and carry no ownership semantics of their own.
///
/// # Safety
///
/// `from_handle_unchecked` must store the handle without inspecting it, and
/// `handle` must return it unchanged: the provided constructors rely on the
/// wrapper holding exactly the handle they validated.
pub unsafe trait ForeignType: Sized {
    /// The object system this type belongs to.
    type Rc: ForeignRc;

    /// The runtime tag a handle must carry to be accepted by this type.
    fn expected_tag() -> <Self::Rc as ForeignRc>::Tag;

    /// Wrap a handle without validating its tag.
    ///
    /// # Safety
    ///
    /// `handle` must be empty or refer to an object whose tag is
    /// [`expected_tag`](ForeignType::expected_tag). Accessors on the wrapper
    /// may pass the handle to tag-specific foreign functions.
    unsafe fn from_handle_unchecked(handle: OwnedRef<Self::Rc>) -> Self;

    /// The underlying owned handle.
    fn handle(&self) -> &OwnedRef<Self::Rc>;

    /// Wrap a handle, validating its runtime tag.
    ///
    /// On mismatch the input is discarded (its increment released) and the
    /// result is empty; an empty input stays empty. Never panics.
    fn from_handle(handle: OwnedRef<Self::Rc>) -> Self {
        let handle = if handle.tag() == Some(Self::expected_tag()) {
            handle
        } else {
            OwnedRef::empty()
        };
        // Tag verified (or empty) above.
        unsafe { Self::from_handle_unchecked(handle) }
    }

    /// Wrap a handle, reporting rather than swallowing a failure.
    ///
    /// Returns [`Error::InvalidHandle`] for an empty input and
    /// [`Error::TypeMismatch`] when the tag does not match. The input is
    /// released on failure.
    fn try_from_handle(handle: OwnedRef<Self::Rc>) -> Result<Self> {
        let Some(found) = handle.tag() else {
            return Err(Error::InvalidHandle);
        };
        let expected = Self::expected_tag();
        if found != expected {
            return Err(Error::TypeMismatch {
                expected: format!("{expected:?}"),
                found: format!("{found:?}"),
            });
        }
        Ok(unsafe { Self::from_handle_unchecked(handle) })
    }
}

/// Declare concrete wrapper types over a foreign object system.
///
/// For each declaration this generates the struct, its [`ForeignType`]
/// implementation, the standard constructors (`empty`, `from_raw`,
/// `from_handle`, `try_from_handle`), accessors (`is_valid`, `as_raw`,
/// `into_handle`), and `Clone`/`Default`/`Debug`/`PartialEq`/`Eq`. Equality
/// is handle identity.
///
/// # Example
///
/// ```ignore
/// foreign_rc::foreign_type! {
///     /// A UTF-16 text object.
///     pub struct Text: MySystem, tag = TypeTag::Text;
///
///     /// An ordered collection.
///     pub struct List: MySystem, tag = TypeTag::List;
/// }
/// ```
#[macro_export]
macro_rules! foreign_type {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $rc:ty , tag = $tag:expr ;
    )+) => {$(
        $(#[$meta])*
        $vis struct $name {
            inner: $crate::OwnedRef<$rc>,
        }

        unsafe impl $crate::ForeignType for $name {
            type Rc = $rc;

            fn expected_tag() -> <$rc as $crate::ForeignRc>::Tag {
                $tag
            }

            unsafe fn from_handle_unchecked(handle: $crate::OwnedRef<$rc>) -> Self {
                Self { inner: handle }
            }

            fn handle(&self) -> &$crate::OwnedRef<$rc> {
                &self.inner
            }
        }

        impl $name {
            /// An empty wrapper holding no object.
            $vis fn empty() -> Self {
                Self {
                    inner: $crate::OwnedRef::empty(),
                }
            }

            /// Wrap a raw handle under the given ownership policy,
            /// validating its runtime tag. A null or mismatched handle
            /// yields an empty wrapper; a mismatched handle is released.
            ///
            /// # Safety
            ///
            /// Same contract as `OwnedRef::from_raw`.
            $vis unsafe fn from_raw(
                raw: <$rc as $crate::ForeignRc>::Raw,
                ownership: $crate::Ownership,
            ) -> Self {
                <Self as $crate::ForeignType>::from_handle(
                    $crate::OwnedRef::from_raw(raw, ownership),
                )
            }

            /// Wrap an owned handle, validating its runtime tag. Mismatch
            /// yields an empty wrapper.
            $vis fn from_handle(handle: $crate::OwnedRef<$rc>) -> Self {
                <Self as $crate::ForeignType>::from_handle(handle)
            }

            /// Wrap an owned handle, returning an error on an empty input
            /// or a tag mismatch.
            $vis fn try_from_handle(handle: $crate::OwnedRef<$rc>) -> $crate::Result<Self> {
                <Self as $crate::ForeignType>::try_from_handle(handle)
            }

            /// Whether this wrapper holds an object.
            $vis fn is_valid(&self) -> bool {
                self.inner.is_valid()
            }

            /// The raw handle, null when empty.
            $vis fn as_raw(&self) -> <$rc as $crate::ForeignRc>::Raw {
                self.inner.as_raw()
            }

            /// Give up the typed view, keeping ownership.
            $vis fn into_handle(self) -> $crate::OwnedRef<$rc> {
                self.inner
            }
        }

        impl ::std::clone::Clone for $name {
            fn clone(&self) -> Self {
                Self {
                    inner: self.inner.clone(),
                }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.inner == other.inner
            }
        }

        impl ::std::cmp::Eq for $name {}

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("handle", &self.inner)
                    .finish()
            }
        }
    )+};
}
