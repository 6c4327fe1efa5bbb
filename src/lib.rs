//! Safe RAII ownership for opaque, externally reference-counted handles.
//!
//! Many C frameworks expose an object model the caller never sees the inside
//! of: functions hand out opaque handles, and the caller's only obligations
//! are to balance every retain with a release and to check runtime type tags
//! before treating a handle as a concrete type. This crate packages those
//! obligations as value types, so that cloning retains, dropping releases,
//! and a handle of the wrong type never reaches a typed accessor.
//!
//! The foreign system itself is abstracted as [`ForeignRc`]: four operations
//! (retain, release, tag lookup, and a null sentinel) that a binding
//! implements over the framework's `extern "C"` surface. On top of that:
//!
//! * [`OwnedRef`] owns exactly one increment of an object's count.
//! * [`BorrowedRef`] refers to an object without touching its count.
//! * [`foreign_type!`] declares concrete wrapper types gated by type tags.
//! * [`ForeignConstant`] resolves process-wide framework constants once.
//!
//! Absent or mistyped resources are represented as empty handles, not as
//! errors; call sites probe [`OwnedRef::is_valid`] the way they would
//! null-check in the wrapped framework's own idiom.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use foreign_rc::{ForeignRc, OwnedRef, Ownership};
//!
//! // A one-object stand-in for a foreign refcounted system.
//! static REFS: AtomicU32 = AtomicU32::new(0);
//!
//! struct Counted;
//!
//! unsafe impl ForeignRc for Counted {
//!     type Raw = u32;
//!     type Tag = u8;
//!     const NULL: u32 = 0;
//!     fn retain(raw: u32) -> u32 {
//!         REFS.fetch_add(1, Ordering::SeqCst);
//!         raw
//!     }
//!     fn release(_raw: u32) {
//!         REFS.fetch_sub(1, Ordering::SeqCst);
//!     }
//!     fn tag_of(_raw: u32) -> u8 {
//!         1
//!     }
//! }
//!
//! // The "framework" allocates an object and hands over its increment.
//! REFS.store(1, Ordering::SeqCst);
//! let first = unsafe { OwnedRef::<Counted>::from_raw(1, Ownership::Adopt) };
//!
//! // Clones retain, drops release, the count always balances.
//! let second = first.clone();
//! assert_eq!(REFS.load(Ordering::SeqCst), 2);
//! drop(first);
//! drop(second);
//! assert_eq!(REFS.load(Ordering::SeqCst), 0);
//! ```
//!
//! # Thread safety
//!
//! The crate performs no locking of its own; atomicity of the reference
//! count is the [`ForeignRc`] implementation's promise, and `Send`/`Sync`
//! of the handle types follow from the raw handle representation.
//! Concurrent mutation of one logical object through two handles is the
//! caller's concern, exactly as with the wrapped API.

pub mod api;
pub mod constant;
pub mod error;
pub mod handle;
pub mod typed;

// Re-export main types at the crate root
pub use api::{ForeignRc, Ownership};
pub use constant::ForeignConstant;
pub use error::{Error, Result};
pub use handle::{BorrowedRef, OwnedRef};
pub use typed::ForeignType;
