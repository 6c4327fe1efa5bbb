//! A fake foreign object system for integration tests.
//!
//! Objects live in a process-wide table keyed by handle id, each with a
//! reference count and a type tag. Releasing the last reference removes the
//! entry, so over-releases and leaks both show up as wrong counts. Tests
//! allocate their own objects and only assert on those, which keeps the
//! shared table safe under the parallel test runner.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use foreign_rc::ForeignRc;

/// Type tags the fake system distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Text,
    List,
    Blob,
}

struct Slot {
    refs: u64,
    tag: Tag,
}

fn table() -> MutexGuard<'static, HashMap<u64, Slot>> {
    static TABLE: OnceLock<Mutex<HashMap<u64, Slot>>> = OnceLock::new();
    TABLE
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .expect("object table poisoned")
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Marker type implementing the refcount contract over the fake table.
pub struct Fake;

unsafe impl ForeignRc for Fake {
    type Raw = u64;
    type Tag = Tag;
    const NULL: u64 = 0;

    fn retain(raw: u64) -> u64 {
        table()
            .get_mut(&raw)
            .expect("retain of a dead handle")
            .refs += 1;
        raw
    }

    fn release(raw: u64) {
        let mut objects = table();
        let slot = objects.get_mut(&raw).expect("release of a dead handle");
        slot.refs -= 1;
        if slot.refs == 0 {
            objects.remove(&raw);
        }
    }

    fn tag_of(raw: u64) -> Tag {
        table().get(&raw).expect("tag_of a dead handle").tag
    }
}

/// Allocate an object with refcount 1 and return its raw handle.
pub fn alloc(tag: Tag) -> u64 {
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    table().insert(id, Slot { refs: 1, tag });
    id
}

/// Current refcount of `raw`, 0 if the object has been deallocated.
pub fn ref_count(raw: u64) -> u64 {
    table().get(&raw).map(|slot| slot.refs).unwrap_or(0)
}

/// Whether the object behind `raw` is still allocated.
pub fn is_live(raw: u64) -> bool {
    table().contains_key(&raw)
}

/// Drop the external increment `alloc` handed out, as a framework caller
/// would after wrapping the handle.
pub fn drop_external_ref(raw: u64) {
    Fake::release(raw);
}
