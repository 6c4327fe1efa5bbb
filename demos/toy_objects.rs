//! End-to-end demo binding a toy refcounted object system.
//!
//! The "framework" here is an in-process object table, standing in for a C
//! library that hands out opaque refcounted handles. Run with:
//! cargo run --example toy_objects

// The generated wrapper surface is wider than this demo exercises.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use foreign_rc::{ForeignRc, OwnedRef, Ownership};

/// Runtime type tags the toy framework distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToyTag {
    Text,
    List,
}

struct ToyObject {
    refs: u64,
    tag: ToyTag,
    text: String,
}

fn objects() -> MutexGuard<'static, HashMap<u64, ToyObject>> {
    static OBJECTS: OnceLock<Mutex<HashMap<u64, ToyObject>>> = OnceLock::new();
    OBJECTS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .expect("object table poisoned")
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The framework's "C API": create, retain, release, inspect.
fn toy_create_text(text: &str) -> u64 {
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    objects().insert(
        id,
        ToyObject {
            refs: 1,
            tag: ToyTag::Text,
            text: text.to_string(),
        },
    );
    id
}

fn toy_copy_text(raw: u64) -> String {
    objects().get(&raw).map(|o| o.text.clone()).unwrap_or_default()
}

fn toy_ref_count(raw: u64) -> u64 {
    objects().get(&raw).map(|o| o.refs).unwrap_or(0)
}

/// The binding: four operations wired into the crate's contract.
pub struct Toy;

unsafe impl ForeignRc for Toy {
    type Raw = u64;
    type Tag = ToyTag;
    const NULL: u64 = 0;

    fn retain(raw: u64) -> u64 {
        if let Some(object) = objects().get_mut(&raw) {
            object.refs += 1;
        }
        raw
    }

    fn release(raw: u64) {
        let mut table = objects();
        if let Some(object) = table.get_mut(&raw) {
            object.refs -= 1;
            if object.refs == 0 {
                table.remove(&raw);
            }
        }
    }

    fn tag_of(raw: u64) -> ToyTag {
        objects().get(&raw).map(|o| o.tag).unwrap_or(ToyTag::Text)
    }
}

foreign_rc::foreign_type! {
    /// A text object in the toy framework.
    pub struct Text: Toy, tag = ToyTag::Text;

    /// An ordered collection in the toy framework.
    pub struct List: Toy, tag = ToyTag::List;
}

impl Text {
    /// The string contents, empty when the wrapper is.
    fn contents(&self) -> String {
        toy_copy_text(self.as_raw())
    }
}

fn main() {
    // toy_create_text returns its increment to the caller: adopt it.
    let raw = toy_create_text("hello from the toy framework");
    let greeting = unsafe { Text::from_raw(raw, Ownership::Adopt) };
    println!("valid: {}", greeting.is_valid());
    println!("contents: {}", greeting.contents());
    println!("refcount: {}", toy_ref_count(raw));

    // Clones retain; drops release.
    let copy = greeting.clone();
    println!("refcount after clone: {}", toy_ref_count(raw));
    drop(copy);
    println!("refcount after drop: {}", toy_ref_count(raw));

    // A text handle fed to the list type soft-fails to empty.
    let not_a_list = List::from_handle(greeting.into_handle());
    println!("typed as List: valid = {}", not_a_list.is_valid());
    println!("object live: {}", toy_ref_count(raw) > 0);

    // The untyped layer works the same way without tags.
    let raw = toy_create_text("untyped");
    let handle = unsafe { OwnedRef::<Toy>::from_raw(raw, Ownership::Adopt) };
    println!("untyped tag: {:?}", handle.tag());
    drop(handle);
    println!("released: {}", toy_ref_count(raw) == 0);
}
