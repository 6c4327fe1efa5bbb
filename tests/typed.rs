//! Type-tag validation on concrete wrapper types.

mod common;

use common::{alloc, is_live, ref_count, Fake, Tag};
use foreign_rc::{Error, ForeignType, OwnedRef, Ownership};

foreign_rc::foreign_type! {
    /// A text object from the fake system.
    pub struct Text: Fake, tag = Tag::Text;

    /// An ordered collection from the fake system.
    pub struct List: Fake, tag = Tag::List;
}

#[test]
fn matching_tag_constructs_a_valid_wrapper() {
    let raw = alloc(Tag::Text);
    let text = unsafe { Text::from_raw(raw, Ownership::Adopt) };
    assert!(text.is_valid());
    assert_eq!(text.as_raw(), raw);
    assert_eq!(ref_count(raw), 1);

    drop(text);
    assert!(!is_live(raw));
}

#[test]
fn mismatched_tag_soft_fails_to_empty() {
    // A list handle fed to the text type: discarded, never an error.
    let raw = alloc(Tag::List);
    let text = unsafe { Text::from_raw(raw, Ownership::Adopt) };
    assert!(!text.is_valid());
    assert_eq!(text.as_raw(), 0);
    // The rejected handle's increment was released, not leaked.
    assert!(!is_live(raw));
}

#[test]
fn mismatch_under_retain_policy_leaves_the_original_alone() {
    let raw = alloc(Tag::Blob);
    let text = unsafe { Text::from_raw(raw, Ownership::Retain) };
    assert!(!text.is_valid());
    // Our transient retain was balanced; the external owner's count stands.
    assert_eq!(ref_count(raw), 1);
}

#[test]
fn null_handle_soft_fails_to_empty() {
    let text = unsafe { Text::from_raw(0, Ownership::Adopt) };
    assert!(!text.is_valid());
    assert_eq!(text.tag_if_valid(), None);
}

impl Text {
    fn tag_if_valid(&self) -> Option<Tag> {
        self.handle().tag()
    }
}

#[test]
fn from_handle_checks_the_tag() {
    let raw = alloc(Tag::List);
    let handle = unsafe { OwnedRef::<Fake>::from_raw(raw, Ownership::Adopt) };

    let list = List::from_handle(handle);
    assert!(list.is_valid());
    assert_eq!(list.handle().tag(), Some(Tag::List));
}

#[test]
fn try_from_handle_names_both_tags_on_mismatch() {
    let raw = alloc(Tag::Text);
    let handle = unsafe { OwnedRef::<Fake>::from_raw(raw, Ownership::Adopt) };

    let err = List::try_from_handle(handle).unwrap_err();
    assert!(err.is_type_mismatch());
    match err {
        Error::TypeMismatch { expected, found } => {
            assert_eq!(expected, "List");
            assert_eq!(found, "Text");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!is_live(raw));
}

#[test]
fn try_from_handle_rejects_an_empty_handle() {
    let err = Text::try_from_handle(OwnedRef::empty()).unwrap_err();
    assert_eq!(err.to_string(), "invalid handle");
    assert!(matches!(err, Error::InvalidHandle));
}

#[test]
fn typed_clones_balance_like_untyped_ones() {
    let raw = alloc(Tag::Text);
    let a = unsafe { Text::from_raw(raw, Ownership::Adopt) };
    let b = a.clone();
    assert_eq!(ref_count(raw), 2);
    assert_eq!(a, b);

    drop(a);
    assert_eq!(ref_count(raw), 1);
    drop(b);
    assert!(!is_live(raw));
}

#[test]
fn default_and_empty_agree() {
    assert_eq!(Text::default(), Text::empty());
    assert!(!Text::default().is_valid());
}

#[test]
fn into_handle_erases_the_type_without_releasing() {
    let raw = alloc(Tag::List);
    let list = unsafe { List::from_raw(raw, Ownership::Adopt) };

    let handle = list.into_handle();
    assert_eq!(ref_count(raw), 1);
    assert_eq!(handle.tag(), Some(Tag::List));

    // And the erased handle can be re-typed.
    let list = List::from_handle(handle);
    assert!(list.is_valid());
}

#[test]
fn expected_tags_are_per_type() {
    assert_eq!(Text::expected_tag(), Tag::Text);
    assert_eq!(List::expected_tag(), Tag::List);
}
