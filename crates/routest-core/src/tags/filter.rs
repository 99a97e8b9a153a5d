//! Primitive tag operators
//!
//! Each operator takes a collection and returns the members that pass, in
//! their original order. The input is never modified and every operator is
//! total: an empty input or an empty tag list simply yields nothing (or
//! everything, for the negated forms).

use super::TagSet;

/// Anything carrying a tag set.
pub trait Tagged {
    fn tag_set(&self) -> &TagSet;
}

/// Members tagged with `tag`.
pub fn is<'a, T: Tagged>(items: &[&'a T], tag: &str) -> Vec<&'a T> {
    keep(items, |tags| tags.contains(tag))
}

/// Members not tagged with `tag`.
pub fn is_not<'a, T: Tagged>(items: &[&'a T], tag: &str) -> Vec<&'a T> {
    keep(items, |tags| !tags.contains(tag))
}

/// Members tagged with both `a` and `b`.
pub fn and<'a, T: Tagged>(items: &[&'a T], a: &str, b: &str) -> Vec<&'a T> {
    keep(items, |tags| tags.contains(a) && tags.contains(b))
}

/// Members tagged with `a`, `b` or both.
pub fn or<'a, T: Tagged>(items: &[&'a T], a: &str, b: &str) -> Vec<&'a T> {
    keep(items, |tags| tags.contains(a) || tags.contains(b))
}

/// Members tagged with at least one of `any`.
pub fn in_any<'a, T: Tagged>(items: &[&'a T], any: &[&str]) -> Vec<&'a T> {
    keep(items, |tags| any.iter().any(|t| tags.contains(t)))
}

/// Members tagged with none of `any`.
pub fn not_in<'a, T: Tagged>(items: &[&'a T], any: &[&str]) -> Vec<&'a T> {
    keep(items, |tags| !any.iter().any(|t| tags.contains(t)))
}

pub(crate) fn keep<'a, T: Tagged>(items: &[&'a T], pred: impl Fn(&TagSet) -> bool) -> Vec<&'a T> {
    items.iter().copied().filter(|item| pred(item.tag_set())).collect()
}
