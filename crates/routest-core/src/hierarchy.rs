//! Cascading of parameters, metadata and hooks from parent to child
//!
//! Values flow strictly top-down: a route inherits from its application and
//! a scenario from its (already merged) route. The child always wins; the
//! merge only ever adds what the child lacks.
//!
//! | Section                          | Rule                                        |
//! |----------------------------------|---------------------------------------------|
//! | `parameters.headers` and friends | append parent entries with an unseen `key`  |
//! | `meta`                           | copy missing keys, union list values        |
//! | `hooks`                          | append parent hooks the child lacks         |
//!
//! None of these operations can fail: a missing section is simply empty.

use crate::node::{
    ApplicationConfig, Meta, Parameter, Parameters, Property, RouteConfig, ScenarioConfig,
};
use serde_json::Value;
use std::collections::HashSet;

/// A record carrying the sections that cascade.
pub trait Inheritable {
    fn parameters(&self) -> &Property<Parameters>;
    fn parameters_mut(&mut self) -> &mut Property<Parameters>;
    fn meta(&self) -> &Property<Meta>;
    fn meta_mut(&mut self) -> &mut Property<Meta>;
    fn hooks(&self) -> &Property<Vec<String>>;
    fn hooks_mut(&mut self) -> &mut Property<Vec<String>>;
}

macro_rules! impl_inheritable {
    ($($record:ty),+ $(,)?) => {
        $(
            impl Inheritable for $record {
                fn parameters(&self) -> &Property<Parameters> {
                    &self.parameters
                }
                fn parameters_mut(&mut self) -> &mut Property<Parameters> {
                    &mut self.parameters
                }
                fn meta(&self) -> &Property<Meta> {
                    &self.meta
                }
                fn meta_mut(&mut self) -> &mut Property<Meta> {
                    &mut self.meta
                }
                fn hooks(&self) -> &Property<Vec<String>> {
                    &self.hooks
                }
                fn hooks_mut(&mut self) -> &mut Property<Vec<String>> {
                    &mut self.hooks
                }
            }
        )+
    };
}

impl_inheritable!(ApplicationConfig, RouteConfig, ScenarioConfig);

/// Run all three merge passes for one parent -> child edge.
///
/// A child section that is unset becomes set as soon as the parent has the
/// section; sections the parent lacks are left untouched.
pub fn inherit<C, P>(child: &mut C, parent: &P)
where
    C: Inheritable + ?Sized,
    P: Inheritable + ?Sized,
{
    if let Some(parent_params) = parent.parameters().get() {
        merge_parameters(child.parameters_mut().get_or_insert_default(), parent_params);
    }
    if let Some(parent_meta) = parent.meta().get() {
        merge_meta(child.meta_mut().get_or_insert_default(), parent_meta);
    }
    if let Some(parent_hooks) = parent.hooks().get() {
        merge_hooks(child.hooks_mut().get_or_insert_default(), parent_hooks);
    }
}

/// Keyed-list merge over headers, path variables and query parameters.
pub fn merge_parameters(child: &mut Parameters, parent: &Parameters) {
    let parent_lists = parent.lists();
    for ((section, child_list), (_, parent_list)) in child.lists_mut().into_iter().zip(parent_lists) {
        let before = child_list.len();
        merge_keyed(child_list, parent_list);
        let added = child_list.len() - before;
        if added > 0 {
            tracing::trace!(section, added, "Inherited parameters");
        }
    }
}

/// Append every parent entry whose `key` the child does not already have.
///
/// Child entries keep their positions; inherited entries follow in parent
/// order. Nothing the child declared is modified.
pub fn merge_keyed(child: &mut Vec<Parameter>, parent: &[Parameter]) {
    let mut seen: HashSet<String> = child.iter().map(|p| p.key.clone()).collect();
    for entry in parent {
        if seen.insert(entry.key.clone()) {
            child.push(entry.clone());
        }
    }
}

/// Merge metadata mappings.
///
/// - keys only the parent has are copied;
/// - keys holding lists on both sides become the deduplicated union, child
///   items first;
/// - any other collision keeps the child's value. A differing value is
///   reported at warn level.
pub fn merge_meta(child: &mut Meta, parent: &Meta) {
    for (key, parent_value) in parent {
        let Some(child_value) = child.get_mut(key) else {
            child.insert(key.clone(), parent_value.clone());
            continue;
        };

        match (child_value, parent_value) {
            (Value::Array(child_items), Value::Array(parent_items)) => {
                union_into(child_items, parent_items);
            }
            (child_value, parent_value) if child_value != parent_value => {
                tracing::warn!(
                    key = key.as_str(),
                    child = %child_value,
                    parent = %parent_value,
                    "Metadata conflict: keeping child value"
                );
            }
            _ => {}
        }
    }
}

fn union_into(child: &mut Vec<Value>, parent: &[Value]) {
    let mut merged: Vec<Value> = Vec::with_capacity(child.len() + parent.len());
    for item in child.drain(..).chain(parent.iter().cloned()) {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    *child = merged;
}

/// Append parent hooks the child lacks, keeping both relative orders.
pub fn merge_hooks(child: &mut Vec<String>, parent: &[String]) {
    for hook in parent {
        if !child.contains(hook) {
            child.push(hook.clone());
        }
    }
}
