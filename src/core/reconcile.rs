//! Matching `REQUIRE` annotations to `SATISFIED` annotations by id.
//!
//! Both passes apply the same two rules:
//!
//! 1. First seen wins: a later annotation with the same kind and id as one
//!    already in the scope is reported as a duplicate and discarded.
//! 2. After routing, every id with only one of the two kinds is reported as
//!    a missing pair, anchored at the annotation that exists.

use std::collections::{BTreeMap, btree_map::Entry};

use super::scope::{ExternalScope, FileAnnotation, GlobalScope, LocalScope, ScopeEntry};
use crate::issues::{DuplicateIssue, Issue, MissingIssue, Report};

/// Result of reconciling the annotations of one file.
#[derive(Debug, Clone, Default)]
pub struct FileReconciliation {
    pub issues: Vec<Issue>,
    pub local_scope: LocalScope,
    pub external_scope: ExternalScope,
}

/// Result of reconciling the external scopes of all files.
#[derive(Debug, Clone, Default)]
pub struct GlobalReconciliation {
    pub issues: Vec<Issue>,
    pub global_scope: GlobalScope,
}

/// Route the annotations of one file into its local and external scopes.
///
/// Qualified annotations go to the external scope and are never checked
/// for pairs here; that happens in [`reconcile_global`].
pub fn reconcile_file(annotations: impl IntoIterator<Item = FileAnnotation>) -> FileReconciliation {
    let mut issues = Vec::new();
    let mut local_scope = LocalScope::new();
    let mut external_scope = ExternalScope::default();

    for candidate in annotations {
        if candidate.annotation.is_external() {
            let scope = external_scope.get_mut(candidate.kind());
            match scope.entry(candidate.id().to_string()) {
                Entry::Occupied(first) => issues.push(duplicate(candidate, first.get())),
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
            }
        } else {
            record(&mut local_scope, candidate, &mut issues);
        }
    }

    issues.extend(missing_pairs(&local_scope));
    sort_issues(&mut issues);

    FileReconciliation {
        issues,
        local_scope,
        external_scope,
    }
}

/// Merge the external scopes of all files and check them as one scope.
///
/// Files are processed in path order, and within a file all requires come
/// before all satisfactions, so the first-seen annotation is reproducible.
pub fn reconcile_global<'a>(
    scopes: impl IntoIterator<Item = (&'a str, &'a ExternalScope)>,
) -> GlobalReconciliation {
    let mut scopes: Vec<(&str, &ExternalScope)> = scopes.into_iter().collect();
    scopes.sort_by(|a, b| a.0.cmp(b.0));

    let mut issues = Vec::new();
    let mut global_scope = GlobalScope::new();

    for (_, scope) in scopes {
        let annotations = scope.require.values().chain(scope.satisfied.values());
        for candidate in annotations {
            record(&mut global_scope, candidate.clone(), &mut issues);
        }
    }

    issues.extend(missing_pairs(&global_scope));
    sort_issues(&mut issues);

    GlobalReconciliation {
        issues,
        global_scope,
    }
}

fn record(
    scope: &mut BTreeMap<String, ScopeEntry>,
    candidate: FileAnnotation,
    issues: &mut Vec<Issue>,
) {
    let entry = scope.entry(candidate.id().to_string()).or_default();
    let slot = entry.slot_mut(candidate.kind());
    match slot {
        Some(first) => issues.push(duplicate(candidate, first)),
        None => *slot = Some(candidate),
    }
}

fn duplicate(candidate: FileAnnotation, first: &FileAnnotation) -> Issue {
    Issue::Duplicate(DuplicateIssue {
        duplicate: candidate,
        first: first.clone(),
    })
}

fn missing_pairs<'a>(
    scope: &'a BTreeMap<String, ScopeEntry>,
) -> impl Iterator<Item = Issue> + 'a {
    scope.values().filter_map(|entry| {
        entry.unpaired().map(|annotation| {
            Issue::Missing(MissingIssue {
                annotation: annotation.clone(),
            })
        })
    })
}

/// Stable sort by reported location.
fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| a.location().cmp_position(b.location()));
}
