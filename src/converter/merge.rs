//! Declaration merging.
//!
//! One symbol may carry declarations of several syntactic kinds. This module
//! decides how those kinds are grouped into reflections; it looks only at
//! the set of kinds, so it can be tested on its own.
//!
//! | Kinds present                     | Result                          |
//! |-----------------------------------|---------------------------------|
//! | class + interface                 | one class                       |
//! | get accessor + set accessor       | one accessor                    |
//! | property + property signature     | one property                    |
//! | method + method signature         | one method                      |
//! | anything else                     | one reflection per kind         |

use std::collections::BTreeSet;

use crate::program::DeclarationKind;

/// Kinds converted together, and the kind whose converter handles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    pub primary: DeclarationKind,
    pub kinds: Vec<DeclarationKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeDecision {
    /// In declaration-kind order of their primary kind.
    pub groups: Vec<MergeGroup>,
}

/// Pairs that fold into one reflection, keyed by the primary kind.
const FOLDS: &[(DeclarationKind, DeclarationKind)] = &[
    (DeclarationKind::Class, DeclarationKind::Interface),
    (DeclarationKind::GetAccessor, DeclarationKind::SetAccessor),
    (DeclarationKind::Property, DeclarationKind::PropertySignature),
    (DeclarationKind::Method, DeclarationKind::MethodSignature),
];

pub fn classify_merge(kinds: &BTreeSet<DeclarationKind>) -> MergeDecision {
    let mut remaining = kinds.clone();
    let mut groups = Vec::new();

    while let Some(kind) = remaining.pop_first() {
        let mut group = MergeGroup {
            primary: kind,
            kinds: vec![kind],
        };
        for (primary, folded) in FOLDS {
            if *primary == kind && remaining.remove(folded) {
                group.kinds.push(*folded);
            }
        }
        groups.push(group);
    }

    MergeDecision { groups }
}
