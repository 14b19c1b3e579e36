//! Depth-first traversals over a transmission tree.
//!
//! Both traversals keep an explicit stack of case handles, so a traversal can
//! be started again at any time and deep trees do not exhaust the call stack.
//! Children are visited in the order they were attached.

use crate::references::CaseRef;

/// Visits a case before any of its descendants.
pub struct Preorder {
    stack: Vec<CaseRef>,
}

impl Preorder {
    pub(crate) fn new(root: CaseRef) -> Self {
        Self { stack: vec![root] }
    }
}

impl Iterator for Preorder {
    type Item = CaseRef;

    fn next(&mut self) -> Option<Self::Item> {
        let case = self.stack.pop()?;
        self.stack
            .extend(case.borrow().get_children().iter().rev().cloned());
        Some(case)
    }
}

/// Visits all descendants of a case before the case itself.
pub struct Postorder {
    // the flag marks cases whose children are already on the stack
    stack: Vec<(CaseRef, bool)>,
}

impl Postorder {
    pub(crate) fn new(root: CaseRef) -> Self {
        Self {
            stack: vec![(root, false)],
        }
    }
}

impl Iterator for Postorder {
    type Item = CaseRef;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((case, expanded)) = self.stack.pop() {
            if expanded {
                return Some(case);
            }
            self.stack.push((case.clone(), true));
            self.stack.extend(
                case.borrow()
                    .get_children()
                    .iter()
                    .rev()
                    .map(|child| (child.clone(), false)),
            );
        }
        None
    }
}
