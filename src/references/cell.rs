use derive_more::Deref;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::{Case, Postorder, Preorder};
use crate::errors::Result;
use crate::providers::EpiParameters;

/// Strong, shared handle to a case.
///
/// Handles compare by identity, two handles are equal only if they point to
/// the same case.
#[derive(Clone, Deref)]
pub struct CaseRef(Rc<RefCell<Case>>);

impl CaseRef {
    pub fn new_cyclic<F>(data_fn: F) -> Self
    where
        F: FnOnce(&CaseWeak) -> Case,
    {
        Self(Rc::new_cyclic(|weak| {
            RefCell::new(data_fn(&CaseWeak(weak.clone())))
        }))
    }

    #[inline]
    pub fn get_weak(&self) -> CaseWeak {
        CaseWeak(Rc::downgrade(&self.0))
    }

    /// Let this case transmit, see [`Case::transmit`].
    pub fn transmit<P: EpiParameters + ?Sized>(&self, parameters: &mut P) -> Result<usize> {
        self.borrow_mut().transmit(parameters)
    }

    /// Traverse the subtree rooted at this case, parents before children.
    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }

    /// Traverse the subtree rooted at this case, children before parents.
    pub fn postorder(&self) -> Postorder {
        Postorder::new(self.clone())
    }
}

impl PartialEq for CaseRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CaseRef {}

impl fmt::Debug for CaseRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.try_borrow() {
            Ok(case) => f.debug_tuple("CaseRef").field(&*case).finish(),
            Err(_) => f.write_str("CaseRef(<borrowed>)"),
        }
    }
}

/// Weak handle to a case, used for back-references to donors.
#[derive(Clone)]
pub struct CaseWeak(Weak<RefCell<Case>>);

impl CaseWeak {
    #[inline]
    pub fn upgrade(&self) -> Option<CaseRef> {
        self.0.upgrade().map(CaseRef)
    }
}

impl PartialEq for CaseWeak {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl fmt::Debug for CaseWeak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CaseWeak")
    }
}
