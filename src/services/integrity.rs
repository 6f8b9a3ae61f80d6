//! Referential-integrity guard for deletes
//!
//! A parent with dependents is never deleted: the dependents are handed back
//! so the confirmation page can list them. There is no cascade, and nothing
//! locks the parent between the check and the delete.

/// State of a parent about to be deleted
#[derive(Debug)]
pub enum DeleteCheck<P, D> {
    /// The parent does not exist
    Missing,
    /// The parent exists and nothing references it
    Clear(P),
    /// The parent is still referenced
    Blocked { parent: P, dependents: Vec<D> },
}

impl<P, D> DeleteCheck<P, D> {
    pub fn new(parent: Option<P>, dependents: Vec<D>) -> Self {
        match parent {
            None => DeleteCheck::Missing,
            Some(parent) if dependents.is_empty() => DeleteCheck::Clear(parent),
            Some(parent) => DeleteCheck::Blocked { parent, dependents },
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, DeleteCheck::Blocked { .. })
    }
}

/// What a delete submission did
#[derive(Debug)]
pub enum DeleteOutcome<P, D> {
    Missing,
    Deleted,
    Blocked { parent: P, dependents: Vec<D> },
}
