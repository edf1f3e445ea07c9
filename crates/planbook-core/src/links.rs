//! Link registry
//!
//! Navigation anchors are allocated before the page they point at exists and
//! bound once that page is created. This lets an index page carry icons for
//! content pages emitted later in the same pass.

use std::fmt;

use crate::error::LinkError;

/// Opaque handle to a page destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(u32);

impl LinkId {
    /// Raw index, stable for the lifetime of the registry
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates links and records the page each one is bound to
#[derive(Debug, Clone, Default)]
pub struct LinkRegistry {
    targets: Vec<Option<u32>>,
}

impl LinkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, unbound link
    pub fn allocate(&mut self) -> LinkId {
        let id = LinkId(self.targets.len() as u32);
        self.targets.push(None);
        id
    }

    /// Bind a link to its destination page. Each link is bound exactly once.
    pub fn bind(&mut self, link: LinkId, page: u32) -> Result<(), LinkError> {
        let slot = self
            .targets
            .get_mut(link.0 as usize)
            .ok_or(LinkError::UnknownLink { link })?;
        match *slot {
            Some(existing) => Err(LinkError::AlreadyBound {
                link,
                existing,
                page,
            }),
            None => {
                *slot = Some(page);
                Ok(())
            }
        }
    }

    /// Page number a bound link points at
    pub fn resolve(&self, link: LinkId) -> Result<u32, LinkError> {
        match self.targets.get(link.0 as usize) {
            Some(Some(page)) => Ok(*page),
            Some(None) => Err(LinkError::Unbound { link }),
            None => Err(LinkError::UnknownLink { link }),
        }
    }

    /// Whether the link has been bound
    pub fn is_bound(&self, link: LinkId) -> bool {
        matches!(self.targets.get(link.0 as usize), Some(Some(_)))
    }

    /// Links allocated but never bound
    pub fn unbound(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, target)| target.is_none())
            .map(|(i, _)| LinkId(i as u32))
    }

    /// Number of allocated links
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if no link was allocated
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
