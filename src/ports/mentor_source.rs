//! Catalog ports - where mentor pools and selectable traits come from.

use async_trait::async_trait;

use crate::domain::foundation::TraitId;
use crate::domain::matching::{CatalogError, Mentor, Trait};

/// Port for loading the mentor pool.
///
/// Implementations may be slow (remote aggregation); callers cache the
/// result through `MentorPoolCache`.
#[async_trait]
pub trait MentorSource: Send + Sync {
    /// Loads every available mentor.
    async fn load_mentors(&self) -> Result<Vec<Mentor>, CatalogError>;

    /// Short source name for logs.
    fn name(&self) -> &'static str;
}

/// Port for looking up selectable traits.
pub trait TraitCatalog: Send + Sync {
    /// Every trait, in catalog order.
    fn all(&self) -> &[Trait];

    /// Finds a trait by id.
    fn find(&self, id: &TraitId) -> Option<&Trait>;
}
