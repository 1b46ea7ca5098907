//! GetSubtypeProfileHandler - Query handler for subtype display copy.

use crate::domain::assessment::{AssessmentError, SubtypeProfile, SubtypeSlug};

/// Query for one subtype by slug.
#[derive(Debug, Clone)]
pub struct GetSubtypeProfileQuery {
    pub slug: String,
}

/// Handler for the static subtype catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetSubtypeProfileHandler;

impl GetSubtypeProfileHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        query: GetSubtypeProfileQuery,
    ) -> Result<&'static SubtypeProfile, AssessmentError> {
        query
            .slug
            .parse::<SubtypeSlug>()
            .map(|slug| slug.profile())
            .map_err(|_| AssessmentError::subtype_not_found(query.slug))
    }
}
