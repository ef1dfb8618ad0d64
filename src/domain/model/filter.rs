//! Single-record lookup filters for model repositories

use super::{Model, ModelId};

/// Equality filter selecting at most one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFilter {
    /// Match on the model's own identifier
    Id(ModelId),
    /// Match on the embedded share descriptor's identifier.
    ///
    /// Kept as a raw string: an unknown or malformed share ID is a lookup miss, not an error.
    ShareId(String),
}

impl ModelFilter {
    pub fn id(id: ModelId) -> Self {
        Self::Id(id)
    }

    pub fn share_id(id: impl Into<String>) -> Self {
        Self::ShareId(id.into())
    }

    /// Document field path this filter compares against
    pub fn field(&self) -> &'static str {
        match self {
            Self::Id(_) => "_id",
            Self::ShareId(_) => "shareOptions._id",
        }
    }

    /// Value the field must equal
    pub fn value(&self) -> &str {
        match self {
            Self::Id(id) => id.as_str(),
            Self::ShareId(id) => id,
        }
    }

    /// Whether the given model satisfies this filter
    pub fn matches(&self, model: &Model) -> bool {
        match self {
            Self::Id(id) => model.id() == id,
            Self::ShareId(id) => model
                .share_options()
                .is_some_and(|share| share.id.as_str() == id),
        }
    }
}

impl std::fmt::Display for ModelFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ \"{}\": \"{}\" }}", self.field(), self.value())
    }
}
