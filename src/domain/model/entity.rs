//! Model entity and share descriptor types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::validation::{validate_model_id, validate_share_id, ModelValidationError};

/// Model identifier - letters, digits, hyphens and underscores, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Create a new ModelId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ModelValidationError> {
        let id = id.into();
        validate_model_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random ModelId
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModelId {
    type Error = ModelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Share identifier handed out to external viewers. Distinct from the model's own ID.
///
/// Only freshly issued IDs are validated. Stored IDs are read back as opaque strings so
/// an unusual legacy value is a lookup miss rather than an unreadable store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareId(String);

impl ShareId {
    /// Create a new ShareId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ModelValidationError> {
        let id = id.into();
        validate_share_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random ShareId
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diagram kind stored in the `type` field. Unknown tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelKind {
    Conceptual,
    Logical,
    Other(String),
}

impl ModelKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Conceptual => "conceptual",
            Self::Logical => "logical",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ModelKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "conceptual" => Self::Conceptual,
            "logical" => Self::Logical,
            _ => Self::Other(tag),
        }
    }
}

impl From<ModelKind> for String {
    fn from(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Share descriptor embedded in a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOptions {
    /// Share identifier used in public links
    #[serde(rename = "_id")]
    pub id: ShareId,

    /// Only `true` exposes the model
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,

    /// Whether viewers may copy the model into their own workspace
    #[serde(default, deserialize_with = "null_as_false")]
    pub import_allowed: bool,
}

impl ShareOptions {
    /// Create an active share that does not allow importing
    pub fn new(id: ShareId) -> Self {
        Self {
            id,
            active: true,
            import_allowed: false,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_import_allowed(mut self, import_allowed: bool) -> Self {
        self.import_allowed = import_allowed;
        self
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A diagram model owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(rename = "_id")]
    id: ModelId,

    name: String,

    /// Diagram payload, typically `{"nodes": [...], "edges": [...]}`
    model: Value,

    #[serde(rename = "type")]
    kind: ModelKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,

    #[serde(default)]
    share_options: Option<ShareOptions>,

    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl Model {
    /// Create a new unshared Model
    pub fn new(id: ModelId, name: impl Into<String>, kind: ModelKind, content: Value) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            model: content,
            kind,
            owner: None,
            share_options: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_share_options(mut self, share_options: ShareOptions) -> Self {
        self.share_options = Some(share_options);
        self
    }

    // Getters

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Value {
        &self.model
    }

    pub fn kind(&self) -> &ModelKind {
        &self.kind
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn share_options(&self) -> Option<&ShareOptions> {
        self.share_options.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Replace the share descriptor
    pub fn set_share_options(&mut self, share_options: Option<ShareOptions>) {
        self.share_options = share_options;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_id_valid() {
        let id = ModelId::new("model-id").unwrap();
        assert_eq!(id.as_str(), "model-id");
    }

    #[test]
    fn test_model_id_invalid() {
        assert!(ModelId::new("model id!").is_err());
        assert!(ModelId::new("").is_err());
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = ShareId::generate();
        let b = ShareId::generate();
        assert_ne!(a, b);
        assert!(ShareId::new(a.as_str()).is_ok());
        assert!(ModelId::new(ModelId::generate().as_str()).is_ok());
    }

    #[test]
    fn test_model_creation() {
        let model = Model::new(
            ModelId::new("model-id").unwrap(),
            "Test Model",
            ModelKind::Conceptual,
            json!({"nodes": [], "edges": []}),
        )
        .with_owner("user-1");

        assert_eq!(model.id().as_str(), "model-id");
        assert_eq!(model.name(), "Test Model");
        assert_eq!(model.kind(), &ModelKind::Conceptual);
        assert_eq!(model.owner(), Some("user-1"));
        assert!(model.share_options().is_none());
        assert_eq!(model.created_at(), model.updated_at());
    }

    #[test]
    fn test_deserialize_document() {
        let doc = json!({
            "_id": "model-id",
            "name": "Test Model",
            "model": {"nodes": [], "edges": []},
            "type": "conceptual",
            "shareOptions": {"_id": "share-id-1", "active": true, "importAllowed": true}
        });

        let model: Model = serde_json::from_value(doc).unwrap();
        let share = model.share_options().unwrap();

        assert_eq!(share.id.as_str(), "share-id-1");
        assert!(share.active);
        assert!(share.import_allowed);
        assert_eq!(model.content(), &json!({"nodes": [], "edges": []}));
    }

    #[test]
    fn test_deserialize_null_share_options() {
        let doc = json!({
            "_id": "model-id",
            "name": "Test Model",
            "model": {},
            "type": "logical",
            "shareOptions": null
        });

        let model: Model = serde_json::from_value(doc).unwrap();
        assert!(model.share_options().is_none());
        assert_eq!(model.kind(), &ModelKind::Logical);
    }

    #[test]
    fn test_stored_share_id_is_not_revalidated() {
        let share: ShareOptions =
            serde_json::from_value(json!({"_id": "share.id.2", "active": true})).unwrap();
        assert_eq!(share.id.as_str(), "share.id.2");
        assert!(ShareId::new("share.id.2").is_err());
    }

    #[test]
    fn test_unknown_kind_round_trips() {
        let doc = json!({
            "_id": "model-id",
            "name": "Document Store",
            "model": {},
            "type": "nosql"
        });

        let model: Model = serde_json::from_value(doc).unwrap();
        assert_eq!(model.kind(), &ModelKind::Other("nosql".to_string()));
        assert_eq!(model.kind().as_str(), "nosql");

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["type"], "nosql");
    }

    #[test]
    fn test_known_kinds_parse_to_variants() {
        assert_eq!(ModelKind::from("conceptual".to_string()), ModelKind::Conceptual);
        assert_eq!(ModelKind::from("logical".to_string()), ModelKind::Logical);
        assert_eq!(String::from(ModelKind::Logical), "logical");
    }

    #[test]
    fn test_share_flags_default_to_false() {
        let share: ShareOptions =
            serde_json::from_value(json!({"_id": "s1", "importAllowed": null})).unwrap();
        assert!(!share.active);
        assert!(!share.import_allowed);
    }

    #[test]
    fn test_share_flags_reject_non_boolean() {
        let result: Result<ShareOptions, _> =
            serde_json::from_value(json!({"_id": "s1", "active": true, "importAllowed": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_document_field_names() {
        let model = Model::new(
            ModelId::new("m1").unwrap(),
            "Diagram",
            ModelKind::Conceptual,
            json!({"nodes": []}),
        )
        .with_share_options(ShareOptions::new(ShareId::new("s1").unwrap()));

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["_id"], "m1");
        assert_eq!(value["type"], "conceptual");
        assert_eq!(value["shareOptions"]["_id"], "s1");
        assert_eq!(value["shareOptions"]["active"], true);
        assert_eq!(value["shareOptions"]["importAllowed"], false);
        assert!(value.get("owner").is_none());
    }

    #[test]
    fn test_set_share_options_touches_updated_at() {
        let mut model = Model::new(
            ModelId::new("m1").unwrap(),
            "Diagram",
            ModelKind::Conceptual,
            json!({}),
        );
        let before = model.updated_at();

        model.set_share_options(Some(ShareOptions::new(ShareId::generate())));

        assert!(model.share_options().is_some());
        assert!(model.updated_at() >= before);
    }
}
