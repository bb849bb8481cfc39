use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub use crate::entity::form_field::FieldType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub id: Uuid,
    pub form_template_id: Uuid,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub order: i32,
    pub options: Option<serde_json::Value>,
}

/// Template creation input after validation; every field carries a
/// resolved type and a definite order
#[derive(Debug)]
pub struct CreateFormTemplate {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<CreateFormField>,
}

#[derive(Debug)]
pub struct CreateFormField {
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub order: i32,
    pub options: Option<serde_json::Value>,
}

/// List-view shape: field count instead of field details
#[derive(Debug, Serialize)]
pub struct FormTemplateSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub fields_count: u64,
    pub created_at: OffsetDateTime,
}
