use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateFormField, CreateFormTemplate, FieldType, FormField, FormTemplate, FormTemplateSummary,
};
use crate::repositories::FormRepository;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFormTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<CreateFormFieldRequest>>,
}

/// Field entry as submitted; the type arrives as free text and is
/// validated against the fixed set before anything is written
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFormFieldRequest {
    pub label: Option<String>,
    pub field_type: Option<String>,
    pub required: Option<bool>,
    pub order: Option<i32>,
    pub options: Option<serde_json::Value>,
}

/// Field shape echoed back on create; options is not included here
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedFieldResponse {
    pub id: Uuid,
    pub label: String,
    #[schema(value_type = String)]
    pub field_type: FieldType,
    pub required: bool,
    pub order: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormTemplateCreatedResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<CreatedFieldResponse>,
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormFieldResponse {
    pub id: Uuid,
    pub label: String,
    #[schema(value_type = String)]
    pub field_type: FieldType,
    pub required: bool,
    pub order: i32,
    pub options: Option<serde_json::Value>,
}

impl From<FormField> for FormFieldResponse {
    fn from(f: FormField) -> Self {
        Self {
            id: f.id,
            label: f.label,
            field_type: f.field_type,
            required: f.required,
            order: f.order,
            options: f.options,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormTemplateDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FormFieldResponse>,
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormTemplateSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub fields_count: u64,
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

impl From<FormTemplateSummary> for FormTemplateSummaryResponse {
    fn from(s: FormTemplateSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            fields_count: s.fields_count,
            created_at: s.created_at,
        }
    }
}

// ============ Handlers ============

/// Create a form template together with its fields
#[utoipa::path(
    post,
    path = "/employee/forms/",
    request_body = CreateFormTemplateRequest,
    responses(
        (status = 201, description = "Template and fields created", body = FormTemplateCreatedResponse),
        (status = 400, description = "Validation error naming the offending field"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Form Templates"
)]
pub async fn create_form_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateFormTemplateRequest>,
) -> AppResult<(StatusCode, Json<FormTemplateCreatedResponse>)> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or("");
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "Form template name is required".to_string(),
        ));
    }

    let fields = payload.fields.unwrap_or_default();
    if fields.is_empty() {
        return Err(AppError::BadRequest(
            "At least one field is required".to_string(),
        ));
    }

    // The whole list is validated before a single row is written, so a
    // bad field cannot leave a partial template behind.
    let mut validated = Vec::with_capacity(fields.len());
    for (idx, field) in fields.into_iter().enumerate() {
        let label = field.label.unwrap_or_default();
        if label.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "Field at index {} is missing a label",
                idx
            )));
        }

        let field_type = field
            .field_type
            .as_deref()
            .and_then(FieldType::parse)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Field '{}' has invalid field type", label))
            })?;

        validated.push(CreateFormField {
            label,
            field_type,
            required: field.required.unwrap_or(false),
            // Position in the submitted list is the default order
            order: field.order.unwrap_or(idx as i32),
            options: field.options,
        });
    }

    let input = CreateFormTemplate {
        name: name.to_string(),
        description: payload.description,
        fields: validated,
    };

    let (template, created_fields) = FormRepository::create_with_fields(&state.db, &input)
        .await
        .map_err(|e| match e {
            // This endpoint has always surfaced the raw failure text
            AppError::Database(detail) => AppError::Internal(detail),
            other => other,
        })?;

    Ok((
        StatusCode::CREATED,
        Json(FormTemplateCreatedResponse {
            id: template.id,
            name: template.name,
            description: template.description,
            fields: created_fields
                .into_iter()
                .map(|f| CreatedFieldResponse {
                    id: f.id,
                    label: f.label,
                    field_type: f.field_type,
                    required: f.required,
                    order: f.order,
                })
                .collect(),
            created_at: template.created_at,
        }),
    ))
}

/// List all form templates, newest first
#[utoipa::path(
    get,
    path = "/employee/forms/",
    responses(
        (status = 200, description = "Template summaries", body = [FormTemplateSummaryResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Form Templates"
)]
pub async fn list_form_templates(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FormTemplateSummaryResponse>>> {
    let summaries = FormRepository::list_summaries(&state.db).await?;

    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// Fetch one form template with its fields ordered by `order`
#[utoipa::path(
    get,
    path = "/employee/forms/{id}/",
    params(
        ("id" = Uuid, Path, description = "Form template ID")
    ),
    responses(
        (status = 200, description = "Template details", body = FormTemplateDetailResponse),
        (status = 404, description = "Form template not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Form Templates"
)]
pub async fn get_form_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FormTemplateDetailResponse>> {
    let (template, fields) = FormRepository::find_with_fields(&state.db, id).await?;

    Ok(Json(detail_response(template, fields)))
}

fn detail_response(template: FormTemplate, fields: Vec<FormField>) -> FormTemplateDetailResponse {
    FormTemplateDetailResponse {
        id: template.id,
        name: template.name,
        description: template.description,
        fields: fields.into_iter().map(Into::into).collect(),
        created_at: template.created_at,
        updated_at: template.updated_at,
    }
}
