use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::form_field::{self, Entity as FormFieldEntity};
use crate::entity::form_template::{self, Entity as FormTemplateEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateFormTemplate, FormField, FormTemplate, FormTemplateSummary};

/// Form template repository for database operations
pub struct FormRepository;

impl FormRepository {
    /// Insert a template and all of its fields in one transaction.
    /// Either every row lands or none does.
    pub async fn create_with_fields(
        db: &DatabaseConnection,
        input: &CreateFormTemplate,
    ) -> AppResult<(FormTemplate, Vec<FormField>)> {
        let txn = db.begin().await?;

        let template = form_template::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };
        let template = template.insert(&txn).await?;

        let mut created_fields = Vec::with_capacity(input.fields.len());
        for field in &input.fields {
            let model = form_field::ActiveModel {
                id: Set(Uuid::new_v4()),
                form_template_id: Set(template.id),
                label: Set(field.label.clone()),
                field_type: Set(field.field_type),
                required: Set(field.required),
                order: Set(field.order),
                options: Set(field.options.clone()),
            };
            created_fields.push(model.insert(&txn).await?.into());
        }

        txn.commit().await?;
        Ok((template.into(), created_fields))
    }

    /// Fetch one template with its fields ordered ascending by `order`
    pub async fn find_with_fields(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> AppResult<(FormTemplate, Vec<FormField>)> {
        let template = FormTemplateEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Form template".to_string()))?;

        let fields = FormFieldEntity::find()
            .filter(form_field::Column::FormTemplateId.eq(id))
            .order_by_asc(form_field::Column::Order)
            .all(db)
            .await?;

        Ok((
            template.into(),
            fields.into_iter().map(Into::into).collect(),
        ))
    }

    /// All templates, newest first, with a field count instead of the
    /// field rows themselves
    pub async fn list_summaries(db: &DatabaseConnection) -> AppResult<Vec<FormTemplateSummary>> {
        let templates = FormTemplateEntity::find()
            .order_by_desc(form_template::Column::CreatedAt)
            .all(db)
            .await?;

        let mut summaries = Vec::with_capacity(templates.len());
        for template in templates {
            let fields_count = FormFieldEntity::find()
                .filter(form_field::Column::FormTemplateId.eq(template.id))
                .count(db)
                .await?;

            summaries.push(FormTemplateSummary {
                id: template.id,
                name: template.name,
                description: template.description,
                fields_count,
                created_at: template.created_at,
            });
        }

        Ok(summaries)
    }
}

// Conversions from SeaORM models to our domain models
impl From<form_template::Model> for FormTemplate {
    fn from(m: form_template::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<form_field::Model> for FormField {
    fn from(m: form_field::Model) -> Self {
        Self {
            id: m.id,
            form_template_id: m.form_template_id,
            label: m.label,
            field_type: m.field_type,
            required: m.required,
            order: m.order,
            options: m.options,
        }
    }
}
