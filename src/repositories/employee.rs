use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::employee::{self, Entity as EmployeeEntity};
use crate::entity::employee_field::{self, Entity as EmployeeFieldEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateEmployeeRecord, Employee, EmployeeField};

/// Employee record repository. There is no HTTP surface for these yet;
/// records are written through this module so the template/field
/// references stay consistent.
pub struct EmployeeRepository;

impl EmployeeRepository {
    /// Insert an employee and all submitted answers in one transaction.
    /// Values are stored exactly as received; nothing is coerced against
    /// the declared field type.
    pub async fn create_record(
        db: &DatabaseConnection,
        input: &CreateEmployeeRecord,
    ) -> AppResult<(Employee, Vec<EmployeeField>)> {
        let txn = db.begin().await?;

        let record = employee::ActiveModel {
            id: Set(Uuid::new_v4()),
            form_template_id: Set(input.form_template_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };
        let record = record.insert(&txn).await?;

        let mut answers = Vec::with_capacity(input.answers.len());
        for answer in &input.answers {
            let model = employee_field::ActiveModel {
                id: Set(Uuid::new_v4()),
                employee_id: Set(record.id),
                form_field_id: Set(answer.form_field_id),
                value: Set(answer.value.clone()),
            };
            answers.push(model.insert(&txn).await?.into());
        }

        txn.commit().await?;
        Ok((record.into(), answers))
    }

    /// Fetch a record with its answers
    pub async fn find_with_answers(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> AppResult<(Employee, Vec<EmployeeField>)> {
        let record = EmployeeEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

        let answers = EmployeeFieldEntity::find()
            .filter(employee_field::Column::EmployeeId.eq(id))
            .all(db)
            .await?;

        Ok((record.into(), answers.into_iter().map(Into::into).collect()))
    }
}

// Conversions from SeaORM models to our domain models
impl From<employee::Model> for Employee {
    fn from(m: employee::Model) -> Self {
        Self {
            id: m.id,
            form_template_id: m.form_template_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<employee_field::Model> for EmployeeField {
    fn from(m: employee_field::Model) -> Self {
        Self {
            id: m.id,
            employee_id: m.employee_id,
            form_field_id: m.form_field_id,
            value: m.value,
        }
    }
}
