use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A stored onboarding record, bound to the template it was filled
/// against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub form_template_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeField {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub form_field_id: Uuid,
    pub value: String,
}

/// One submitted answer: the field it answers and the value as text
#[derive(Debug, Deserialize)]
pub struct EmployeeAnswer {
    pub form_field_id: Uuid,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRecord {
    pub form_template_id: Uuid,
    pub answers: Vec<EmployeeAnswer>,
}
