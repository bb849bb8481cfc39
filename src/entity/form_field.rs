use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed set of input types a form field can declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "number")]
    Number,
    #[sea_orm(string_value = "date")]
    Date,
    #[sea_orm(string_value = "password")]
    Password,
    #[sea_orm(string_value = "email")]
    Email,
}

impl FieldType {
    /// Parse a request-supplied type name; `None` for anything outside the set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "password" => Some(Self::Password),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub form_template_id: Uuid,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub order: i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub options: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_template::Entity",
        from = "Column::FormTemplateId",
        to = "super::form_template::Column::Id"
    )]
    FormTemplate,
    #[sea_orm(has_many = "super::employee_field::Entity")]
    EmployeeFields,
}

impl Related<super::form_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormTemplate.def()
    }
}

impl Related<super::employee_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeFields.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
