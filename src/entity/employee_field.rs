use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A submitted answer. Values are stored as raw text whatever the
/// referenced field's declared type; consumers convert on read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub form_field_id: Uuid,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::form_field::Entity",
        from = "Column::FormFieldId",
        to = "super::form_field::Column::Id"
    )]
    FormField,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::form_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormField.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
