pub mod employee;
pub mod employee_field;
pub mod form_field;
pub mod form_template;
pub mod profile;
pub mod user;
