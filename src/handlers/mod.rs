pub mod auth;
pub mod common;
pub mod form;
pub mod profile;

pub use auth::{
    login, obtain_token_pair, refresh_token, signup, LoginRequest, LoginResponse, LoginUser,
    SignupRequest, TokenObtainRequest, TokenPairResponse, TokenRefreshRequest,
    TokenRefreshResponse,
};
pub use common::MessageResponse;
pub use form::{
    create_form_template, get_form_template, list_form_templates, CreateFormFieldRequest,
    CreateFormTemplateRequest, CreatedFieldResponse, FormFieldResponse,
    FormTemplateCreatedResponse, FormTemplateDetailResponse, FormTemplateSummaryResponse,
};
pub use profile::{change_password, get_details, update_details, ChangePasswordRequest};
