use uuid::Uuid;

use onboardly::models::{
    CreateFormField, CreateFormTemplate, CreateUser, FieldType, FormField, FormTemplate,
};
use onboardly::repositories::{FormRepository, UserRepository};
use onboardly::services::AuthService;
use onboardly::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub password: String,
    pub username: Option<String>,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);

        self.create_user_with(&email, "TestPassword123!", None).await
    }

    /// Create a test user with a username
    pub async fn create_user_with_username(&self, username: &str) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);

        self.create_user_with(&email, "TestPassword123!", Some(username.to_string()))
            .await
    }

    /// Create a test user with specific credentials
    pub async fn create_user_with(
        &self,
        email: &str,
        password: &str,
        username: Option<String>,
    ) -> TestAuth {
        let input = CreateUser {
            email: email.to_string(),
            username: username.clone(),
            password: password.to_string(),
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let tokens = AuthService::generate_token_pair(&user, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email: email.to_string(),
            password: password.to_string(),
            username,
            token: tokens.access,
        }
    }

    /// Create a template with a text and a date field
    pub async fn create_template(&self, name: &str) -> (FormTemplate, Vec<FormField>) {
        let input = CreateFormTemplate {
            name: name.to_string(),
            description: Some("Factory template".to_string()),
            fields: vec![
                CreateFormField {
                    label: "Full Name".to_string(),
                    field_type: FieldType::Text,
                    required: true,
                    order: 0,
                    options: None,
                },
                CreateFormField {
                    label: "Start Date".to_string(),
                    field_type: FieldType::Date,
                    required: false,
                    order: 1,
                    options: None,
                },
            ],
        };

        FormRepository::create_with_fields(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a template from explicit field definitions
    pub async fn create_template_with_fields(
        &self,
        name: &str,
        fields: Vec<CreateFormField>,
    ) -> (FormTemplate, Vec<FormField>) {
        let input = CreateFormTemplate {
            name: name.to_string(),
            description: None,
            fields,
        };

        FormRepository::create_with_fields(&self.state.db, &input)
            .await
            .unwrap()
    }
}
