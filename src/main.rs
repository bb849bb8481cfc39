use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use onboardly::config::Config;
use onboardly::handlers::{
    ChangePasswordRequest, CreateFormFieldRequest, CreateFormTemplateRequest,
    CreatedFieldResponse, FormFieldResponse, FormTemplateCreatedResponse,
    FormTemplateDetailResponse, FormTemplateSummaryResponse, LoginRequest, LoginResponse,
    LoginUser, MessageResponse, SignupRequest, TokenObtainRequest, TokenPairResponse,
    TokenRefreshRequest, TokenRefreshResponse,
};
use onboardly::models::UserResponse;
use onboardly::state::AppState;
use onboardly::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::obtain_token_pair,
        handlers::auth::refresh_token,
        handlers::profile::get_details,
        handlers::profile::update_details,
        handlers::profile::change_password,
        handlers::form::create_form_template,
        handlers::form::list_form_templates,
        handlers::form::get_form_template,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        LoginResponse,
        LoginUser,
        TokenObtainRequest,
        TokenPairResponse,
        TokenRefreshRequest,
        TokenRefreshResponse,
        MessageResponse,
        UserResponse,
        ChangePasswordRequest,
        CreateFormTemplateRequest,
        CreateFormFieldRequest,
        CreatedFieldResponse,
        FormTemplateCreatedResponse,
        FormFieldResponse,
        FormTemplateDetailResponse,
        FormTemplateSummaryResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Signup, login and profile endpoints"),
        (name = "Tokens", description = "Token pair issuance and refresh"),
        (name = "Form Templates", description = "Dynamic onboarding form builder")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}
