use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct CustomerDoc {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

#[derive(utoipa::ToSchema)]
pub struct RegistrationRequestDoc {
    pub name: String,
    pub email: String,
    pub age: i32,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateRequestDoc {
    pub name: String,
    pub email: String,
    pub age: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list,
        crate::routes::customers::get,
        crate::routes::customers::register,
        crate::routes::customers::update,
        crate::routes::customers::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerDoc,
            RegistrationRequestDoc,
            UpdateRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, serving the generated document.
pub fn swagger_router() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
