use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub message: String, pub timestamp: String }

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(utoipa::ToSchema)]
pub struct CreateItemInputDoc { pub name: String, pub description: String }

#[derive(utoipa::ToSchema)]
pub struct UpdateItemInputDoc { pub name: Option<String>, pub description: Option<String> }

#[derive(utoipa::ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: String }

#[derive(utoipa::ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::list,
        crate::routes::items::create,
        crate::routes::items::get,
        crate::routes::items::update,
        crate::routes::items::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            CreateItemInputDoc,
            UpdateItemInputDoc,
            ErrorDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;
