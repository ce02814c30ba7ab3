use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};

pub struct Api;

#[derive(Object)]
pub struct Message {
    message: String,
}

#[derive(ApiResponse)]
enum MessageResponse {
    #[oai(status = 200)]
    Ok(Json<Message>),
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self::Ok(Json(Message {
            message: message.to_owned(),
        }))
    }
}

#[OpenApi]
impl Api {
    #[oai(path = "/", method = "get", operation_id = "get_root")]
    async fn api_root(&self) -> MessageResponse {
        MessageResponse::new("Hello from the IDS dashboard backend!")
    }

    #[oai(path = "/api/hello", method = "get", operation_id = "hello")]
    async fn api_hello(&self) -> MessageResponse {
        MessageResponse::new("Hello from the backend API!")
    }
}
