use actix_web::{post, web, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::chat::model::{ChatAnswer, ChatQuery};
use crate::chat::service::ChatService;
use crate::Error;

pub fn configure(config: &mut web::ServiceConfig, chat: ChatService) {
    config
        .app_data(web::Data::new(chat))
        .service(chat_with_data);
}

#[derive(OpenApi)]
#[openapi(paths(chat_with_data), components(schemas(ChatQuery, ChatAnswer)), tags())]
pub struct ApiDoc;

#[utoipa::path(
    tag = "chat",
    operation_id = "chatWithData",
    request_body = ChatQuery,
    responses(
        (status = 200, description = "The collaborator answered", body = ChatAnswer),
        (status = 400, description = "The query was empty"),
        (status = 500, description = "The collaborator failed or was unreachable"),
    )
)]
#[post("/chat-with-data")]
/// Ask the data a question in natural language
async fn chat_with_data(
    service: web::Data<ChatService>,
    web::Json(ChatQuery { query }): web::Json<ChatQuery>,
) -> Result<impl Responder, Error> {
    let answer = service.ask(&query).await?;
    Ok(HttpResponse::Ok().json(answer))
}
