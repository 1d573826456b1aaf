use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::database;
use crate::web::models::{ChatRequest, ChatResponse, Greeting};
use crate::AppState;

pub const ROOT_GREETING: &str = "Hello from FastAPI Backend!";
pub const HELLO_GREETING: &str = "Hello from the backend API!";

// Root health check
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(Greeting {
        message: ROOT_GREETING.to_string(),
    })
}

pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(Greeting {
        message: HELLO_GREETING.to_string(),
    })
}

// Dummy chat endpoint: reflects the message back with a canned tip
pub async fn chat(data: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let req = req.into_inner();
    info!(
        "Chat request: {} chars, {} history entries",
        req.message.chars().count(),
        req.history.as_ref().map_or(0, Vec::len)
    );

    let exchange = data
        .assistant
        .respond(&req.message, req.history.as_deref());

    HttpResponse::Ok().json(ChatResponse {
        reply: exchange.reply,
        messages: exchange.messages,
    })
}

// Backend and optional database diagnostics; always 200
pub async fn test_database(data: web::Data<AppState>) -> impl Responder {
    let report = database::probe(&data.database, (data.env)()).await;
    info!("Diagnostics: database={}", report.database);
    HttpResponse::Ok().json(report)
}
