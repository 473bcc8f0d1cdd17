pub mod question;

use serde_json::{json, Value};

use crate::actix_web::web::{self, delete, get, patch, post, put, scope, Json, ServiceConfig};
use crate::core::ports::repository::Manager;
use crate::error::Error;

pub async fn hello() -> Json<Value> {
    Json(json!({
        "message": "Hello from quizbank!",
        "status": "success",
    }))
}

pub async fn echo_prompt() -> Json<Value> {
    Json(json!({ "message": "Send me some data via POST" }))
}

pub async fn echo(body: Option<Json<Value>>) -> Json<Value> {
    let data = body.map(Json::into_inner).unwrap_or_else(|| json!({}));
    Json(json!({
        "echo": data,
        "message": "You sent this data to quizbank",
    }))
}

/// Registers every route under `prefix` (empty or e.g. `/api`).
pub fn routes<M>(cfg: &mut ServiceConfig, prefix: &str)
where
    M: Manager + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| Error::InvalidBody(err.to_string()).into()))
        .app_data(web::QueryConfig::default().error_handler(|err, _| Error::InvalidPagination(err.to_string()).into()))
        // ids are integers; anything else names no question
        .app_data(web::PathConfig::default().error_handler(|_, _| Error::NotFound.into()))
        .service(
            scope(prefix)
                .route("/hello/", get().to(hello))
                .route("/echo/", get().to(echo_prompt))
                .route("/echo/", post().to(echo))
                .service(
                    scope("/questions")
                        .route("/", get().to(question::list::<M>))
                        .route("/", post().to(question::create::<M>))
                        .route("/quiz-set/{seed}/", get().to(question::quiz_set::<M>))
                        .route("/{id}/", get().to(question::detail::<M>))
                        .route("/{id}/update/", put().to(question::update::<M>))
                        .route("/{id}/update/", patch().to(question::patch::<M>))
                        .route("/{id}/delete/", delete().to(question::delete::<M>)),
                ),
        );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::actix_web::{http::StatusCode, test, web::Data, App};
    use crate::database::memory::Memory;

    #[actix_web::test]
    async fn test_hello() {
        let app = test::init_service(App::new().app_data(Data::new(Memory::default())).configure(|cfg| routes::<Memory>(cfg, ""))).await;
        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/hello/").to_request()).await;
        assert_eq!(body["status"], "success");
    }

    #[actix_web::test]
    async fn test_echo() {
        let app = test::init_service(App::new().app_data(Data::new(Memory::default())).configure(|cfg| routes::<Memory>(cfg, ""))).await;
        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/echo/").to_request()).await;
        assert_eq!(body["message"], "Send me some data via POST");

        let req = test::TestRequest::post().uri("/echo/").set_json(json!({"ping": [1, 2]})).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["echo"], json!({"ping": [1, 2]}));

        let resp = test::call_service(&app, test::TestRequest::post().uri("/echo/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["echo"], json!({}));
    }

    #[actix_web::test]
    async fn test_prefix() {
        let app = test::init_service(App::new().app_data(Data::new(Memory::default())).configure(|cfg| routes::<Memory>(cfg, "/api"))).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/hello/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/hello/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
