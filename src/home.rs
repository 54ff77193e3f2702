use actix_web::{web, HttpResponse, Responder};

const INDEX_HTML: &str = include_str!("../static/index.html");

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
