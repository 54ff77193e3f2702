use crate::api_error::ApiError;
use crate::user::{UserMessage, UserRepository};
use actix_web::{web, HttpResponse};

async fn save<R: UserRepository>(
    repo: web::Data<R>,
    user: web::Json<UserMessage>,
) -> Result<HttpResponse, ApiError> {
    let mut user = user.into_inner();

    // A body id only selects a record to overwrite; it is never used to insert.
    if let Some(id) = user.id {
        if repo.find_by_id(id)?.is_none() {
            debug!("User {} not found, inserting with a generated id", id);
            user.id = None;
        }
    }

    let user = repo.save(user)?;
    debug!("Saved user {}", user.id);

    Ok(HttpResponse::Ok().json(user))
}

async fn find_all<R: UserRepository>(repo: web::Data<R>) -> Result<HttpResponse, ApiError> {
    let users = repo.find_all()?;

    Ok(HttpResponse::Ok().json(users))
}

async fn find<R: UserRepository>(
    repo: web::Data<R>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = repo
        .find_by_id(id.into_inner())?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(user))
}

async fn update<R: UserRepository>(
    repo: web::Data<R>,
    id: web::Path<i64>,
    user: web::Json<UserMessage>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut user = user.into_inner();

    let user = match repo.find_by_id(id)? {
        Some(existing) => repo.save(existing.overwrite_with(user))?,
        None => {
            debug!("User {} not found, creating it", id);
            user.id = Some(id);
            repo.save(user)?
        }
    };

    Ok(HttpResponse::Ok().json(user))
}

async fn delete<R: UserRepository>(
    repo: web::Data<R>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let user = repo
        .find_by_id(id)?
        .ok_or_else(|| ApiError::not_found(format!("User not found{}", id)))?;

    repo.delete(&user)?;
    debug!("Deleted user {}", id);

    Ok(HttpResponse::Ok().finish())
}

/// `/user/save` and `/user/all` go first so `/user/{id}` never sees them.
pub fn init_routes<R: UserRepository>(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/save", web::post().to(save::<R>));
    cfg.route("/user/all", web::get().to(find_all::<R>));
    cfg.service(
        web::resource("/user/{id}")
            .route(web::get().to(find::<R>))
            .route(web::put().to(update::<R>))
            .route(web::delete().to(delete::<R>)),
    );
}
