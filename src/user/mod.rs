mod model;
mod repository;
mod routes;

pub use model::*;
pub use repository::*;
pub use routes::init_routes;
