pub mod cors;
pub mod request_id;

pub use cors::allow_any_origin_middleware;
pub use request_id::request_id_middleware;
