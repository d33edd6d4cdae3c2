pub mod backend;
pub mod http_client;

pub use backend::{AuthResponse, PlannerApi};
pub use http_client::HttpApi;
