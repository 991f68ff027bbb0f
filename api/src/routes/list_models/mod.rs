pub mod list_models_response;
pub mod list_models_route;
