pub mod demo_result;
pub mod health_route;
pub mod list_models;
pub mod repair_advice;
