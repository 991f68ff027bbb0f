pub mod demo_result_query;
pub mod demo_result_route;
