pub mod repair_advice_route;
