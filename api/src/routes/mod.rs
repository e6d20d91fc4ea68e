pub mod query;
pub mod root_route;
