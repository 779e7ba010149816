pub mod dashboard_routes;
pub mod machine_routes;
pub mod page_routes;
