pub mod core;
pub mod db;
pub mod dms_web_server;
pub mod models;
pub mod routes;
pub mod search;
