pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod params;
pub mod routes;

#[cfg(test)]
mod handlers_test;
