//! HTTP surface of the monitoring service

pub mod rest;

pub use rest::RestApi;
