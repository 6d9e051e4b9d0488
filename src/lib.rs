#![doc = "The `taskpad` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication core (password"]
#![doc = "hashing, token issuance/verification, identity resolution), storage"]
#![doc = "layer, routing configuration, and error handling for the Taskpad API."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the"]
#![doc = "application, and by the integration tests to assemble the same app."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
