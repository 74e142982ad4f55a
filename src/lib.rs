//! notesd - CRUD HTTP service for notes
//!
//! Layers, bottom-up: `model` and `validation` are pure; `storage` persists
//! notes in SQLite; `service` implements the use cases; `http_server` and
//! `openapi` expose them over HTTP; `cli` and `config` boot the process.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod openapi;
pub mod service;
pub mod storage;
pub mod validation;
