//! Processes daily subscriber batch files uploaded to s3.
//!
//! Each upload notification runs one pass of the pipeline in [handler]: stage the file,
//! extract today's subscriber ids, send a refresh command per id and move the file
//! under `processed/`.
pub mod config;
pub mod context;
pub mod handler;
pub mod models;
pub mod service;
