/*
 * Responsibility
 * - crate の公開モジュール (main.rs と tests/ から利用)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod repos;
pub mod services;
pub mod state;
