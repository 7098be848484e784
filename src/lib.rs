//! 安全模块后端库
//! RBAC 授权与审计引擎：实体存储、权限编解码、授权解析、审计落盘与访问网关

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
