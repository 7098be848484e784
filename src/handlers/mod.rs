//! HTTP 处理器模块

pub mod asociaciones;
pub mod auditoria;
pub mod auth;
pub mod health;
pub mod permiso;
pub mod rol;
pub mod usuario;
