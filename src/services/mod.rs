//! 业务服务层

pub mod audit_service;
pub mod auth_service;
pub mod gateway;
pub mod permission_service;

pub use audit_service::{AuditAction, AuditService};
pub use auth_service::{AuthService, MODULO_SEGURIDAD};
pub use gateway::{AccessGateway, AuditMode, AuditSpec};
pub use permission_service::PermissionService;
