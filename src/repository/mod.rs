//! 数据访问层
//! 每张表一个仓库，统一经由 PgPool 访问

pub mod auditoria_repo;
pub mod permiso_repo;
pub mod rol_repo;
pub mod usuario_repo;

pub use auditoria_repo::{AuditoriaRepository, NewRegistroAuditoria};
pub use permiso_repo::PermisoRepository;
pub use rol_repo::RolRepository;
pub use usuario_repo::UsuarioRepository;
