//! 数据模型模块
//! 安全模块实体（usuarios/roles/permisos）、关联关系与审计记录

pub mod auditoria;
pub mod operaciones;
pub mod permiso;
pub mod rol;
pub mod usuario;
