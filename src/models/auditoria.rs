//! 审计领域模型（表 auditoria，只追加）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 审计记录
///
/// 一经写入不可变：本服务不存在针对该表的 UPDATE/DELETE。
/// `timestamp` 由存储层在写入时用 NOW() 赋值，调用方不提供。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RegistroAuditoria {
    pub id: Uuid,
    /// SELECT / INSERT / UPDATE / DELETE / LOGIN
    pub accion: String,
    pub modulo: String,
    /// 受影响的表/资源名
    pub tabla: String,
    /// 发起操作的用户；系统发起时为 NULL
    pub id_usuario: Option<Uuid>,
    /// 不透明的结构化负载（变更后镜像或查询描述）
    pub details: Option<serde_json::Value>,
    pub nombre_rol: String,
    pub timestamp: DateTime<Utc>,
}

/// 审计查询过滤器
#[derive(Debug, Default, Deserialize)]
pub struct AuditoriaFilters {
    pub accion: Option<String>,
    pub modulo: Option<String>,
    pub tabla: Option<String>,
    pub id_usuario: Option<Uuid>,
    pub desde: Option<DateTime<Utc>>,
    pub hasta: Option<DateTime<Utc>>,
}
