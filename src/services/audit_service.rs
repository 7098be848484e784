//! 审计日志服务
//!
//! 每个有意义的动作追加一条 auditoria 记录。写入失败必须以
//! `AppError::AuditWrite` 暴露，与业务性失败区分开，由调用方决定
//! 严格还是尽力（见 gateway）。

use crate::{
    error::AppError,
    models::auditoria::*,
    models::operaciones::Operation,
    repository::{AuditoriaRepository, NewRegistroAuditoria},
};
use sqlx::PgPool;
use uuid::Uuid;

/// 审计动作类型（auditoria.accion 的取值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Select,
    Insert,
    Update,
    Delete,
    Login,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Select => "SELECT",
            AuditAction::Insert => "INSERT",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Login => "LOGIN",
        }
    }
}

/// 请求操作到审计动作的映射
impl From<Operation> for AuditAction {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Create => AuditAction::Insert,
            Operation::Read => AuditAction::Select,
            Operation::Update => AuditAction::Update,
            Operation::Delete => AuditAction::Delete,
        }
    }
}

pub struct AuditService {
    db: PgPool,
}

impl AuditService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 追加一条审计记录
    ///
    /// timestamp 由存储层在写入时赋值，保证与服务器时钟一致的单调顺序。
    /// 任何存储失败都映射为 AuditWrite，绝不让审计故障伪装成业务故障。
    pub async fn record(
        &self,
        accion: AuditAction,
        modulo: &str,
        tabla: &str,
        id_usuario: Option<Uuid>,
        details: Option<serde_json::Value>,
        nombre_rol: &str,
    ) -> Result<(), AppError> {
        let entry = NewRegistroAuditoria {
            accion: accion.as_str().to_string(),
            modulo: modulo.to_string(),
            tabla: tabla.to_string(),
            id_usuario,
            details,
            nombre_rol: nombre_rol.to_string(),
        };

        let repo = AuditoriaRepository::new(self.db.clone());
        repo.insert(&entry).await.map_err(|e| {
            tracing::error!(
                accion = accion.as_str(),
                tabla = tabla,
                error = %e,
                "Audit write failed"
            );
            AppError::AuditWrite(e.to_string())
        })
    }

    /// 查询审计日志
    pub async fn query_logs(
        &self,
        filters: &AuditoriaFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RegistroAuditoria>, AppError> {
        let repo = AuditoriaRepository::new(self.db.clone());
        repo.query(filters, limit, offset).await
    }

    /// 统计审计日志数量
    pub async fn count_logs(&self, filters: &AuditoriaFilters) -> Result<i64, AppError> {
        let repo = AuditoriaRepository::new(self.db.clone());
        repo.count(filters).await
    }

    /// 根据 ID 查找审计记录
    pub async fn get_log(&self, id: &Uuid) -> Result<Option<RegistroAuditoria>, AppError> {
        let repo = AuditoriaRepository::new(self.db.clone());
        repo.find_by_id(id).await
    }
}
