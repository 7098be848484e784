//! 权限检查服务（授权解析器）
//!
//! 有效权限 = 用户经全部角色可达的权限按资源名取操作集合的并集。
//! 没有对应资源键即拒绝（deny-by-default）。

use crate::{
    error::AppError,
    models::operaciones::{Operation, OperationSet},
    repository::PermisoRepository,
};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

pub struct PermissionService {
    db: PgPool,
    /// 为 true 时未激活角色/权限的授权也计入并集（原系统的字面行为）
    include_inactive: bool,
}

impl PermissionService {
    pub fn new(db: PgPool, include_inactive: bool) -> Self {
        Self {
            db,
            include_inactive,
        }
    }

    /// 计算用户的有效权限：资源名（小写 nombre_permiso）→ 操作集合
    ///
    /// 零角色的用户得到空映射；不存在的用户 ID 同样得到空映射（拒绝），
    /// 存储故障则原样上抛。
    pub async fn effective_permissions(
        &self,
        id_usuario: Uuid,
    ) -> Result<HashMap<String, OperationSet>, AppError> {
        let repo = PermisoRepository::new(self.db.clone());
        let permisos = repo.list_for_user(id_usuario, self.include_inactive).await?;

        let mut map: HashMap<String, OperationSet> = HashMap::new();
        for permiso in permisos {
            let set = permiso.operation_set();
            let entry = map
                .entry(permiso.nombre_permiso.to_lowercase())
                .or_default();
            *entry = entry.union(set);
        }

        Ok(map)
    }

    /// 检查用户对资源是否持有某操作的授权
    pub async fn is_authorized(
        &self,
        id_usuario: Uuid,
        recurso: &str,
        operation: Operation,
    ) -> Result<bool, AppError> {
        let permisos = self.effective_permissions(id_usuario).await?;

        Ok(permisos
            .get(&recurso.to_lowercase())
            .is_some_and(|set| set.contains(operation)))
    }

    /// 检查权限，如果无权限则返回错误
    pub async fn require_permission(
        &self,
        id_usuario: Uuid,
        recurso: &str,
        operation: Operation,
    ) -> Result<(), AppError> {
        let authorized = self.is_authorized(id_usuario, recurso, operation).await?;

        if !authorized {
            tracing::warn!(
                id_usuario = %id_usuario,
                recurso = %recurso,
                operation = ?operation,
                "Permission denied"
            );
            return Err(AppError::PermissionDenied);
        }

        Ok(())
    }
}
