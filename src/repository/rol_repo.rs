//! Rol repository (角色数据访问)

use crate::{error::AppError, models::permiso::Permiso, models::rol::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct RolRepository {
    db: PgPool,
}

impl RolRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出所有角色
    pub async fn list(&self) -> Result<Vec<Rol>, AppError> {
        let roles = sqlx::query_as::<_, Rol>("SELECT * FROM roles ORDER BY nombre_rol")
            .fetch_all(&self.db)
            .await?;

        Ok(roles)
    }

    /// 根据名称查找角色
    pub async fn find_by_name(&self, nombre_rol: &str) -> Result<Option<Rol>, AppError> {
        let rol = sqlx::query_as::<_, Rol>("SELECT * FROM roles WHERE nombre_rol = $1")
            .bind(nombre_rol)
            .fetch_optional(&self.db)
            .await?;

        Ok(rol)
    }

    /// 根据 ID 查找角色
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Rol>, AppError> {
        let rol = sqlx::query_as::<_, Rol>("SELECT * FROM roles WHERE id_rol = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(rol)
    }

    /// 创建角色
    pub async fn create(&self, req: &CreateRolRequest) -> Result<Rol, AppError> {
        let rol = sqlx::query_as::<_, Rol>(
            r#"
            INSERT INTO roles (nombre_rol, descripcion, estado)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&req.nombre_rol)
        .bind(&req.descripcion)
        .bind(req.estado.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(rol)
    }

    /// 更新角色
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateRolRequest,
    ) -> Result<Option<Rol>, AppError> {
        let rol = sqlx::query_as::<_, Rol>(
            r#"
            UPDATE roles
            SET
                nombre_rol = COALESCE($2, nombre_rol),
                descripcion = COALESCE($3, descripcion),
                estado = COALESCE($4, estado)
            WHERE id_rol = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.nombre_rol)
        .bind(&req.descripcion)
        .bind(req.estado)
        .fetch_optional(&self.db)
        .await?;

        Ok(rol)
    }

    /// 删除角色，返回被删行
    pub async fn delete(&self, id: Uuid) -> Result<Option<Rol>, AppError> {
        let rol = sqlx::query_as::<_, Rol>("DELETE FROM roles WHERE id_rol = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(rol)
    }

    /// 获取角色的所有权限
    pub async fn get_permisos(&self, id_rol: Uuid) -> Result<Vec<Permiso>, AppError> {
        let permisos = sqlx::query_as::<_, Permiso>(
            r#"
            SELECT p.*
            FROM roles_permisos rp
            JOIN permisos p ON rp.id_permiso = p.id_permiso
            WHERE rp.id_rol = $1
            ORDER BY p.nombre_permiso
            "#,
        )
        .bind(id_rol)
        .fetch_all(&self.db)
        .await?;

        Ok(permisos)
    }

    /// 为角色分配权限
    /// 重复分配交给复合主键拒绝，以 DuplicateKey 暴露
    pub async fn assign_permiso(&self, id_rol: Uuid, id_permiso: Uuid) -> Result<(), AppError> {
        sqlx::query("INSERT INTO roles_permisos (id_rol, id_permiso) VALUES ($1, $2)")
            .bind(id_rol)
            .bind(id_permiso)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// 从角色撤销权限
    pub async fn revoke_permiso(&self, id_rol: Uuid, id_permiso: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM roles_permisos WHERE id_rol = $1 AND id_permiso = $2")
                .bind(id_rol)
                .bind(id_permiso)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
