//! Permiso repository (权限数据访问)

use crate::{error::AppError, models::permiso::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PermisoRepository {
    db: PgPool,
}

impl PermisoRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出所有权限
    pub async fn list(&self) -> Result<Vec<Permiso>, AppError> {
        let permisos =
            sqlx::query_as::<_, Permiso>("SELECT * FROM permisos ORDER BY nombre_permiso")
                .fetch_all(&self.db)
                .await?;

        Ok(permisos)
    }

    /// 根据 ID 查找权限
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Permiso>, AppError> {
        let permiso = sqlx::query_as::<_, Permiso>("SELECT * FROM permisos WHERE id_permiso = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(permiso)
    }

    /// 创建权限（operaciones 已由调用方规范化）
    pub async fn create(
        &self,
        req: &CreatePermisoRequest,
        operaciones: &str,
    ) -> Result<Permiso, AppError> {
        let permiso = sqlx::query_as::<_, Permiso>(
            r#"
            INSERT INTO permisos (nombre_permiso, operaciones, url, id_modulo, estado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.nombre_permiso)
        .bind(operaciones)
        .bind(&req.url)
        .bind(req.id_modulo.as_deref().unwrap_or("SEG"))
        .bind(req.estado.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(permiso)
    }

    /// 更新权限
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdatePermisoRequest,
        operaciones: Option<&str>,
    ) -> Result<Option<Permiso>, AppError> {
        let permiso = sqlx::query_as::<_, Permiso>(
            r#"
            UPDATE permisos
            SET
                nombre_permiso = COALESCE($2, nombre_permiso),
                operaciones = COALESCE($3, operaciones),
                url = COALESCE($4, url),
                id_modulo = COALESCE($5, id_modulo),
                estado = COALESCE($6, estado)
            WHERE id_permiso = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.nombre_permiso)
        .bind(operaciones)
        .bind(&req.url)
        .bind(&req.id_modulo)
        .bind(req.estado)
        .fetch_optional(&self.db)
        .await?;

        Ok(permiso)
    }

    /// 删除权限，返回被删行
    pub async fn delete(&self, id: Uuid) -> Result<Option<Permiso>, AppError> {
        let permiso =
            sqlx::query_as::<_, Permiso>("DELETE FROM permisos WHERE id_permiso = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(permiso)
    }

    /// 取用户经由 usuarios_roles → roles_permisos 可达的全部权限
    /// include_inactive 为 false 时过滤未激活的角色与权限
    pub async fn list_for_user(
        &self,
        id_usuario: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<Permiso>, AppError> {
        let permisos = sqlx::query_as::<_, Permiso>(
            r#"
            SELECT p.*
            FROM usuarios_roles ur
            JOIN roles r ON r.id_rol = ur.id_rol
            JOIN roles_permisos rp ON rp.id_rol = ur.id_rol
            JOIN permisos p ON p.id_permiso = rp.id_permiso
            WHERE ur.id_usuario = $1
              AND ($2 OR (r.estado AND p.estado))
            "#,
        )
        .bind(id_usuario)
        .bind(include_inactive)
        .fetch_all(&self.db)
        .await?;

        Ok(permisos)
    }
}
