//! Usuario repository (用户数据访问)

use crate::{error::AppError, models::rol::Rol, models::usuario::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UsuarioRepository {
    db: PgPool,
}

impl UsuarioRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出所有用户
    pub async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios =
            sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY creado_en DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(usuarios)
    }

    /// 根据登录名查找用户
    pub async fn find_by_login(&self, usuario: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE usuario = $1")
            .bind(usuario)
            .fetch_optional(&self.db)
            .await?;

        Ok(usuario)
    }

    /// 根据 ID 查找用户
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id_usuario = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(usuario)
    }

    /// 创建用户（contrasena 已哈希）
    pub async fn create(
        &self,
        req: &CreateUsuarioRequest,
        contrasena_hash: &str,
    ) -> Result<Usuario, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (usuario, contrasena, nombre_completo, estado)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.usuario)
        .bind(contrasena_hash)
        .bind(&req.nombre_completo)
        .bind(req.estado.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(usuario)
    }

    /// 更新用户（contrasena_hash 为 None 时保留旧口令）
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateUsuarioRequest,
        contrasena_hash: Option<&str>,
    ) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET
                usuario = COALESCE($2, usuario),
                contrasena = COALESCE($3, contrasena),
                nombre_completo = COALESCE($4, nombre_completo),
                estado = COALESCE($5, estado)
            WHERE id_usuario = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.usuario)
        .bind(contrasena_hash)
        .bind(&req.nombre_completo)
        .bind(req.estado)
        .fetch_optional(&self.db)
        .await?;

        Ok(usuario)
    }

    /// 删除用户，返回被删行（变更后镜像进审计）
    pub async fn delete(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "DELETE FROM usuarios WHERE id_usuario = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(usuario)
    }

    /// 获取用户的所有角色
    pub async fn get_roles(&self, id_usuario: Uuid) -> Result<Vec<Rol>, AppError> {
        let roles = sqlx::query_as::<_, Rol>(
            r#"
            SELECT r.*
            FROM usuarios_roles ur
            JOIN roles r ON ur.id_rol = r.id_rol
            WHERE ur.id_usuario = $1
            ORDER BY r.nombre_rol
            "#,
        )
        .bind(id_usuario)
        .fetch_all(&self.db)
        .await?;

        Ok(roles)
    }

    /// 为用户分配角色
    /// 不做 ON CONFLICT 吞并：重复分配必须以 DuplicateKey 暴露
    pub async fn assign_rol(&self, id_usuario: Uuid, id_rol: Uuid) -> Result<(), AppError> {
        sqlx::query("INSERT INTO usuarios_roles (id_usuario, id_rol) VALUES ($1, $2)")
            .bind(id_usuario)
            .bind(id_rol)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// 撤销用户的角色
    pub async fn revoke_rol(&self, id_usuario: Uuid, id_rol: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM usuarios_roles WHERE id_usuario = $1 AND id_rol = $2")
                .bind(id_usuario)
                .bind(id_rol)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
