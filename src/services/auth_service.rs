//! 认证服务：登录
//!
//! 登录本身不经过授权解析器（登录无法要求权限），但成功后必须
//! 记一条 LOGIN 审计，id_usuario 为被认证的用户。

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    error::AppError,
    models::usuario::{LoginRequest, LoginResponse, UsuarioResponse},
    repository::UsuarioRepository,
    services::audit_service::{AuditAction, AuditService},
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// 安全模块的模块标识
pub const MODULO_SEGURIDAD: &str = "seguridad";

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    audit_service: Arc<AuditService>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>, audit_service: Arc<AuditService>) -> Self {
        Self {
            db,
            jwt_service,
            audit_service,
        }
    }

    /// 用户登录
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let usuario_repo = UsuarioRepository::new(self.db.clone());

        // 获取用户；不存在与口令错误对外不可区分
        let usuario = usuario_repo
            .find_by_login(&req.usuario)
            .await?
            .ok_or(AppError::Unauthorized)?;

        // 未激活账户不能登录
        if !usuario.estado {
            tracing::warn!(usuario = %req.usuario, "Login attempt on inactive account");
            return Err(AppError::Unauthorized);
        }

        // 验证口令
        let hasher = PasswordHasher::new();
        hasher.verify(&req.contrasena, &usuario.contrasena)?;

        // 取角色名签入令牌
        let roles = usuario_repo.get_roles(usuario.id_usuario).await?;
        let nombres_roles: Vec<String> = roles.into_iter().map(|r| r.nombre_rol).collect();

        let token = self.jwt_service.generate_access_token(
            &usuario.id_usuario,
            &usuario.usuario,
            nombres_roles,
        )?;

        // LOGIN 审计：严格模式，落盘失败则登录失败。
        // nombre_rol 记 "Sistema"，与原系统一致（登录时尚无请求主体）
        self.audit_service
            .record(
                AuditAction::Login,
                MODULO_SEGURIDAD,
                "usuarios",
                Some(usuario.id_usuario),
                Some(json!({ "usuario": usuario.usuario })),
                crate::auth::actor::ActorContext::SISTEMA,
            )
            .await?;

        tracing::info!(usuario = %usuario.usuario, "Login successful");

        Ok(LoginResponse {
            mensaje: "Login exitoso".to_string(),
            token,
            expires_in: self.jwt_service.access_token_exp_secs(),
            usuario: UsuarioResponse::from(usuario),
        })
    }
}
