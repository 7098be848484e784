//! 操作主体（actor）
//!
//! "Sistema" 伪主体是类型上的变体而不是魔法用户 ID，
//! 避免与真实用户冲突；它不对应 usuarios 表中的任何行。

use crate::error::AppError;
use axum::extract::FromRequestParts;
use uuid::Uuid;

/// 请求的发起方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// 已认证用户
    Authenticated(Uuid),
    /// 服务器自身发起的动作，绕过授权解析
    System,
}

impl Actor {
    /// 审计记录中的 id_usuario：系统动作为 NULL
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::Authenticated(id) => Some(*id),
            Actor::System => None,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Actor::System)
    }
}

/// 认证上下文（由 JWT 中间件附加到请求扩展）
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub actor: Actor,
    pub usuario: String,
    /// 审计记录用的角色名；无角色或系统动作时为 "Sistema"
    pub nombre_rol: String,
}

impl ActorContext {
    pub const SISTEMA: &'static str = "Sistema";

    /// 服务器自身的上下文
    pub fn system() -> Self {
        Self {
            actor: Actor::System,
            usuario: Self::SISTEMA.to_string(),
            nombre_rol: Self::SISTEMA.to_string(),
        }
    }

    pub fn authenticated(id_usuario: Uuid, usuario: &str, roles: &[String]) -> Self {
        Self {
            actor: Actor::Authenticated(id_usuario),
            usuario: usuario.to_string(),
            nombre_rol: roles
                .first()
                .cloned()
                .unwrap_or_else(|| Self::SISTEMA.to_string()),
        }
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 ActorContext
impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActorContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_actor_has_no_user_id() {
        let ctx = ActorContext::system();
        assert!(ctx.actor.is_system());
        assert_eq!(ctx.actor.user_id(), None);
        assert_eq!(ctx.nombre_rol, "Sistema");
    }

    #[test]
    fn test_authenticated_actor_keeps_first_role() {
        let id = Uuid::new_v4();
        let ctx = ActorContext::authenticated(
            id,
            "admin",
            &["SuperAdmin".to_string(), "Auditor".to_string()],
        );
        assert_eq!(ctx.actor.user_id(), Some(id));
        assert_eq!(ctx.nombre_rol, "SuperAdmin");
    }

    #[test]
    fn test_authenticated_actor_without_roles_falls_back_to_sistema() {
        let ctx = ActorContext::authenticated(Uuid::new_v4(), "jdoe", &[]);
        assert_eq!(ctx.nombre_rol, "Sistema");
        assert!(!ctx.actor.is_system());
    }
}
