//! 用户领域模型（表 usuarios）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户账户
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Usuario {
    pub id_usuario: Uuid,
    /// 登录名，唯一
    pub usuario: String,
    /// Argon2 哈希后的口令
    pub contrasena: String,
    pub nombre_completo: Option<String>,
    /// 激活标志
    pub estado: bool,
    pub creado_en: DateTime<Utc>,
}

/// 创建用户请求
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateUsuarioRequest {
    #[validate(length(min = 1, max = 64))]
    pub usuario: String,
    #[validate(length(min = 1))]
    pub contrasena: String,
    pub nombre_completo: Option<String>,
    /// 缺省创建为激活状态，与原系统的 `estado ?? true` 一致
    pub estado: Option<bool>,
}

/// 更新用户请求
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateUsuarioRequest {
    #[validate(length(min = 1, max = 64))]
    pub usuario: Option<String>,
    pub contrasena: Option<String>,
    pub nombre_completo: Option<String>,
    pub estado: Option<bool>,
}

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub usuario: String,
    pub contrasena: String,
}

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub mensaje: String,
    pub token: String,
    pub expires_in: u64,
    pub usuario: UsuarioResponse,
}

/// 用户响应（不含凭据）
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id_usuario: Uuid,
    pub usuario: String,
    pub nombre_completo: Option<String>,
    pub estado: bool,
    pub creado_en: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id_usuario: u.id_usuario,
            usuario: u.usuario,
            nombre_completo: u.nombre_completo,
            estado: u.estado,
            creado_en: u.creado_en,
        }
    }
}
