//! 角色领域模型（表 roles 及关联表）

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 角色名只允许字母和空格，在 HTTP 边界校验，核心不重复校验
static NOMBRE_ROL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÑáéíóúñ ]+$").expect("invalid role name regex"));

/// 角色
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rol {
    pub id_rol: Uuid,
    /// 名称，唯一
    pub nombre_rol: String,
    pub descripcion: Option<String>,
    /// 激活标志
    pub estado: bool,
}

/// 用户-角色关联（唯一对）
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UsuarioRol {
    pub id_usuario: Uuid,
    pub id_rol: Uuid,
    pub asignado_en: DateTime<Utc>,
}

/// 角色-权限关联（唯一对）
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RolPermiso {
    pub id_rol: Uuid,
    pub id_permiso: Uuid,
}

/// 创建角色请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRolRequest {
    #[validate(
        length(min = 1, max = 64),
        regex(path = *NOMBRE_ROL_RE, message = "el nombre solo admite letras y espacios")
    )]
    pub nombre_rol: String,
    pub descripcion: Option<String>,
    pub estado: Option<bool>,
}

/// 更新角色请求
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRolRequest {
    #[validate(
        length(min = 1, max = 64),
        regex(path = *NOMBRE_ROL_RE, message = "el nombre solo admite letras y espacios")
    )]
    pub nombre_rol: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<bool>,
}

/// 关联请求：为用户分配/撤销角色
#[derive(Debug, Deserialize)]
pub struct UsuarioRolRequest {
    pub id_usuario: Uuid,
    pub id_rol: Uuid,
}

/// 关联请求：为角色分配/撤销权限
#[derive(Debug, Deserialize)]
pub struct RolPermisoRequest {
    pub id_rol: Uuid,
    pub id_permiso: Uuid,
}

/// 嵌套路由 POST /roles/{id}/permisos 的请求体（角色取自路径）
#[derive(Debug, Deserialize)]
pub struct AsignarPermisoRequest {
    pub id_permiso: Uuid,
}
