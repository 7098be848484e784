//! 关联管理的 HTTP 处理器（usuarios_roles / roles_permisos）
//!
//! 关联变更按其所属资源的 Update 权限把关；读取按 Read。

use crate::{
    auth::actor::ActorContext,
    error::AppError,
    middleware::AppState,
    models::operaciones::Operation,
    models::rol::{AsignarPermisoRequest, RolPermisoRequest, UsuarioRolRequest},
    repository::{RolRepository, UsuarioRepository},
    services::{AuditMode, AuditSpec, MODULO_SEGURIDAD},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

// ==================== usuarios_roles ====================

/// 获取用户的所有角色
pub async fn get_roles_de_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UsuarioRepository::new(state.db.clone());

    let roles = state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Read,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "usuarios_roles",
                mode: AuditMode::BestEffort,
            },
            || async move {
                let roles = repo.get_roles(id).await?;
                let detalle = json!({
                    "consulta": "SELECT r.* FROM usuarios_roles ur JOIN roles r ...",
                    "parametros": [id]
                });
                Ok((roles, detalle))
            },
        )
        .await?;

    Ok(Json(roles))
}

/// 为用户分配角色
pub async fn asignar_rol_a_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<UsuarioRolRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UsuarioRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Update,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "usuarios_roles",
                mode: AuditMode::Strict,
            },
            || async move {
                repo.assign_rol(req.id_usuario, req.id_rol).await?;
                let detalle = json!({ "id_usuario": req.id_usuario, "id_rol": req.id_rol });
                Ok(((), detalle))
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Rol asignado al usuario" })),
    ))
}

/// 撤销用户的角色
pub async fn quitar_rol_de_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<UsuarioRolRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UsuarioRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Update,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "usuarios_roles",
                mode: AuditMode::Strict,
            },
            || async move {
                let removed = repo.revoke_rol(req.id_usuario, req.id_rol).await?;
                if !removed {
                    return Err(AppError::NotFound);
                }
                let detalle = json!({
                    "id_usuario": req.id_usuario,
                    "id_rol": req.id_rol,
                    "eliminado": true
                });
                Ok(((), detalle))
            },
        )
        .await?;

    Ok(Json(json!({ "mensaje": "Rol quitado del usuario" })))
}

// ==================== roles_permisos ====================

/// 获取角色的所有权限
pub async fn get_permisos_de_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    let permisos = state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Read,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "roles_permisos",
                mode: AuditMode::BestEffort,
            },
            || async move {
                let permisos = repo.get_permisos(id).await?;
                let detalle = json!({
                    "consulta": "SELECT p.* FROM roles_permisos rp JOIN permisos p ...",
                    "parametros": [id]
                });
                Ok((permisos, detalle))
            },
        )
        .await?;

    Ok(Json(permisos))
}

/// 为角色分配权限（嵌套路由，角色取自路径）
pub async fn asignar_permiso_a_rol_anidado(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id_rol): Path<Uuid>,
    Json(req): Json<AsignarPermisoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Update,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "roles_permisos",
                mode: AuditMode::Strict,
            },
            || async move {
                repo.assign_permiso(id_rol, req.id_permiso).await?;
                let detalle = json!({ "id_rol": id_rol, "id_permiso": req.id_permiso });
                Ok(((), detalle))
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Permiso asignado al rol" })),
    ))
}

/// 为角色分配权限
pub async fn asignar_permiso_a_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<RolPermisoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Update,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "roles_permisos",
                mode: AuditMode::Strict,
            },
            || async move {
                repo.assign_permiso(req.id_rol, req.id_permiso).await?;
                let detalle = json!({ "id_rol": req.id_rol, "id_permiso": req.id_permiso });
                Ok(((), detalle))
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Permiso asignado al rol" })),
    ))
}

/// 从角色撤销权限
pub async fn quitar_permiso_de_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<RolPermisoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Update,
            AuditSpec {
                modulo: MODULO_SEGURIDAD,
                tabla: "roles_permisos",
                mode: AuditMode::Strict,
            },
            || async move {
                let removed = repo.revoke_permiso(req.id_rol, req.id_permiso).await?;
                if !removed {
                    return Err(AppError::NotFound);
                }
                let detalle = json!({
                    "id_rol": req.id_rol,
                    "id_permiso": req.id_permiso,
                    "eliminado": true
                });
                Ok(((), detalle))
            },
        )
        .await?;

    Ok(Json(json!({ "mensaje": "Permiso quitado del rol" })))
}
