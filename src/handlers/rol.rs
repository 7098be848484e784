//! 角色管理的 HTTP 处理器

use crate::{
    auth::actor::ActorContext,
    error::AppError,
    middleware::AppState,
    models::operaciones::Operation,
    models::rol::*,
    repository::RolRepository,
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
use validator::Validate;

/// 列出角色
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    let roles = state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "roles", mode: AuditMode::BestEffort },
            || async move {
                let roles = repo.list().await?;
                Ok((roles, json!({ "consulta": "SELECT * FROM roles" })))
            },
        )
        .await?;

    Ok(Json(json!({
        "roles": roles,
        "count": roles.len()
    })))
}

/// 获取角色详情
pub async fn get_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    let rol = state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "roles", mode: AuditMode::BestEffort },
            || async move {
                let rol = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;
                let detalle = json!({
                    "consulta": "SELECT * FROM roles WHERE id_rol = $1",
                    "parametros": [id]
                });
                Ok((rol, detalle))
            },
        )
        .await?;

    Ok(Json(rol))
}

/// 创建角色
pub async fn create_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<CreateRolRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = RolRepository::new(state.db.clone());

    let rol = state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Create,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "roles", mode: AuditMode::Strict },
            || async move {
                let rol = repo.create(&req).await?;
                let detalle = serde_json::to_value(&rol).unwrap_or_else(|_| json!({}));
                Ok((rol, detalle))
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(rol)))
}

/// 更新角色
pub async fn update_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRolRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = RolRepository::new(state.db.clone());

    let rol = state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Update,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "roles", mode: AuditMode::Strict },
            || async move {
                let rol = repo.update(id, &req).await?.ok_or(AppError::NotFound)?;
                let detalle = serde_json::to_value(&rol).unwrap_or_else(|_| json!({}));
                Ok((rol, detalle))
            },
        )
        .await?;

    Ok(Json(rol))
}

/// 删除角色
pub async fn delete_rol(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = RolRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "roles",
            Operation::Delete,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "roles", mode: AuditMode::Strict },
            || async move {
                let eliminado = repo.delete(id).await?.ok_or(AppError::NotFound)?;
                let detalle = serde_json::to_value(&eliminado).unwrap_or_else(|_| json!({}));
                Ok(((), detalle))
            },
        )
        .await?;

    Ok(Json(json!({ "mensaje": "Rol eliminado correctamente" })))
}
