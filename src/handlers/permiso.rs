//! 权限管理的 HTTP 处理器
//! operaciones 字段入库前经编解码器规范化

use crate::{
    auth::actor::ActorContext,
    error::AppError,
    middleware::AppState,
    models::operaciones::{Operation, OperationSet},
    models::permiso::*,
    repository::PermisoRepository,
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

/// 列出权限
pub async fn list_permisos(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = PermisoRepository::new(state.db.clone());

    let permisos = state
        .gateway
        .invoke(
            &actor,
            "permisos",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "permisos", mode: AuditMode::BestEffort },
            || async move {
                let permisos = repo.list().await?;
                Ok((permisos, json!({ "consulta": "SELECT * FROM permisos" })))
            },
        )
        .await?;

    Ok(Json(json!({
        "permisos": permisos,
        "count": permisos.len()
    })))
}

/// 获取权限详情
pub async fn get_permiso(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PermisoRepository::new(state.db.clone());

    let permiso = state
        .gateway
        .invoke(
            &actor,
            "permisos",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "permisos", mode: AuditMode::BestEffort },
            || async move {
                let permiso = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;
                let detalle = json!({
                    "consulta": "SELECT * FROM permisos WHERE id_permiso = $1",
                    "parametros": [id]
                });
                Ok((permiso, detalle))
            },
        )
        .await?;

    Ok(Json(permiso))
}

/// 创建权限
pub async fn create_permiso(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<CreatePermisoRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    // 任意历史格式 → 规范编码后入库
    let operaciones = OperationSet::decode(&req.operaciones).encode();
    let repo = PermisoRepository::new(state.db.clone());

    let permiso = state
        .gateway
        .invoke(
            &actor,
            "permisos",
            Operation::Create,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "permisos", mode: AuditMode::Strict },
            || async move {
                let permiso = repo.create(&req, &operaciones).await?;
                let detalle = serde_json::to_value(&permiso).unwrap_or_else(|_| json!({}));
                Ok((permiso, detalle))
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(permiso)))
}

/// 更新权限
pub async fn update_permiso(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePermisoRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let operaciones = req
        .operaciones
        .as_deref()
        .map(|texto| OperationSet::decode(texto).encode());
    let repo = PermisoRepository::new(state.db.clone());

    let permiso = state
        .gateway
        .invoke(
            &actor,
            "permisos",
            Operation::Update,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "permisos", mode: AuditMode::Strict },
            || async move {
                let permiso = repo
                    .update(id, &req, operaciones.as_deref())
                    .await?
                    .ok_or(AppError::NotFound)?;
                let detalle = serde_json::to_value(&permiso).unwrap_or_else(|_| json!({}));
                Ok((permiso, detalle))
            },
        )
        .await?;

    Ok(Json(permiso))
}

/// 删除权限
pub async fn delete_permiso(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PermisoRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "permisos",
            Operation::Delete,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "permisos", mode: AuditMode::Strict },
            || async move {
                let eliminado = repo.delete(id).await?.ok_or(AppError::NotFound)?;
                let detalle = serde_json::to_value(&eliminado).unwrap_or_else(|_| json!({}));
                Ok(((), detalle))
            },
        )
        .await?;

    Ok(Json(json!({ "mensaje": "Permiso eliminado correctamente" })))
}
