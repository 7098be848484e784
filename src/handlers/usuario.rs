//! 用户管理的 HTTP 处理器
//! 所有操作经由访问网关：授权 → 业务 → 审计

use crate::{
    auth::actor::ActorContext,
    auth::password::PasswordHasher,
    error::AppError,
    middleware::AppState,
    models::operaciones::Operation,
    models::usuario::*,
    repository::UsuarioRepository,
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

/// 列出用户
pub async fn list_usuarios(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = UsuarioRepository::new(state.db.clone());

    let usuarios = state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "usuarios", mode: AuditMode::BestEffort },
            || async move {
                let usuarios = repo.list().await?;
                Ok((usuarios, json!({ "consulta": "SELECT * FROM usuarios" })))
            },
        )
        .await?;

    let respuestas: Vec<UsuarioResponse> = usuarios.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "usuarios": respuestas,
        "count": respuestas.len()
    })))
}

/// 获取用户详情
pub async fn get_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UsuarioRepository::new(state.db.clone());

    let usuario = state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "usuarios", mode: AuditMode::BestEffort },
            || async move {
                let usuario = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;
                let detalle = json!({
                    "consulta": "SELECT * FROM usuarios WHERE id_usuario = $1",
                    "parametros": [id]
                });
                Ok((usuario, detalle))
            },
        )
        .await?;

    Ok(Json(UsuarioResponse::from(usuario)))
}

/// 创建用户
pub async fn create_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Json(req): Json<CreateUsuarioRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = UsuarioRepository::new(state.db.clone());

    let usuario = state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Create,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "usuarios", mode: AuditMode::Strict },
            || async move {
                let hasher = PasswordHasher::new();
                let contrasena_hash = hasher.hash(&req.contrasena)?;
                let usuario = repo.create(&req, &contrasena_hash).await?;

                // 变更后镜像进审计；凭据哈希不落入 details
                let detalle = serde_json::to_value(UsuarioResponse::from(usuario.clone()))
                    .unwrap_or_else(|_| json!({}));
                Ok((usuario, detalle))
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UsuarioResponse::from(usuario))))
}

/// 更新用户
pub async fn update_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUsuarioRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = UsuarioRepository::new(state.db.clone());

    let usuario = state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Update,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "usuarios", mode: AuditMode::Strict },
            || async move {
                // 提供了新口令则重新哈希，否则保留原值
                let contrasena_hash = match &req.contrasena {
                    Some(contrasena) => Some(PasswordHasher::new().hash(contrasena)?),
                    None => None,
                };

                let usuario = repo
                    .update(id, &req, contrasena_hash.as_deref())
                    .await?
                    .ok_or(AppError::NotFound)?;

                let detalle = serde_json::to_value(UsuarioResponse::from(usuario.clone()))
                    .unwrap_or_else(|_| json!({}));
                Ok((usuario, detalle))
            },
        )
        .await?;

    Ok(Json(UsuarioResponse::from(usuario)))
}

/// 删除用户
pub async fn delete_usuario(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UsuarioRepository::new(state.db.clone());

    state
        .gateway
        .invoke(
            &actor,
            "usuarios",
            Operation::Delete,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "usuarios", mode: AuditMode::Strict },
            || async move {
                let eliminado = repo.delete(id).await?.ok_or(AppError::NotFound)?;
                let detalle = serde_json::to_value(UsuarioResponse::from(eliminado))
                    .unwrap_or_else(|_| json!({}));
                Ok(((), detalle))
            },
        )
        .await?;

    Ok(Json(json!({ "mensaje": "Usuario eliminado correctamente" })))
}
