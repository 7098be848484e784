//! 审计日志的 HTTP 处理器
//! auditoria 只读：没有任何变更端点

use crate::{
    auth::actor::ActorContext,
    error::AppError,
    middleware::AppState,
    models::auditoria::AuditoriaFilters,
    models::operaciones::Operation,
    services::{AuditMode, AuditSpec, MODULO_SEGURIDAD},
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AuditoriaQuery {
    pub accion: Option<String>,
    pub modulo: Option<String>,
    pub tabla: Option<String>,
    pub id_usuario: Option<Uuid>,
    pub desde: Option<DateTime<Utc>>,
    pub hasta: Option<DateTime<Utc>>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// 查询审计日志
pub async fn list_auditoria(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Query(query): Query<AuditoriaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit;
    let offset = query.offset;
    let filters = AuditoriaFilters {
        accion: query.accion,
        modulo: query.modulo,
        tabla: query.tabla,
        id_usuario: query.id_usuario,
        desde: query.desde,
        hasta: query.hasta,
    };

    let audit_service = state.audit_service.clone();

    let (registros, total) = state
        .gateway
        .invoke(
            &actor,
            "auditoria",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "auditoria", mode: AuditMode::BestEffort },
            || async move {
                let registros = audit_service.query_logs(&filters, limit, offset).await?;
                let total = audit_service.count_logs(&filters).await?;
                let detalle = json!({ "consulta": "SELECT * FROM auditoria ORDER BY timestamp DESC" });
                Ok(((registros, total), detalle))
            },
        )
        .await?;

    Ok(Json(json!({
        "auditoria": registros,
        "count": registros.len(),
        "total": total
    })))
}

/// 获取单条审计记录
pub async fn get_auditoria(
    State(state): State<Arc<AppState>>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let audit_service = state.audit_service.clone();

    let registro = state
        .gateway
        .invoke(
            &actor,
            "auditoria",
            Operation::Read,
            AuditSpec { modulo: MODULO_SEGURIDAD, tabla: "auditoria", mode: AuditMode::BestEffort },
            || async move {
                let registro = audit_service.get_log(&id).await?.ok_or(AppError::NotFound)?;
                let detalle = json!({
                    "consulta": "SELECT * FROM auditoria WHERE id = $1",
                    "parametros": [id]
                });
                Ok((registro, detalle))
            },
        )
        .await?;

    Ok(Json(registro))
}
