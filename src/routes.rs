//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/api/salud", get(handlers::health::health_check))
        .route("/api/listo", get(handlers::health::readiness_check));

    // 认证路由（无需令牌）
    let auth_routes = Router::new().route("/api/usuarios/login", post(handlers::auth::login));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        // 用户管理
        .route(
            "/api/usuarios",
            get(handlers::usuario::list_usuarios).post(handlers::usuario::create_usuario),
        )
        .route(
            "/api/usuarios/{id}",
            get(handlers::usuario::get_usuario)
                .put(handlers::usuario::update_usuario)
                .delete(handlers::usuario::delete_usuario),
        )
        // 角色管理
        .route(
            "/api/roles",
            get(handlers::rol::list_roles).post(handlers::rol::create_rol),
        )
        .route(
            "/api/roles/{id}",
            get(handlers::rol::get_rol)
                .put(handlers::rol::update_rol)
                .delete(handlers::rol::delete_rol),
        )
        // 权限管理
        .route(
            "/api/permisos",
            get(handlers::permiso::list_permisos).post(handlers::permiso::create_permiso),
        )
        .route(
            "/api/permisos/{id}",
            get(handlers::permiso::get_permiso)
                .put(handlers::permiso::update_permiso)
                .delete(handlers::permiso::delete_permiso),
        )
        // 关联管理
        .route(
            "/api/usuarios/{id}/roles",
            get(handlers::asociaciones::get_roles_de_usuario),
        )
        .route(
            "/api/usuarios_roles",
            post(handlers::asociaciones::asignar_rol_a_usuario)
                .delete(handlers::asociaciones::quitar_rol_de_usuario),
        )
        .route(
            "/api/roles/{id}/permisos",
            get(handlers::asociaciones::get_permisos_de_rol)
                .post(handlers::asociaciones::asignar_permiso_a_rol_anidado),
        )
        .route(
            "/api/roles_permisos",
            post(handlers::asociaciones::asignar_permiso_a_rol)
                .delete(handlers::asociaciones::quitar_permiso_de_rol),
        )
        // 审计日志（只读）
        .route("/api/auditoria", get(handlers::auditoria::list_auditoria))
        .route("/api/auditoria/{id}", get(handlers::auditoria::get_auditoria))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
