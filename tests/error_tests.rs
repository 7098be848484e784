//! 错误处理单元测试
//!
//! 测试错误分类、状态码映射与用户可见消息

use axum::http::StatusCode;
use seguridad_service::error::AppError;

// ==================== 错误状态码测试 ====================

#[test]
fn test_error_status_codes() {
    assert_eq!(
        AppError::Validation("campo requerido".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::DuplicateKey("usuarios_usuario_key".to_string()).status_code(),
        StatusCode::CONFLICT
    );
    assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::PermissionDenied.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        AppError::AuditWrite("disk full".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Internal("oops".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_database_error_status_code() {
    let db_error = sqlx::Error::RowNotFound;
    let app_error = AppError::Database(db_error);
    assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== 错误分类测试 ====================

#[test]
fn test_generic_storage_failure_is_not_duplicate_key() {
    let app_error: AppError = sqlx::Error::PoolTimedOut.into();
    assert!(matches!(app_error, AppError::Database(_)));
}

#[test]
fn test_audit_write_failure_is_distinct_from_storage_failure() {
    // 审计失败必须能与一般存储失败区分：
    // 业务副作用已发生，调用方要据此决定如何上报
    let audit = AppError::AuditWrite("insert failed".to_string());
    let storage: AppError = sqlx::Error::PoolTimedOut.into();

    assert!(matches!(audit, AppError::AuditWrite(_)));
    assert!(!matches!(storage, AppError::AuditWrite(_)));
}

// ==================== 用户消息测试 ====================

#[test]
fn test_user_messages_no_sensitive_info() {
    // 数据库错误不应该暴露技术细节
    let db_error = AppError::Database(sqlx::Error::RowNotFound);
    let message = db_error.user_message();
    assert_eq!(message, "Database error occurred");
    assert!(!message.to_lowercase().contains("sqlx"));
    assert!(!message.to_lowercase().contains("row"));
}

#[test]
fn test_user_messages_for_client_errors() {
    assert_eq!(AppError::Unauthorized.user_message(), "Authentication failed");
    assert_eq!(AppError::PermissionDenied.user_message(), "Access denied");
    assert_eq!(AppError::NotFound.user_message(), "Resource not found");
    assert_eq!(
        AppError::Validation("nombre requerido".to_string()).user_message(),
        "nombre requerido"
    );
    assert!(AppError::DuplicateKey("roles_nombre_rol_key".to_string())
        .user_message()
        .contains("Already exists"));
}

#[test]
fn test_audit_write_message_reports_partial_failure() {
    let message = AppError::AuditWrite("io".to_string()).user_message();
    assert!(message.contains("completed"));
    assert!(message.contains("audit"));
}
