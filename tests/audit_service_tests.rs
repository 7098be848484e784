//! 审计服务单元测试
//!
//! 这里只测试不依赖数据库的结构性行为；
//! 落盘与查询测试见 repository_tests / gateway_tests

use seguridad_service::models::operaciones::Operation;
use seguridad_service::services::audit_service::AuditAction;

#[test]
fn test_audit_action_strings() {
    assert_eq!(AuditAction::Select.as_str(), "SELECT");
    assert_eq!(AuditAction::Insert.as_str(), "INSERT");
    assert_eq!(AuditAction::Update.as_str(), "UPDATE");
    assert_eq!(AuditAction::Delete.as_str(), "DELETE");
    assert_eq!(AuditAction::Login.as_str(), "LOGIN");
}

#[test]
fn test_audit_action_coverage() {
    // 确保所有动作都有非空、全大写的字符串表示
    let actions = [
        AuditAction::Select,
        AuditAction::Insert,
        AuditAction::Update,
        AuditAction::Delete,
        AuditAction::Login,
    ];

    for action in actions {
        let repr = action.as_str();
        assert!(!repr.is_empty());
        assert_eq!(repr, repr.to_uppercase());
    }
}

#[test]
fn test_operation_to_audit_action_mapping() {
    // 网关从请求操作推导审计动作
    assert_eq!(AuditAction::from(Operation::Create), AuditAction::Insert);
    assert_eq!(AuditAction::from(Operation::Read), AuditAction::Select);
    assert_eq!(AuditAction::from(Operation::Update), AuditAction::Update);
    assert_eq!(AuditAction::from(Operation::Delete), AuditAction::Delete);
}

#[test]
fn test_login_has_no_operation_counterpart() {
    // LOGIN 只由认证服务直接记录，永远不会从 CRUD 操作推导出来
    for op in Operation::ALL {
        assert_ne!(AuditAction::from(op), AuditAction::Login);
    }
}
