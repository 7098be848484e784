//! 权限领域模型（表 permisos）

use crate::models::operaciones::OperationSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 权限
///
/// `nombre_permiso` 同时充当授权解析时的资源名；`operaciones` 保存
/// 编解码器的文本编码，读取方通过 [`Permiso::operation_set`] 取得规范集合。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Permiso {
    pub id_permiso: Uuid,
    /// 名称，唯一，兼作资源名
    pub nombre_permiso: String,
    /// 授予的操作集合的文本编码
    pub operaciones: String,
    /// 目标 URL / 资源路径
    pub url: Option<String>,
    /// 所属模块（外部分组实体，仅保留标识）
    pub id_modulo: String,
    /// 激活标志
    pub estado: bool,
}

impl Permiso {
    /// 解码持久化文本，得到规范操作集合
    pub fn operation_set(&self) -> OperationSet {
        OperationSet::decode(&self.operaciones)
    }
}

/// 创建权限请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePermisoRequest {
    #[validate(length(min = 1, max = 64))]
    pub nombre_permiso: String,
    /// 任意历史格式均可，入库前规范化
    #[serde(default)]
    pub operaciones: String,
    pub url: Option<String>,
    pub id_modulo: Option<String>,
    pub estado: Option<bool>,
}

/// 更新权限请求
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePermisoRequest {
    #[validate(length(min = 1, max = 64))]
    pub nombre_permiso: Option<String>,
    pub operaciones: Option<String>,
    pub url: Option<String>,
    pub id_modulo: Option<String>,
    pub estado: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::operaciones::Operation;

    #[test]
    fn test_operation_set_from_legacy_encoding() {
        let permiso = Permiso {
            id_permiso: Uuid::new_v4(),
            nombre_permiso: "usuarios".to_string(),
            operaciones: r#"["C","R"]"#.to_string(),
            url: Some("/usuarios".to_string()),
            id_modulo: "SEG".to_string(),
            estado: true,
        };

        let set = permiso.operation_set();
        assert!(set.contains(Operation::Create));
        assert!(set.contains(Operation::Read));
        assert!(!set.contains(Operation::Delete));
    }
}
