//! Auditoria repository (审计数据访问)
//!
//! 只追加：除 INSERT 和查询外不提供任何写操作。

use crate::{error::AppError, models::auditoria::*};
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct AuditoriaRepository {
    db: PgPool,
}

/// 待写入的审计条目；timestamp 由 NOW() 在存储层赋值
#[derive(Debug, Clone)]
pub struct NewRegistroAuditoria {
    pub accion: String,
    pub modulo: String,
    pub tabla: String,
    pub id_usuario: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub nombre_rol: String,
}

impl AuditoriaRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 追加一条审计记录
    pub async fn insert(&self, entry: &NewRegistroAuditoria) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO auditoria (accion, modulo, tabla, id_usuario, details, nombre_rol, "timestamp")
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            "#,
        )
        .bind(&entry.accion)
        .bind(&entry.modulo)
        .bind(&entry.tabla)
        .bind(entry.id_usuario)
        .bind(&entry.details)
        .bind(&entry.nombre_rol)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// 根据 ID 查找审计记录
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<RegistroAuditoria>, AppError> {
        let registro =
            sqlx::query_as::<_, RegistroAuditoria>("SELECT * FROM auditoria WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(registro)
    }

    /// 按过滤器查询审计记录，按时间倒序
    pub async fn query(
        &self,
        filters: &AuditoriaFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RegistroAuditoria>, AppError> {
        let mut query = String::from("SELECT * FROM auditoria WHERE 1=1");
        let mut index = 0;

        if filters.accion.is_some() {
            index += 1;
            query.push_str(&format!(" AND accion = ${}", index));
        }
        if filters.modulo.is_some() {
            index += 1;
            query.push_str(&format!(" AND modulo = ${}", index));
        }
        if filters.tabla.is_some() {
            index += 1;
            query.push_str(&format!(" AND tabla = ${}", index));
        }
        if filters.id_usuario.is_some() {
            index += 1;
            query.push_str(&format!(" AND id_usuario = ${}", index));
        }
        if filters.desde.is_some() {
            index += 1;
            query.push_str(&format!(" AND \"timestamp\" >= ${}", index));
        }
        if filters.hasta.is_some() {
            index += 1;
            query.push_str(&format!(" AND \"timestamp\" <= ${}", index));
        }

        query.push_str(&format!(
            " ORDER BY \"timestamp\" DESC LIMIT ${} OFFSET ${}",
            index + 1,
            index + 2
        ));

        let mut query_builder = sqlx::query_as::<_, RegistroAuditoria>(&query);

        if let Some(accion) = &filters.accion {
            query_builder = query_builder.bind(accion);
        }
        if let Some(modulo) = &filters.modulo {
            query_builder = query_builder.bind(modulo);
        }
        if let Some(tabla) = &filters.tabla {
            query_builder = query_builder.bind(tabla);
        }
        if let Some(id_usuario) = filters.id_usuario {
            query_builder = query_builder.bind(id_usuario);
        }
        if let Some(desde) = filters.desde {
            query_builder = query_builder.bind(desde);
        }
        if let Some(hasta) = filters.hasta {
            query_builder = query_builder.bind(hasta);
        }

        let registros = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(registros)
    }

    /// 统计满足过滤器的审计记录数量
    pub async fn count(&self, filters: &AuditoriaFilters) -> Result<i64, AppError> {
        let mut query = String::from("SELECT COUNT(*) FROM auditoria WHERE 1=1");
        let mut index = 0;

        if filters.accion.is_some() {
            index += 1;
            query.push_str(&format!(" AND accion = ${}", index));
        }
        if filters.modulo.is_some() {
            index += 1;
            query.push_str(&format!(" AND modulo = ${}", index));
        }
        if filters.tabla.is_some() {
            index += 1;
            query.push_str(&format!(" AND tabla = ${}", index));
        }
        if filters.id_usuario.is_some() {
            index += 1;
            query.push_str(&format!(" AND id_usuario = ${}", index));
        }
        if filters.desde.is_some() {
            index += 1;
            query.push_str(&format!(" AND \"timestamp\" >= ${}", index));
        }
        if filters.hasta.is_some() {
            index += 1;
            query.push_str(&format!(" AND \"timestamp\" <= ${}", index));
        }

        let mut query_builder = sqlx::query(&query);

        if let Some(accion) = &filters.accion {
            query_builder = query_builder.bind(accion);
        }
        if let Some(modulo) = &filters.modulo {
            query_builder = query_builder.bind(modulo);
        }
        if let Some(tabla) = &filters.tabla {
            query_builder = query_builder.bind(tabla);
        }
        if let Some(id_usuario) = filters.id_usuario {
            query_builder = query_builder.bind(id_usuario);
        }
        if let Some(desde) = filters.desde {
            query_builder = query_builder.bind(desde);
        }
        if let Some(hasta) = filters.hasta {
            query_builder = query_builder.bind(hasta);
        }

        let count: i64 = query_builder.fetch_one(&self.db).await?.get(0);
        Ok(count)
    }
}
