//! 仓库层集成测试
//!
//! 需要数据库：设置 TEST_DATABASE_URL 后以 `cargo test -- --ignored` 运行

use seguridad_service::error::AppError;
use seguridad_service::models::rol::{CreateRolRequest, UpdateRolRequest};
use seguridad_service::models::usuario::CreateUsuarioRequest;
use seguridad_service::repository::{RolRepository, UsuarioRepository};

mod common;
use common::*;

fn create_rol_req(nombre: &str) -> CreateRolRequest {
    CreateRolRequest {
        nombre_rol: nombre.to_string(),
        descripcion: None,
        estado: None,
    }
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_usuario_create_and_find() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let repo = UsuarioRepository::new(pool.clone());

    let req = CreateUsuarioRequest {
        usuario: "testuser".to_string(),
        contrasena: "ignored".to_string(),
        nombre_completo: Some("Test User".to_string()),
        estado: None,
    };

    let creado = repo.create(&req, "hash123").await.unwrap();
    assert_eq!(creado.usuario, "testuser");
    assert!(creado.estado);

    let encontrado = repo
        .find_by_login("testuser")
        .await
        .unwrap()
        .expect("user not found");
    assert_eq!(encontrado.id_usuario, creado.id_usuario);
    assert_eq!(encontrado.nombre_completo, Some("Test User".to_string()));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_duplicate_login_name_is_duplicate_key() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let repo = UsuarioRepository::new(pool.clone());

    let req = CreateUsuarioRequest {
        usuario: "repetido".to_string(),
        contrasena: "x".to_string(),
        nombre_completo: None,
        estado: None,
    };

    repo.create(&req, "hash").await.unwrap();
    let err = repo.create(&req, "hash").await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_concurrent_duplicate_role_creation_one_wins() {
    // 约束级唯一性：两个并发创建恰好一个成功、一个 DuplicateKey
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let repo_a = RolRepository::new(pool.clone());
    let repo_b = RolRepository::new(pool.clone());

    let req_a = create_rol_req("Auditor");
    let req_b = create_rol_req("Auditor");

    let (a, b) = tokio::join!(repo_a.create(&req_a), repo_b.create(&req_b));

    let oks = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(oks, 1, "exactly one create must win");

    let err = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_duplicate_association_is_duplicate_key() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let id_usuario = create_test_usuario(&pool, "asociado", "Secreto123").await.unwrap();
    let id_rol = create_test_rol(&pool, "Operador", true).await.unwrap();

    let repo = UsuarioRepository::new(pool.clone());
    repo.assign_rol(id_usuario, id_rol).await.unwrap();

    // 重复授予被复合主键拒绝
    let err = repo.assign_rol(id_usuario, id_rol).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_rol_update_and_delete_return_post_image() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let repo = RolRepository::new(pool.clone());
    let rol = repo.create(&create_rol_req("Temporal")).await.unwrap();

    let actualizado = repo
        .update(
            rol.id_rol,
            &UpdateRolRequest {
                nombre_rol: None,
                descripcion: Some("rol temporal".to_string()),
                estado: Some(false),
            },
        )
        .await
        .unwrap()
        .expect("role disappeared");
    assert_eq!(actualizado.descripcion, Some("rol temporal".to_string()));
    assert!(!actualizado.estado);

    let eliminado = repo.delete(rol.id_rol).await.unwrap().expect("nothing deleted");
    assert_eq!(eliminado.id_rol, rol.id_rol);

    // 再删一次：未命中
    assert!(repo.delete(rol.id_rol).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_deleting_usuario_cascades_associations() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let id_usuario = create_test_usuario(&pool, "efimero", "Secreto123").await.unwrap();
    let id_rol = create_test_rol(&pool, "Fugaz", true).await.unwrap();
    assign_rol_to_usuario(&pool, id_usuario, id_rol).await.unwrap();

    let repo = UsuarioRepository::new(pool.clone());
    repo.delete(id_usuario).await.unwrap().expect("user should exist");

    use sqlx::Row;
    let count: i64 = sqlx::query("SELECT COUNT(*) FROM usuarios_roles WHERE id_usuario = $1")
        .bind(id_usuario)
        .fetch_one(&pool)
        .await
        .unwrap()
        .get(0);
    assert_eq!(count, 0);
}
