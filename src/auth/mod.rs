//! 认证模块
//! 操作主体、JWT 令牌、口令哈希与认证中间件

pub mod actor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use actor::{Actor, ActorContext};
pub use jwt::JwtService;
