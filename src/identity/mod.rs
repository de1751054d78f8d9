//! Keystone v2 身份客户端
//!
//! 认证握手是一个严格线性的状态机：
//! `Unauthenticated → TokenAcquired → TenantResolved → Scoped`。
//! 每一步都有显式的类型化结果，任何一步的 HTTP 失败都直接上抛，
//! 不做重试，也不允许跳步（已缓存租户的会话除外）。

mod client;
mod types;

pub use client::IdentityClient;

/// 未绑定租户的初始令牌（Unauthenticated → TokenAcquired）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnscopedToken(pub String);

/// 租户 ID（TokenAcquired → TenantResolved）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantId(pub String);

/// 绑定租户的认证上下文（TenantResolved → Scoped）
///
/// `token` 作为 bearer 令牌出现在之后每一次存储请求的
/// `X-Auth-Token` 头中。不跟踪过期时间，过期后需重新发起握手。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub token: String,
    pub storage_url: String,
}
