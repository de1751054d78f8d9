//! Keystone v2 接口的请求与响应结构

use serde::{Deserialize, Serialize};

/// POST /v2.0/tokens 请求体
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest {
    pub auth: AuthPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthPayload {
    /// 携带 tenantId 时请求绑定租户的令牌
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(rename = "passwordCredentials")]
    pub password_credentials: PasswordCredentials,
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

/// POST /v2.0/tokens 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access: Access,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Access {
    pub token: Token,
    /// 仅绑定租户的令牌响应携带服务目录
    #[serde(rename = "serviceCatalog", default)]
    pub service_catalog: Vec<CatalogService>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Token {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogService {
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogEndpoint {
    pub region: String,
    #[serde(rename = "publicURL")]
    pub public_url: String,
}

/// GET /v2.0/tenants 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct TenantsResponse {
    pub tenants: Vec<Tenant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tenant {
    pub id: String,
}
