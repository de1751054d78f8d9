use log::debug;

use super::types::{AuthPayload, PasswordCredentials, TenantsResponse, TokenRequest, TokenResponse};
use super::{AuthContext, TenantId, UnscopedToken};
use crate::error::ObjectStorageError;

/// 服务目录中存储服务的名称
const SWIFT_SERVICE_NAME: &str = "swift";

/// Keystone v2 身份客户端
pub struct IdentityClient {
    http: reqwest::Client,
    host: String,
}

impl IdentityClient {
    /// 创建身份客户端
    ///
    /// # 参数
    /// - `http`: 共享的 HTTP 客户端
    /// - `host`: 身份服务地址，末尾的 `/` 会被去掉
    pub fn new(http: reqwest::Client, host: &str) -> Self {
        Self {
            http,
            host: host.trim_end_matches('/').to_string(),
        }
    }

    fn tokens_url(&self) -> String {
        format!("{}/v2.0/tokens", self.host)
    }

    fn tenants_url(&self) -> String {
        format!("{}/v2.0/tenants", self.host)
    }

    /// 密码凭证认证，获取未绑定租户的初始令牌
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UnscopedToken, ObjectStorageError> {
        debug!("获取认证令牌: {}", self.tokens_url());

        let request = TokenRequest {
            auth: AuthPayload {
                tenant_id: None,
                password_credentials: PasswordCredentials {
                    username: username.to_string(),
                    password: password.to_string(),
                },
            },
        };

        let resp = self
            .http
            .post(self.tokens_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ObjectStorageError::Authentication(format!("请求令牌失败: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ObjectStorageError::Authentication(format!(
                "令牌请求返回 HTTP {}",
                resp.status().as_u16()
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ObjectStorageError::Authentication(format!("解析令牌响应失败: {}", e)))?;

        Ok(UnscopedToken(body.access.token.id))
    }

    /// 解析租户：无条件取列表中的第一个
    ///
    /// 与原有行为保持一致，不提供选择策略；列表为空时报错。
    pub async fn resolve_tenant(
        &self,
        token: &UnscopedToken,
    ) -> Result<TenantId, ObjectStorageError> {
        debug!("解析租户: {}", self.tenants_url());

        let resp = self
            .http
            .get(self.tenants_url())
            .header("X-Auth-Token", &token.0)
            .send()
            .await
            .map_err(|e| ObjectStorageError::Tenant(format!("请求租户列表失败: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ObjectStorageError::Tenant(format!(
                "租户请求返回 HTTP {}",
                resp.status().as_u16()
            )));
        }

        let body: TenantsResponse = resp
            .json()
            .await
            .map_err(|e| ObjectStorageError::Tenant(format!("解析租户响应失败: {}", e)))?;

        let tenant = body
            .tenants
            .into_iter()
            .next()
            .ok_or_else(|| ObjectStorageError::Tenant("没有可用的租户".to_string()))?;

        debug!("选择租户: {}", tenant.id);
        Ok(TenantId(tenant.id))
    }

    /// 获取绑定租户的令牌，并从服务目录中解析 swift 的区域端点
    ///
    /// 端点选择为 first match wins：取服务目录中第一个名为 `swift`
    /// 的服务里第一个区域匹配的端点。目录中没有 swift 服务或没有
    /// 匹配区域的端点都是硬错误，调用方应视为配置问题而非重试。
    pub async fn scoped_token(
        &self,
        tenant: &TenantId,
        username: &str,
        password: &str,
        region: &str,
    ) -> Result<AuthContext, ObjectStorageError> {
        debug!("获取绑定租户 {} 的令牌", tenant.0);

        let request = TokenRequest {
            auth: AuthPayload {
                tenant_id: Some(tenant.0.clone()),
                password_credentials: PasswordCredentials {
                    username: username.to_string(),
                    password: password.to_string(),
                },
            },
        };

        let resp = self
            .http
            .post(self.tokens_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ObjectStorageError::Authentication(format!("请求令牌失败: {}", e)))?;

        if !resp.status().is_success() {
            return Err(ObjectStorageError::Authentication(format!(
                "令牌请求返回 HTTP {}",
                resp.status().as_u16()
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ObjectStorageError::Authentication(format!("解析令牌响应失败: {}", e)))?;

        let storage_url = body
            .access
            .service_catalog
            .iter()
            .find(|service| service.name == SWIFT_SERVICE_NAME)
            .and_then(|service| {
                service
                    .endpoints
                    .iter()
                    .find(|endpoint| endpoint.region == region)
            })
            .map(|endpoint| endpoint.public_url.clone())
            .ok_or_else(|| ObjectStorageError::EndpointResolution {
                region: region.to_string(),
            })?;

        debug!("选择 swift 端点: {}", storage_url);

        Ok(AuthContext {
            token: body.access.token.id,
            storage_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_authenticate() -> Result<()> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v2.0/tokens")
            .match_body(Matcher::Json(json!({
                "auth": {
                    "passwordCredentials": {"username": "demo", "password": "secret"}
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access": {"token": {"id": "tok-1"}}}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let token = client.authenticate("demo", "secret").await?;

        mock.assert_async().await;
        assert_eq!(token, UnscopedToken("tok-1".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_unauthorized() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v2.0/tokens")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let result = client.authenticate("demo", "wrong").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ObjectStorageError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_malformed_response() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v2.0/tokens")
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let result = client.authenticate("demo", "secret").await;

        assert!(matches!(
            result,
            Err(ObjectStorageError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_tenant_takes_first() -> Result<()> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/v2.0/tenants")
            .match_header("x-auth-token", "tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"tenants": [
                    {"id": "tenant-1", "name": "first"},
                    {"id": "tenant-2", "name": "second"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let tenant = client
            .resolve_tenant(&UnscopedToken("tok-1".to_string()))
            .await?;

        mock.assert_async().await;
        assert_eq!(tenant, TenantId("tenant-1".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_tenant_empty_list() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("GET", "/v2.0/tenants")
            .with_status(200)
            .with_body(r#"{"tenants": []}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let result = client
            .resolve_tenant(&UnscopedToken("tok-1".to_string()))
            .await;

        match result {
            Err(ObjectStorageError::Tenant(msg)) => assert!(msg.contains("没有可用的租户")),
            other => panic!("unexpected result: {:?}", other.map(|t| t.0)),
        }
    }

    #[tokio::test]
    async fn test_scoped_token_selects_region() -> Result<()> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v2.0/tokens")
            .match_body(Matcher::Json(json!({
                "auth": {
                    "tenantId": "tenant-1",
                    "passwordCredentials": {"username": "demo", "password": "secret"}
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access": {
                    "token": {"id": "scoped-1"},
                    "serviceCatalog": [
                        {"name": "nova", "endpoints": [{"region": "Spain", "publicURL": "http://nova.example"}]},
                        {"name": "swift", "endpoints": [
                            {"region": "Trento", "publicURL": "http://trento.example/v1/AUTH_x"},
                            {"region": "Spain", "publicURL": "http://spain.example/v1/AUTH_x"}
                        ]}
                    ]
                }}"#,
            )
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let ctx = client
            .scoped_token(
                &TenantId("tenant-1".to_string()),
                "demo",
                "secret",
                "Spain",
            )
            .await?;

        mock.assert_async().await;
        assert_eq!(ctx.token, "scoped-1");
        assert_eq!(ctx.storage_url, "http://spain.example/v1/AUTH_x");

        Ok(())
    }

    #[tokio::test]
    async fn test_scoped_token_no_swift_service() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v2.0/tokens")
            .with_status(200)
            .with_body(
                r#"{"access": {
                    "token": {"id": "scoped-1"},
                    "serviceCatalog": [
                        {"name": "nova", "endpoints": [{"region": "Spain", "publicURL": "http://nova.example"}]}
                    ]
                }}"#,
            )
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let result = client
            .scoped_token(
                &TenantId("tenant-1".to_string()),
                "demo",
                "secret",
                "Spain",
            )
            .await;

        // 目录中完全没有 swift 服务时是硬错误
        assert!(matches!(
            result,
            Err(ObjectStorageError::EndpointResolution { region }) if region == "Spain"
        ));
    }

    #[tokio::test]
    async fn test_scoped_token_no_matching_region() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v2.0/tokens")
            .with_status(200)
            .with_body(
                r#"{"access": {
                    "token": {"id": "scoped-1"},
                    "serviceCatalog": [
                        {"name": "swift", "endpoints": [
                            {"region": "Trento", "publicURL": "http://trento.example/v1/AUTH_x"}
                        ]}
                    ]
                }}"#,
            )
            .create_async()
            .await;

        let client = IdentityClient::new(reqwest::Client::new(), &server.url());
        let result = client
            .scoped_token(
                &TenantId("tenant-1".to_string()),
                "demo",
                "secret",
                "Spain",
            )
            .await;

        assert!(matches!(
            result,
            Err(ObjectStorageError::EndpointResolution { .. })
        ));
    }
}
