use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use futures::future::join_all;
use log::debug;
use reqwest::{Method, StatusCode};
use std::collections::HashMap;

use super::types::{parse_listing, ObjectEnvelope, StoredObject, TRANSFER_ENCODING_BASE64};
use crate::error::{FailedObject, ObjectStorageError};
use crate::identity::AuthContext;

/// swift 接受的成功状态码，其余状态一律视为失败，与响应体无关
const VALID_STATUS: [u16; 4] = [200, 201, 202, 204];

/// Swift 兼容存储客户端
///
/// 无状态，每个操作都需要调用方提供有效的 [`AuthContext`]。
pub struct StorageClient {
    http: reqwest::Client,
}

impl StorageClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn container_url(ctx: &AuthContext, container: &str) -> String {
        format!(
            "{}/{}",
            ctx.storage_url.trim_end_matches('/'),
            urlencoding::encode(container)
        )
    }

    fn object_url(ctx: &AuthContext, container: &str, name: &str) -> String {
        format!(
            "{}/{}",
            Self::container_url(ctx, container),
            urlencoding::encode(name)
        )
    }

    /// 发起带认证头的 swift 请求，校验状态码后返回响应体文本
    async fn swift_request(
        &self,
        method: Method,
        url: &str,
        ctx: &AuthContext,
        body: Option<String>,
    ) -> Result<String, ObjectStorageError> {
        debug!("swift 请求: {} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header("X-Auth-Token", &ctx.token);

        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !VALID_STATUS.contains(&status.as_u16()) {
            return Err(match status {
                StatusCode::NOT_FOUND => ObjectStorageError::NotFound {
                    url: url.to_string(),
                },
                StatusCode::CONFLICT => ObjectStorageError::Conflict {
                    url: url.to_string(),
                },
                _ => ObjectStorageError::Request {
                    method: method.to_string(),
                    url: url.to_string(),
                    status: status.as_u16(),
                },
            });
        }

        Ok(resp.text().await?)
    }

    // === 容器操作 ===

    /// 创建容器
    pub async fn create_container(
        &self,
        ctx: &AuthContext,
        name: &str,
    ) -> Result<(), ObjectStorageError> {
        self.swift_request(Method::PUT, &Self::container_url(ctx, name), ctx, None)
            .await?;
        Ok(())
    }

    /// 删除容器
    ///
    /// `force` 为 true 时先并发删除容器内全部对象再删除容器本身；
    /// 各对象删除相互独立，不要求顺序，失败会全部收集后统一上报，
    /// 而不是在第一个错误处中断。未加 `force` 删除非空容器时，
    /// 服务端的 409 以 [`ObjectStorageError::Conflict`] 上抛。
    pub async fn delete_container(
        &self,
        ctx: &AuthContext,
        name: &str,
        force: bool,
    ) -> Result<(), ObjectStorageError> {
        if force {
            let objects = self.list_container(ctx, name).await?;
            debug!("清空容器 {}: {} 个对象", name, objects.len());

            let deletes = objects.iter().map(|object| async move {
                (object.clone(), self.delete_object(ctx, name, object).await)
            });

            let mut failures = Vec::new();
            for (object, result) in join_all(deletes).await {
                if let Err(e) = result {
                    failures.push(FailedObject {
                        name: object,
                        error: e.to_string(),
                    });
                }
            }

            if !failures.is_empty() {
                return Err(ObjectStorageError::BulkDelete {
                    container: name.to_string(),
                    failures,
                });
            }
        }

        self.swift_request(Method::DELETE, &Self::container_url(ctx, name), ctx, None)
            .await?;
        Ok(())
    }

    /// 列出端点下的全部容器
    pub async fn list_containers(
        &self,
        ctx: &AuthContext,
    ) -> Result<Vec<String>, ObjectStorageError> {
        let url = ctx.storage_url.trim_end_matches('/').to_string();
        let body = self.swift_request(Method::GET, &url, ctx, None).await?;
        Ok(parse_listing(&body))
    }

    /// 列出容器内的对象名
    pub async fn list_container(
        &self,
        ctx: &AuthContext,
        name: &str,
    ) -> Result<Vec<String>, ObjectStorageError> {
        let body = self
            .swift_request(Method::GET, &Self::container_url(ctx, name), ctx, None)
            .await?;
        Ok(parse_listing(&body))
    }

    // === 对象操作 ===

    /// 上传对象：构造 base64 信封后 PUT
    pub async fn put_object(
        &self,
        ctx: &AuthContext,
        container: &str,
        name: &str,
        mime_type: &str,
        value: Bytes,
        metadata: HashMap<String, String>,
    ) -> Result<(), ObjectStorageError> {
        let envelope = ObjectEnvelope {
            mime_type: mime_type.to_string(),
            metadata,
            transfer_encoding: TRANSFER_ENCODING_BASE64.to_string(),
            value: BASE64.encode(&value),
        };
        let body = serde_json::to_string(&envelope)?;

        self.swift_request(
            Method::PUT,
            &Self::object_url(ctx, container, name),
            ctx,
            Some(body),
        )
        .await?;
        Ok(())
    }

    /// 获取对象：解码信封，还原 value 的原始字节
    pub async fn get_object(
        &self,
        ctx: &AuthContext,
        container: &str,
        name: &str,
    ) -> Result<StoredObject, ObjectStorageError> {
        let body = self
            .swift_request(Method::GET, &Self::object_url(ctx, container, name), ctx, None)
            .await?;

        let envelope: ObjectEnvelope = serde_json::from_str(&body)?;
        let value = Bytes::from(BASE64.decode(envelope.value.as_bytes())?);

        Ok(StoredObject {
            mime_type: envelope.mime_type,
            metadata: envelope.metadata,
            value,
        })
    }

    /// 删除对象
    pub async fn delete_object(
        &self,
        ctx: &AuthContext,
        container: &str,
        name: &str,
    ) -> Result<(), ObjectStorageError> {
        self.swift_request(
            Method::DELETE,
            &Self::object_url(ctx, container, name),
            ctx,
            None,
        )
        .await?;
        Ok(())
    }
}
