//! 有状态会话门面
//!
//! 将身份客户端与存储客户端聚合为一个句柄。认证上下文与活动容器
//! 是会话仅有的可变状态，只由会话实例自身修改；会话不做内部同步，
//! 同一实例应由单一逻辑调用方使用。多个独立会话可以安全共存，
//! 没有任何进程级单例。

use bytes::Bytes;
use garde::Validate;
use log::debug;
use std::collections::HashMap;

use crate::config::ObjectStorageConfig;
use crate::error::ObjectStorageError;
use crate::identity::{AuthContext, IdentityClient, TenantId};
use crate::storage::{StorageClient, StoredObject};

/// FIWARE 对象存储会话
///
/// # 示例
/// ```no_run
/// use fiware_object_storage::{ObjectStorage, ObjectStorageConfig};
///
/// # async fn run() -> Result<(), fiware_object_storage::ObjectStorageError> {
/// let mut storage = ObjectStorage::new(ObjectStorageConfig {
///     auth_url: "http://cloud.lab.fiware.org:4730".to_string(),
///     username: "demo".to_string(),
///     password: "secret".to_string(),
///     region: "Spain".to_string(),
///     container: "fiware".to_string(),
///     tenant: None,
/// })?;
///
/// storage.initiate().await?;
/// let objects = storage.list_container(None).await?;
/// # Ok(())
/// # }
/// ```
pub struct ObjectStorage {
    config: ObjectStorageConfig,
    identity: IdentityClient,
    storage: StorageClient,
    /// 首次解析后缓存；凭证不变则整个会话只使用这一个租户
    tenant: Option<String>,
    auth: Option<AuthContext>,
    active_container: String,
}

impl ObjectStorage {
    /// 创建会话并校验配置
    ///
    /// 活动容器取配置中的默认容器；配置了 `tenant` 时跳过租户解析。
    pub fn new(config: ObjectStorageConfig) -> Result<Self, ObjectStorageError> {
        if let Err(errors) = config.validate() {
            return Err(ObjectStorageError::Configuration(format!("{}", errors)));
        }

        let http = reqwest::Client::new();

        Ok(Self {
            identity: IdentityClient::new(http.clone(), &config.auth_url),
            storage: StorageClient::new(http),
            tenant: config.tenant.clone(),
            auth: None,
            active_container: config.container.clone(),
            config,
        })
    }

    /// 解析租户；首次成功后缓存，会话生命周期内不再重复解析
    pub async fn lookup_tenant(&mut self) -> Result<String, ObjectStorageError> {
        if let Some(ref tenant) = self.tenant {
            return Ok(tenant.clone());
        }

        let token = self
            .identity
            .authenticate(&self.config.username, &self.config.password)
            .await?;
        let TenantId(tenant) = self.identity.resolve_tenant(&token).await?;

        self.tenant = Some(tenant.clone());
        Ok(tenant)
    }

    /// 执行认证握手并缓存认证上下文
    ///
    /// 流程：解析租户（有缓存则直接使用）→ 获取绑定租户的令牌与
    /// 存储端点。每次调用都会重新认证；令牌过期后由调用方再次
    /// 调用本方法刷新。
    pub async fn initiate(&mut self) -> Result<(), ObjectStorageError> {
        let tenant = self.lookup_tenant().await?;
        let ctx = self
            .identity
            .scoped_token(
                &TenantId(tenant),
                &self.config.username,
                &self.config.password,
                &self.config.region,
            )
            .await?;

        debug!("认证完成，swift 端点: {}", ctx.storage_url);
        self.auth = Some(ctx);
        Ok(())
    }

    /// 当前活动容器
    pub fn active_container(&self) -> &str {
        &self.active_container
    }

    /// 设置活动容器，对之后省略容器参数的操作生效
    pub fn set_active_container(&mut self, name: impl Into<String>) {
        self.active_container = name.into();
    }

    fn auth(&self) -> Result<&AuthContext, ObjectStorageError> {
        self.auth.as_ref().ok_or_else(|| {
            ObjectStorageError::Authentication(
                "没有可用的认证令牌，请先调用 initiate".to_string(),
            )
        })
    }

    fn container_or_active<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        name.unwrap_or(&self.active_container)
    }

    // === 容器操作 ===

    /// 创建容器；`set_active` 为 true 时在创建成功后将其设为活动容器
    pub async fn create_container(
        &mut self,
        name: &str,
        set_active: bool,
    ) -> Result<(), ObjectStorageError> {
        self.storage.create_container(self.auth()?, name).await?;
        if set_active {
            self.active_container = name.to_string();
        }
        Ok(())
    }

    /// 删除容器；`name` 为 None 时作用于活动容器
    pub async fn delete_container(
        &self,
        name: Option<&str>,
        force: bool,
    ) -> Result<(), ObjectStorageError> {
        let container = self.container_or_active(name);
        self.storage
            .delete_container(self.auth()?, container, force)
            .await
    }

    /// 列出端点下的全部容器
    pub async fn container_list(&self) -> Result<Vec<String>, ObjectStorageError> {
        self.storage.list_containers(self.auth()?).await
    }

    /// 列出容器内的对象名；`name` 为 None 时作用于活动容器
    pub async fn list_container(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<String>, ObjectStorageError> {
        let container = self.container_or_active(name);
        self.storage.list_container(self.auth()?, container).await
    }

    // === 对象操作 ===

    /// 上传对象；`container` 为 None 时写入活动容器，`metadata` 可省略
    pub async fn put_object(
        &self,
        container: Option<&str>,
        name: &str,
        mime_type: &str,
        value: Bytes,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<(), ObjectStorageError> {
        let container = self.container_or_active(container);
        self.storage
            .put_object(
                self.auth()?,
                container,
                name,
                mime_type,
                value,
                metadata.unwrap_or_default(),
            )
            .await
    }

    /// 获取对象；`container` 为 None 时读取活动容器
    pub async fn get_object(
        &self,
        container: Option<&str>,
        name: &str,
    ) -> Result<StoredObject, ObjectStorageError> {
        let container = self.container_or_active(container);
        self.storage.get_object(self.auth()?, container, name).await
    }

    /// 删除对象；`container` 为 None 时作用于活动容器
    pub async fn delete_object(
        &self,
        container: Option<&str>,
        name: &str,
    ) -> Result<(), ObjectStorageError> {
        let container = self.container_or_active(container);
        self.storage
            .delete_object(self.auth()?, container, name)
            .await
    }
}
