//! FIWARE Object Storage GE 客户端
//!
//! 基于 Keystone v2 身份服务完成三步认证握手（获取令牌 → 解析租户 →
//! 获取绑定租户的令牌与区域存储端点），随后对 Swift 兼容的存储服务
//! 执行容器与对象的增删查操作。
//!
//! ## 模块
//!
//! - **config**: 会话配置（serde 反序列化 + garde 校验）
//! - **identity**: Keystone v2 身份客户端（线性认证状态机）
//! - **storage**: Swift 兼容存储客户端（容器与对象操作）
//! - **session**: 有状态会话门面，聚合以上两者
//!
//! ## 示例
//!
//! ```no_run
//! use fiware_object_storage::{ObjectStorage, ObjectStorageConfig};
//!
//! # async fn run() -> Result<(), fiware_object_storage::ObjectStorageError> {
//! let mut storage = ObjectStorage::new(ObjectStorageConfig {
//!     auth_url: "http://cloud.lab.fiware.org:4730".to_string(),
//!     username: "demo".to_string(),
//!     password: "secret".to_string(),
//!     region: "Spain".to_string(),
//!     container: "fiware".to_string(),
//!     tenant: None,
//! })?;
//!
//! storage.initiate().await?;
//! storage.create_container("reports", true).await?;
//! storage
//!     .put_object(None, "hello.txt", "text/plain", "hello".into(), None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod session;
pub mod storage;

// 重新导出主要的公共 API
pub use config::ObjectStorageConfig;
pub use error::{FailedObject, ObjectStorageError};
pub use identity::{AuthContext, IdentityClient, TenantId, UnscopedToken};
pub use session::ObjectStorage;
pub use storage::{StorageClient, StoredObject};
