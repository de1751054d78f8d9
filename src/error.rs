use thiserror::Error;

/// 强制清空容器时单个对象删除失败的信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedObject {
    pub name: String,
    pub error: String,
}

/// FIWARE 对象存储统一错误类型
#[derive(Error, Debug)]
pub enum ObjectStorageError {
    #[error("认证失败: {0}")]
    Authentication(String),

    #[error("租户解析失败: {0}")]
    Tenant(String),

    #[error("服务目录中没有匹配区域 {region} 的 swift 端点")]
    EndpointResolution { region: String },

    #[error("请求失败 [{method} {url}]: HTTP {status}")]
    Request {
        method: String,
        url: String,
        status: u16,
    },

    #[error("资源不存在: {url}")]
    NotFound { url: String },

    #[error("冲突，容器非空: {url}")]
    Conflict { url: String },

    #[error("清空容器 {container} 失败: {count} 个对象删除失败", count = .failures.len())]
    BulkDelete {
        container: String,
        failures: Vec<FailedObject>,
    },

    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("base64 解码失败: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("配置错误: {0}")]
    Configuration(String),
}
