//! 会话配置

use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// FIWARE 对象存储会话配置
///
/// 凭证在会话创建时一次性提供，会话生命周期内不可变。
/// `tenant` 可选：配置后跳过租户解析，直接使用给定的租户 ID。
#[derive(Debug, Clone, Deserialize, Serialize, SmartDefault, Validate)]
#[serde(default)]
pub struct ObjectStorageConfig {
    /// 身份服务地址，如 http://cloud.lab.fiware.org:4730
    #[garde(length(min = 1))]
    #[default = ""]
    pub auth_url: String,

    /// 用户名
    #[garde(length(min = 1))]
    #[default = ""]
    pub username: String,

    /// 密码
    #[garde(length(min = 1))]
    #[default = ""]
    pub password: String,

    /// 区域名称，用于在服务目录中选择 swift 端点
    #[garde(length(min = 1))]
    #[default = ""]
    pub region: String,

    /// 默认容器，作为活动容器的初始值
    #[garde(length(min = 1))]
    #[default = ""]
    pub container: String,

    /// 租户 ID（可选，配置后跳过租户解析）
    #[garde(skip)]
    pub tenant: Option<String>,
}
