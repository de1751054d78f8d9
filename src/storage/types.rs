use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 写入对象信封时固定使用的传输编码标记
pub(crate) const TRANSFER_ENCODING_BASE64: &str = "base64";

/// 存储对象的逻辑载荷
///
/// 线上格式是 JSON 信封，`value` 以 base64 编码；读回时解码还原，
/// 传输编码标记不会出现在该结构中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub mime_type: String,
    pub metadata: HashMap<String, String>,
    pub value: Bytes,
}

/// 对象的线上 JSON 信封
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ObjectEnvelope {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(rename = "valuetransferencoding")]
    pub transfer_encoding: String,
    pub value: String,
}

/// 解析换行分隔的清单文本
///
/// 逐行 trim 并丢弃空行；空响应体产生空列表而不是 None。
pub(crate) fn parse_listing(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
