//! Swift 兼容存储客户端
//!
//! 容器与对象的增删查操作。所有请求都携带 `X-Auth-Token` 头，
//! 只接受 200/201/202/204 四个状态码，其余一律视为失败。

mod client;
mod types;

pub use client::StorageClient;
pub use types::StoredObject;
