//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("节点已存在: {0}")]
    NodeAlreadyExists(String),

    #[error("边序号超出范围: {index}（共 {count} 条边，序号从 1 开始）")]
    EdgeIndexOutOfRange { index: usize, count: usize },

    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("算法错误: {0}")]
    AlgorithmError(String),
}
