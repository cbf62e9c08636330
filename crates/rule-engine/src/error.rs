//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("条件格式错误: {0}")]
    MalformedCondition(String),

    #[error("无效的操作符: {0}")]
    InvalidOperator(String),

    #[error("字段不存在: {0}")]
    FieldNotFound(String),

    #[error("类型不匹配: 操作符 {operator} 无法作用于 {actual} 与 {expected}")]
    TypeMismatch {
        operator: String,
        actual: String,
        expected: String,
    },

    #[error("规则 JSON 必须是规则列表（JSON 数组），实际为 {0}")]
    NotAnArray(String),

    #[error("第 {index} 条规则格式无效: {message}")]
    InvalidRule { index: usize, message: String },

    #[error("规则文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RuleError>;
