//! 应用程序错误类型
//!
//! 按来源分类：LLM 调用 / 响应解析 / 题目数据校验

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum QuizError {
    /// LLM API 调用失败
    #[error("LLM API 调用失败 (模型: {model}): {source}")]
    LlmApiFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyContent { model: String },

    /// JSON 解析失败
    #[error("JSON 解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    /// 响应结构不符合约定（不是题目数组）
    #[error("响应结构非法: {0}")]
    BadResponseShape(String),

    /// 题目数据违反不变量
    #[error("题目数据非法 (id: {id}): {reason}")]
    InvalidQuestion { id: String, reason: String },
}

impl QuizError {
    /// 创建 LLM API 调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        QuizError::LlmApiFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }

    /// 创建题目校验错误
    pub fn invalid_question(id: impl Into<String>, reason: impl Into<String>) -> Self {
        QuizError::InvalidQuestion {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, QuizError>;
