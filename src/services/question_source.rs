//! 题目生成服务 - 业务能力层
//!
//! 只负责"向生成式 AI 请求一批语法题"这一件事，不关心答题流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点、Azure、Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::models::{Difficulty, GrammarPoint, Question};

/// 题目生成服务
///
/// 职责：
/// - 构建生成题目的 prompt 和 JSON 响应 schema
/// - 调用 LLM API 并解析、校验返回的题目
/// - 每次调用都是独立请求，不做重试、缓存、限流
pub struct QuestionSource {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl QuestionSource {
    /// 创建新的题目生成服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 请求一批语法题（容错版本）
    ///
    /// 这是对外的主入口：任何失败（网络、鉴权、JSON 解析、schema 校验）
    /// 都折叠为返回空列表，细节只记录到日志。调用方把空列表当作
    /// "加载失败"处理，由用户显式触发重新开始。
    ///
    /// 需要区分具体错误的调用方请直接使用 [`QuestionSource::generate`]。
    pub async fn request_questions(&self, count: usize) -> Vec<Question> {
        match self.generate(count).await {
            Ok(questions) => questions,
            Err(e) => {
                warn!("生成题目失败: {}", e);
                Vec::new()
            }
        }
    }

    /// 请求一批语法题（可失败版本）
    ///
    /// # 返回
    /// 返回通过全部不变量校验的题目列表；只要有一道题非法，整批视为失败
    pub async fn generate(&self, count: usize) -> Result<Vec<Question>> {
        debug!("调用 LLM API 生成 {} 道题目，模型: {}", count, self.model_name);

        let (user_message, system_message) = self.build_messages(count);

        // 构建消息列表
        let mut messages = Vec::new();

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(|e| QuizError::llm_api_failed(&self.model_name, e))?;
        messages.push(ChatCompletionRequestMessage::System(system_msg));

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| QuizError::llm_api_failed(&self.model_name, e))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求：用 json_schema 响应格式约束题目结构
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(4096u32)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: "grammar_questions".to_string(),
                    description: Some("一批英语语法填空选择题".to_string()),
                    schema: Some(Self::response_schema()),
                    strict: Some(true),
                },
            })
            .build()
            .map_err(|e| QuizError::llm_api_failed(&self.model_name, e))?;

        // 调用 API
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| QuizError::llm_api_failed(&self.model_name, e))?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| QuizError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        let questions = Self::parse_questions(&content)?;

        if questions.len() != count {
            debug!("请求 {} 道题目，实际返回 {} 道", count, questions.len());
        }
        info!("✓ 成功生成 {} 道语法题", questions.len());

        Ok(questions)
    }

    /// 构建生成题目的消息
    ///
    /// 返回 (user_message, system_message)
    fn build_messages(&self, count: usize) -> (String, String) {
        let system_message = "你是一位资深的初中英语语法老师，擅长编写高质量的语法填空选择题，\
                              并能用中文给出准确、易懂的讲解。"
            .to_string();

        let user_message = format!(
            r#"请生成 {count} 道面向初中生的英语语法填空选择题。

要求：
- 覆盖多种语法点：定语从句、状语从句、非谓语动词、连词、独立主格、名词性从句
- 题干用 {{{{0}}}} 标记空格（如有多个空格依次用 {{{{1}}}}、{{{{2}}}}）
- 每个空格提供 4 个候选项，有且只有一个正确答案
- correctAnswers 数组给出每个空格正确选项的下标（0-3）
- difficulty 取值：初级 / 中级 / 高级
- grammarPoint 取值：定语从句 / 状语从句 / 非谓语动词 / 连词 / 独立主格 / 名词性从句
- explanation 四个字段：rule（语法规则，中文）、example（英文例句）、
  commonMistake（常见错误，中文）、analysis（本题解析，中文）

按照指定的 JSON 格式返回。"#,
        );

        (user_message, system_message)
    }

    /// 题目列表的 JSON 响应 schema
    ///
    /// json_schema 严格模式要求根节点是 object，所以把题目数组包在
    /// `questions` 字段里；解析时同时兼容直接返回数组的服务
    fn response_schema() -> serde_json::Value {
        let question_schema = json!({
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "sentence": {
                    "type": "string",
                    "description": "题干，用 {{0}} 标记空格"
                },
                "options": {
                    "type": "array",
                    "items": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "description": "每个空格一组候选项，每组 4 个"
                },
                "correctAnswers": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "description": "每个空格正确选项的下标 (0-3)"
                },
                "difficulty": {
                    "type": "string",
                    "enum": Difficulty::all_labels(),
                    "description": "难度等级"
                },
                "grammarPoint": {
                    "type": "string",
                    "enum": GrammarPoint::all_labels(),
                    "description": "考查的语法点"
                },
                "explanation": {
                    "type": "object",
                    "properties": {
                        "rule": { "type": "string", "description": "语法规则（中文）" },
                        "example": { "type": "string", "description": "英文例句" },
                        "commonMistake": { "type": "string", "description": "常见错误（中文）" },
                        "analysis": { "type": "string", "description": "本题解析（中文）" }
                    },
                    "required": ["rule", "example", "commonMistake", "analysis"],
                    "additionalProperties": false
                }
            },
            "required": [
                "id", "sentence", "options", "correctAnswers",
                "difficulty", "grammarPoint", "explanation"
            ],
            "additionalProperties": false
        });

        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": question_schema
                }
            },
            "required": ["questions"],
            "additionalProperties": false
        })
    }

    /// 解析 LLM 返回的题目 JSON
    ///
    /// 兼容三种形态：裸数组、`{"questions": [...]}` 包装对象、
    /// 以及用 Markdown 代码块包裹的上述两种。
    /// 每道题都要通过 [`Question::validate`]，否则整批失败。
    pub(crate) fn parse_questions(text: &str) -> Result<Vec<Question>> {
        let cleaned = Self::strip_code_fence(text);

        let value: serde_json::Value = serde_json::from_str(cleaned)?;
        let array = match value {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(mut map) => match map.remove("questions") {
                Some(serde_json::Value::Array(items)) => items,
                _ => {
                    return Err(QuizError::BadResponseShape(
                        "对象中没有 questions 数组".to_string(),
                    ))
                }
            },
            _ => {
                return Err(QuizError::BadResponseShape(
                    "既不是数组也不是对象".to_string(),
                ))
            }
        };

        let questions: Vec<Question> =
            serde_json::from_value(serde_json::Value::Array(array))?;

        for question in &questions {
            question.validate()?;
        }

        Ok(questions)
    }

    /// 去掉 Markdown 代码块包装（```json ... ```）
    fn strip_code_fence(text: &str) -> &str {
        let trimmed = text.trim();
        let Some(rest) = trimmed.strip_prefix("```") else {
            return trimmed;
        };
        // 跳过 "```json" 之类的语言标记行
        let body = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            None => rest,
        };
        body.trim_end().trim_end_matches("```").trim()
    }
}
