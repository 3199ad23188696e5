//! # GrammarMaster
//!
//! 初中英语语法专项训练：AI 生成填空选择题的终端答题应用
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目数据模型与不变量校验
//! - `Question` / `Explanation` - 题目记录（与生成服务的 JSON 约定一致）
//! - `Difficulty` / `GrammarPoint` - 封闭枚举，拒绝未知取值
//! - `sentence` - `{{N}}` 占位符切分与回填
//! - `bank` - 内置题库（离线模式与测试夹具）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心答题流程
//! - `QuestionSource` - 调用生成式 AI 获取一批语法题，解析并校验 JSON
//!
//! ### ③ 流程层（Session）
//! - `session` - 答题会话状态机：Presenting → Submitted → 下一题/Finished
//! - 持有每空选择、提交标志、累计得分
//!
//! ### ④ 编排层（App）
//! - `app` - 加载题目、渲染终端界面、解析输入、驱动会话；
//!   加载失败只能由用户显式重新开始

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{QuizError, Result};
pub use models::{builtin_bank, Difficulty, Explanation, GrammarPoint, Question};
pub use services::QuestionSource;
pub use session::{Phase, QuizSession};
