use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 每次练习生成的题目数量
    pub question_count: usize,
    /// 离线模式：使用内置题库，不调用 LLM
    pub offline: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-3-flash-preview".to_string(),
            question_count: 5,
            offline: false,
            verbose_logging: false,
        }
    }
}

/// `grammar-master.toml` 的可选配置项（缺省字段沿用默认值）
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    llm_api_key: Option<String>,
    llm_api_base_url: Option<String>,
    llm_model_name: Option<String>,
    question_count: Option<usize>,
    offline: Option<bool>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载配置
    ///
    /// 优先级：默认值 < `grammar-master.toml` < 环境变量
    pub fn load() -> Self {
        let base = Self::from_file("grammar-master.toml").unwrap_or_default();
        Self::from_env_with(base)
    }

    /// 从环境变量加载配置（基于默认值）
    pub fn from_env() -> Self {
        Self::from_env_with(Self::default())
    }

    fn from_env_with(default: Self) -> Self {
        // GEMINI_API_KEY 是原版前端使用的变量名，保留为别名
        let api_key = std::env::var("LLM_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .unwrap_or(default.llm_api_key);
        Self {
            llm_api_key: api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            question_count: std::env::var("QUESTION_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(default.question_count),
            offline: std::env::var("QUIZ_OFFLINE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.offline),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 配置文件加载（文件不存在或解析失败时返回 None）
    pub fn from_file(path: impl AsRef<Path>) -> Option<Self> {
        let content = std::fs::read_to_string(path.as_ref()).ok()?;
        let file: ConfigFile = match toml::from_str(&content) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("配置文件解析失败 ({}): {}", path.as_ref().display(), e);
                return None;
            }
        };
        let default = Self::default();
        Some(Self {
            llm_api_key: file.llm_api_key.unwrap_or(default.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(default.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(default.llm_model_name),
            question_count: file
                .question_count
                .filter(|&n| n > 0)
                .unwrap_or(default.question_count),
            offline: file.offline.unwrap_or(default.offline),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.question_count, 5);
        assert_eq!(config.llm_model_name, "gemini-3-flash-preview");
        assert!(!config.offline);
    }

    #[test]
    fn test_config_file_partial_fields() {
        let file: ConfigFile = toml::from_str(
            r#"
            llm_model_name = "gemini-3.0-pro-preview"
            question_count = 8
            "#,
        )
        .unwrap();

        assert_eq!(file.llm_model_name.as_deref(), Some("gemini-3.0-pro-preview"));
        assert_eq!(file.question_count, Some(8));
        assert!(file.llm_api_key.is_none());
    }

    #[test]
    fn test_config_from_env_has_sane_values() {
        let config = Config::from_env();

        // 环境变量可能覆盖具体取值，这里只验证基本合法性
        assert!(config.question_count > 0);
        assert!(!config.llm_api_base_url.is_empty());
        assert!(!config.llm_model_name.is_empty());
    }

    #[test]
    fn test_config_file_missing_returns_none() {
        assert!(Config::from_file("no_such_dir/no_such_file.toml").is_none());
    }
}
