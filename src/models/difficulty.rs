use serde::{Deserialize, Serialize};

/// 难度等级枚举
///
/// JSON 取值为中文（与生成服务的响应约定一致），未知取值在反序列化时拒绝
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 初级
    #[serde(rename = "初级")]
    Beginner,
    /// 中级
    #[serde(rename = "中级")]
    Intermediate,
    /// 高级
    #[serde(rename = "高级")]
    Advanced,
}

impl Difficulty {
    /// 获取标准名称
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "初级",
            Difficulty::Intermediate => "中级",
            Difficulty::Advanced => "高级",
        }
    }

    /// 所有取值（用于构建响应 schema 的枚举声明）
    pub fn all_labels() -> [&'static str; 3] {
        ["初级", "中级", "高级"]
    }

    /// 尝试从字符串解析难度（精确匹配）
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "初级" => Some(Difficulty::Beginner),
            "中级" => Some(Difficulty::Intermediate),
            "高级" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        for variant in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ] {
            let json = serde_json::to_string(&variant).unwrap();
            let parsed: Difficulty = serde_json::from_str(&json).unwrap();
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn test_wire_value_is_chinese() {
        assert_eq!(serde_json::to_string(&Difficulty::Beginner).unwrap(), "\"初级\"");
    }

    #[test]
    fn test_rejects_unknown_value() {
        assert!(serde_json::from_str::<Difficulty>("\"地狱级\"").is_err());
        assert!(serde_json::from_str::<Difficulty>("\"Beginner\"").is_err());
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Difficulty::from_label("中级"), Some(Difficulty::Intermediate));
        assert_eq!(Difficulty::from_label("简单"), None);
    }
}
