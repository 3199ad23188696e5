use serde::{Deserialize, Serialize};

/// 语法点枚举
///
/// 封闭集合：生成服务返回的 grammarPoint 必须是这六种之一，
/// 否则整批题目视为非法（避免自由字符串污染答题逻辑）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarPoint {
    /// 定语从句
    #[serde(rename = "定语从句")]
    RelativeClause,
    /// 状语从句
    #[serde(rename = "状语从句")]
    AdverbialClause,
    /// 非谓语动词
    #[serde(rename = "非谓语动词")]
    NonFiniteVerb,
    /// 连词
    #[serde(rename = "连词")]
    Conjunction,
    /// 独立主格
    #[serde(rename = "独立主格")]
    AbsoluteConstruction,
    /// 名词性从句
    #[serde(rename = "名词性从句")]
    NounClause,
}

impl GrammarPoint {
    /// 获取标准名称
    pub fn label(self) -> &'static str {
        match self {
            GrammarPoint::RelativeClause => "定语从句",
            GrammarPoint::AdverbialClause => "状语从句",
            GrammarPoint::NonFiniteVerb => "非谓语动词",
            GrammarPoint::Conjunction => "连词",
            GrammarPoint::AbsoluteConstruction => "独立主格",
            GrammarPoint::NounClause => "名词性从句",
        }
    }

    /// 所有取值（用于构建响应 schema 的枚举声明）
    pub fn all_labels() -> [&'static str; 6] {
        [
            "定语从句",
            "状语从句",
            "非谓语动词",
            "连词",
            "独立主格",
            "名词性从句",
        ]
    }

    /// 尝试从字符串解析语法点（精确匹配）
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "定语从句" => Some(GrammarPoint::RelativeClause),
            "状语从句" => Some(GrammarPoint::AdverbialClause),
            "非谓语动词" => Some(GrammarPoint::NonFiniteVerb),
            "连词" => Some(GrammarPoint::Conjunction),
            "独立主格" => Some(GrammarPoint::AbsoluteConstruction),
            "名词性从句" => Some(GrammarPoint::NounClause),
            _ => None,
        }
    }
}

impl std::fmt::Display for GrammarPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        for label in GrammarPoint::all_labels() {
            let json = format!("\"{}\"", label);
            let parsed: GrammarPoint = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.label(), label);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
        }
    }

    #[test]
    fn test_rejects_unknown_value() {
        assert!(serde_json::from_str::<GrammarPoint>("\"虚拟语气\"").is_err());
        assert!(serde_json::from_str::<GrammarPoint>("\"RelativeClause\"").is_err());
    }

    #[test]
    fn test_from_label_matches_all_labels() {
        for label in GrammarPoint::all_labels() {
            assert!(GrammarPoint::from_label(label).is_some());
        }
        assert_eq!(GrammarPoint::from_label("时态"), None);
    }
}
