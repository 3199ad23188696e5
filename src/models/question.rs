//! 题目数据模型
//!
//! 字段名与生成服务的 JSON 响应约定一致（camelCase，中文枚举值）

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::models::sentence;
use crate::models::{Difficulty, GrammarPoint};

/// 一道填空选择题
///
/// 题干中用 `{{0}}`、`{{1}}` 标记空格；
/// `options[i]` 是第 i 个空格的候选项，`correct_answers[i]` 是该空格的正确选项下标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub sentence: String,
    pub options: Vec<Vec<String>>,
    pub correct_answers: Vec<usize>,
    pub difficulty: Difficulty,
    pub grammar_point: GrammarPoint,
    pub explanation: Explanation,
}

/// 题目解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// 语法规则讲解（中文）
    pub rule: String,
    /// 典型例句（英文）
    pub example: String,
    /// 常见错误（中文）
    pub common_mistake: String,
    /// 本题解析（中文）
    pub analysis: String,
}

impl Question {
    /// 空格数量
    pub fn blank_count(&self) -> usize {
        self.options.len()
    }

    /// 校验题目不变量
    ///
    /// - 至少有一个空格，且 `options` 与 `correct_answers` 一一对应
    /// - 每个正确答案下标都落在对应候选项范围内
    /// - 题干引用的空格编号都有对应候选项；每个空格都被题干引用
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(QuizError::invalid_question(&self.id, "候选项列表为空"));
        }
        if self.options.len() != self.correct_answers.len() {
            return Err(QuizError::invalid_question(
                &self.id,
                format!(
                    "候选项组数 {} 与正确答案数 {} 不一致",
                    self.options.len(),
                    self.correct_answers.len()
                ),
            ));
        }
        for (i, opts) in self.options.iter().enumerate() {
            if opts.is_empty() {
                return Err(QuizError::invalid_question(
                    &self.id,
                    format!("第 {} 个空格没有候选项", i),
                ));
            }
            let correct = self.correct_answers[i];
            if correct >= opts.len() {
                return Err(QuizError::invalid_question(
                    &self.id,
                    format!(
                        "第 {} 个空格的正确答案下标 {} 超出范围 [0, {})",
                        i,
                        correct,
                        opts.len()
                    ),
                ));
            }
        }

        let referenced = sentence::referenced_blanks(&self.sentence);
        for &idx in &referenced {
            if idx >= self.options.len() {
                return Err(QuizError::invalid_question(
                    &self.id,
                    format!("题干引用了不存在的空格 {{{{{}}}}}", idx),
                ));
            }
        }
        for blank in 0..self.options.len() {
            if !referenced.contains(&blank) {
                return Err(QuizError::invalid_question(
                    &self.id,
                    format!("第 {} 个空格未在题干中出现", blank),
                ));
            }
        }

        Ok(())
    }

    /// 判断一组选择是否完全正确（所有空格都选对才算对，不给部分分）
    pub fn is_fully_correct(&self, selections: &[Option<usize>]) -> bool {
        selections.len() == self.correct_answers.len()
            && self
                .correct_answers
                .iter()
                .zip(selections)
                .all(|(&correct, &chosen)| chosen == Some(correct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "sentence": "{{0}} tired, she still finished the report.",
            "options": [["Although", "Because", "Unless", "Since"]],
            "correctAnswers": [0],
            "difficulty": "初级",
            "grammarPoint": "连词",
            "explanation": {
                "rule": "Although 引导让步状语从句，表示“尽管”。",
                "example": "Although it was raining, they went out.",
                "commonMistake": "容易与 but 连用。",
                "analysis": "前后分句存在转折关系，故选 Although。"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_wire_format() {
        let q = sample_question();

        assert_eq!(q.id, "1");
        assert_eq!(q.blank_count(), 1);
        assert_eq!(q.correct_answers, vec![0]);
        assert_eq!(q.difficulty, Difficulty::Beginner);
        assert_eq!(q.grammar_point, GrammarPoint::Conjunction);
        assert_eq!(q.explanation.example, "Although it was raining, they went out.");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_value(sample_question()).unwrap();

        assert!(json.get("correctAnswers").is_some());
        assert!(json.get("grammarPoint").is_some());
        assert!(json["explanation"].get("commonMistake").is_some());
        assert!(json.get("correct_answers").is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_question().validate().is_ok());
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mut q = sample_question();
        q.correct_answers = vec![0, 1];

        assert!(q.validate().is_err());
    }

    #[test]
    fn test_validate_correct_answer_out_of_range() {
        let mut q = sample_question();
        q.correct_answers = vec![4];

        assert!(q.validate().is_err());
    }

    #[test]
    fn test_validate_sentence_references_missing_blank() {
        let mut q = sample_question();
        q.sentence = "{{0}} tired, {{1}} she finished.".to_string();

        assert!(q.validate().is_err());
    }

    #[test]
    fn test_validate_blank_never_referenced() {
        let mut q = sample_question();
        q.sentence = "No placeholder at all.".to_string();

        assert!(q.validate().is_err());
    }

    #[test]
    fn test_is_fully_correct() {
        let q = sample_question();

        assert!(q.is_fully_correct(&[Some(0)]));
        assert!(!q.is_fully_correct(&[Some(1)]));
        assert!(!q.is_fully_correct(&[None]));
        assert!(!q.is_fully_correct(&[]));
    }

    #[test]
    fn test_multi_blank_partial_is_not_correct() {
        let mut q = sample_question();
        q.sentence = "{{0}} he was late, {{1}} he apologized.".to_string();
        q.options = vec![
            vec!["Although".into(), "Because".into()],
            vec!["so".into(), "but".into()],
        ];
        q.correct_answers = vec![1, 0];
        q.validate().unwrap();

        assert!(q.is_fully_correct(&[Some(1), Some(0)]));
        assert!(!q.is_fully_correct(&[Some(1), Some(1)]));
        assert!(!q.is_fully_correct(&[Some(1), None]));
    }
}
