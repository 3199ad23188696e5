//! 内置题库
//!
//! 一组人工整理的备用题目，用于离线模式和测试。

use crate::models::{Difficulty, Explanation, GrammarPoint, Question};

fn question(
    id: &str,
    sentence: &str,
    options: &[&[&str]],
    correct_answers: &[usize],
    difficulty: Difficulty,
    grammar_point: GrammarPoint,
    rule: &str,
    example: &str,
    common_mistake: &str,
    analysis: &str,
) -> Question {
    Question {
        id: id.to_string(),
        sentence: sentence.to_string(),
        options: options
            .iter()
            .map(|opts| opts.iter().map(|s| s.to_string()).collect())
            .collect(),
        correct_answers: correct_answers.to_vec(),
        difficulty,
        grammar_point,
        explanation: Explanation {
            rule: rule.to_string(),
            example: example.to_string(),
            common_mistake: common_mistake.to_string(),
            analysis: analysis.to_string(),
        },
    }
}

/// 返回内置题库的全部题目
pub fn builtin_bank() -> Vec<Question> {
    vec![
        question(
            "1",
            "{{0}} tired, she still finished the report.",
            &[&["Although", "Because", "Unless", "Since"]],
            &[0],
            Difficulty::Beginner,
            GrammarPoint::Conjunction,
            "Although 引导让步状语从句，表示“尽管”。",
            "Although it was raining, they went out.",
            "容易与 but 连用。注意：although 和 but 不能同时出现在一个句子中。",
            "句子前半部分说“累”，后半部分说“完成了报告”，存在转折/让步关系，故选 Although。",
        ),
        question(
            "2",
            "The boy {{0}} is playing football is my brother.",
            &[&["who", "which", "whose", "whom"]],
            &[0],
            Difficulty::Beginner,
            GrammarPoint::RelativeClause,
            "who 引导定语从句，先行词为人且在从句中作主语。",
            "The girl who is singing is my friend.",
            "误用 which 引导人的定语从句。",
            "先行词是 The boy（人），从句中缺少主语，因此使用 who。",
        ),
        question(
            "3",
            "I don't know {{0}} he will come or not.",
            &[&["whether", "if", "that", "when"]],
            &[0],
            Difficulty::Intermediate,
            GrammarPoint::NounClause,
            "whether...or not 是固定搭配，表示“是否”。",
            "I wonder whether it will rain or not.",
            "在有 or not 的情况下误用 if（虽然 if 也可以表示是否，但通常不直接接 or not）。",
            "句尾有 or not，固定搭配首选 whether。",
        ),
        question(
            "4",
            "{{0}} the homework, the boy went out to play.",
            &[&["Having finished", "Finished", "To finish", "Finish"]],
            &[0],
            Difficulty::Advanced,
            GrammarPoint::NonFiniteVerb,
            "现在分词的完成式（Having done）表示该动作发生在主句动作之前。",
            "Having seen the film, I didn't want to see it again.",
            "误用过去分词 Finished（过去分词表示被动或完成，但此处主语 boy 是动作执行者）。",
            "“完成作业”发生在“出去玩”之前，且 boy 与 finish 是主动关系，故用 Having finished。",
        ),
        question(
            "5",
            "This is the factory {{0}} my father works.",
            &[&["where", "which", "that", "whose"]],
            &[0],
            Difficulty::Intermediate,
            GrammarPoint::RelativeClause,
            "where 引导定语从句，先行词为地点且在从句中作状语。",
            "The house where I live is very old.",
            "误用 which。如果从句缺主语或宾语用 which，缺状语用 where。",
            "works 是不及物动词，从句不缺宾语，my father works in the factory，需要地点状语，故选 where。",
        ),
        question(
            "6",
            "Time {{0}}, we will go for a picnic.",
            &[&["permitting", "permitted", "permits", "to permit"]],
            &[0],
            Difficulty::Advanced,
            GrammarPoint::AbsoluteConstruction,
            "独立主格结构：名词/代词 + 分词。Time 与 permit 是主动关系。",
            "Weather permitting, we shall go.",
            "误用 permitted。注意 Time 与 permit 的逻辑关系是主动的。",
            "这是一个独立主格结构，Time 是逻辑主语，与 permit 是主动关系，故用现在分词 permitting。",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = builtin_bank();

        assert_eq!(bank.len(), 6);
        for q in &bank {
            q.validate().unwrap();
        }
    }

    #[test]
    fn test_builtin_bank_ids_unique() {
        let bank = builtin_bank();
        let mut ids: Vec<_> = bank.iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), bank.len());
    }

    #[test]
    fn test_builtin_bank_covers_multiple_grammar_points() {
        let bank = builtin_bank();
        let mut points: Vec<_> = bank.iter().map(|q| q.grammar_point).collect();
        points.sort_by_key(|p| p.label());
        points.dedup();

        assert!(points.len() >= 4);
    }
}
