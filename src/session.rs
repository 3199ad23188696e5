//! 答题会话 - 流程层
//!
//! 一次会话对应一批已加载的题目，状态机是线性的：
//!
//! `Presenting → Submitted → (Presenting[下一题] | Finished)`
//!
//! 加载中 / 加载失败属于会话之外的应用状态（没有题目就没有会话）。
//! 重新开始由应用层丢弃旧会话、重新加载实现。

use crate::models::{sentence, Question};

/// 会话所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 展示当前题目，接受选择
    Presenting,
    /// 当前题目已提交，展示解析
    Submitted,
    /// 全部题目完成
    Finished,
}

/// 答题会话
///
/// 持有本次练习的全部可变状态：题目序列、当前位置、
/// 当前题目的每空选择、提交标志、累计得分、完成标志
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    submitted: bool,
    score: usize,
    finished: bool,
}

impl QuizSession {
    /// 用一批题目创建会话，从第 0 题开始
    ///
    /// 空批次没有可展示的题目，返回 None（对应"加载失败"）
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        let first_blanks = questions.first()?.blank_count();
        Some(Self {
            questions,
            current_index: 0,
            answers: vec![None; first_blanks],
            submitted: false,
            score: 0,
            finished: false,
        })
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.submitted {
            Phase::Submitted
        } else {
            Phase::Presenting
        }
    }

    /// 当前题目
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// 当前题目位置（0 起始）
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 题目总数
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 累计得分
    pub fn score(&self) -> usize {
        self.score
    }

    /// 当前题目的每空选择
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// 当前题目是否已提交
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// 是否已完成全部题目
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 当前题目是否每个空都已选择
    pub fn all_selected(&self) -> bool {
        self.answers.iter().all(|a| a.is_some())
    }

    /// 为某个空格选择选项（覆盖之前的选择，重复选择幂等）
    ///
    /// 仅在 Presenting 阶段有效；已提交、已完成或下标越界时不做任何事
    ///
    /// # 返回
    /// 选择是否被记录
    pub fn select_option(&mut self, blank_index: usize, option_index: usize) -> bool {
        if self.submitted || self.finished {
            return false;
        }
        if blank_index >= self.answers.len() {
            return false;
        }
        if option_index >= self.current_question().options[blank_index].len() {
            return false;
        }
        self.answers[blank_index] = Some(option_index);
        true
    }

    /// 提交当前题目
    ///
    /// 仅当每个空都已选择时有效，否则不改变任何状态。
    /// 所有空格全部选对才得 1 分，不给部分分。
    ///
    /// # 返回
    /// - `Some(true)` 全对，得分 +1
    /// - `Some(false)` 有错，得分不变
    /// - `None` 提交无效（有空未选择，或已提交/已完成）
    pub fn submit(&mut self) -> Option<bool> {
        if self.submitted || self.finished || !self.all_selected() {
            return None;
        }
        let correct = self.questions[self.current_index].is_fully_correct(&self.answers);
        if correct {
            self.score += 1;
        }
        self.submitted = true;
        Some(correct)
    }

    /// 进入下一题
    ///
    /// 仅在 Submitted 阶段有效。当前是最后一题时进入 Finished，
    /// 否则位置 +1，清空每空选择和提交标志。
    ///
    /// # 返回
    /// 状态是否发生了转移
    pub fn next(&mut self) -> bool {
        if !self.submitted || self.finished {
            return false;
        }
        if self.current_index + 1 >= self.questions.len() {
            self.finished = true;
        } else {
            self.current_index += 1;
            self.answers = vec![None; self.questions[self.current_index].blank_count()];
            self.submitted = false;
        }
        true
    }

    /// 提交后查询某个空格是否选对
    ///
    /// 未提交时返回 None
    pub fn is_blank_correct(&self, blank_index: usize) -> Option<bool> {
        if !self.submitted {
            return None;
        }
        let question = self.current_question();
        let correct = question.correct_answers.get(blank_index)?;
        Some(self.answers.get(blank_index).copied().flatten() == Some(*correct))
    }

    /// 渲染当前题干（已选择的空格回填选项文本）
    pub fn render_current_sentence(&self) -> String {
        let question = self.current_question();
        sentence::render_sentence(&question.sentence, &question.options, &self.answers)
    }

    /// 得分百分比（四舍五入）
    pub fn percentage(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.questions.len() as f64) * 100.0).round() as u32
    }

    /// 完成后的评语
    pub fn result_message(&self) -> &'static str {
        let percentage = self.percentage();
        if percentage >= 90 {
            "太出色了！你简直是语法大师！"
        } else if percentage >= 70 {
            "做得好！你已经掌握了大部分核心语法。"
        } else {
            "继续努力，语法是英语的骨架！"
        }
    }
}
