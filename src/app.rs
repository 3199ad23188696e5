//! 应用主逻辑 - 编排层
//!
//! 负责把各层拼起来：加载题目（在线生成或内置题库）、
//! 渲染终端界面、解析用户输入、驱动答题会话状态机。
//!
//! 界面输出走 stdout，诊断日志走 tracing（stderr）。

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{builtin_bank, sentence, Question, SentencePart};
use crate::services::QuestionSource;
use crate::session::{Phase, QuizSession};
use crate::utils::logging;

/// 一次会话结束后的走向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// 丢弃当前会话，重新加载一批题目
    Restart,
    /// 退出程序
    Quit,
}

/// 用户输入解析出的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// 为第 N 个空选择第 M 个选项
    Select { blank: usize, option: usize },
    Submit,
    Next,
    Restart,
    Quit,
}

/// 应用主结构
pub struct App {
    config: Config,
    source: QuestionSource,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        if !config.offline && config.llm_api_key.is_empty() {
            warn!("⚠️ 未配置 LLM_API_KEY，在线生成大概率会失败（可设置 QUIZ_OFFLINE=true 使用内置题库）");
        }

        let source = QuestionSource::new(&config);
        Ok(Self { config, source })
    }

    /// 运行应用主循环
    ///
    /// 每轮循环对应一次完整会话：加载 → 答题 → 完成/重新开始
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let questions = self.load_questions().await;

            let Some(mut session) = QuizSession::new(questions) else {
                // 空批次 = 加载失败，唯一的出路是用户显式重新开始
                println!();
                println!("❌ 题目加载失败，请检查网络与 API 配置。");
                match Self::prompt_restart_or_quit(&mut lines).await? {
                    Outcome::Restart => continue,
                    Outcome::Quit => break,
                }
            };

            match self.run_session(&mut session, &mut lines).await? {
                Outcome::Restart => continue,
                Outcome::Quit => break,
            }
        }

        println!("再见！");
        Ok(())
    }

    /// 加载一批题目
    ///
    /// 离线模式直接取内置题库，否则调用生成服务（失败返回空列表）
    async fn load_questions(&self) -> Vec<Question> {
        if self.config.offline {
            info!("📚 使用内置题库");
            let mut bank = builtin_bank();
            bank.truncate(self.config.question_count.max(1));
            return bank;
        }

        println!();
        println!("✨ 正在为您生成全新题目，AI 正在精心编排语法挑战...");
        let questions = self
            .source
            .request_questions(self.config.question_count)
            .await;

        if self.config.verbose_logging {
            for question in &questions {
                info!(
                    "题目 {}: {}",
                    question.id,
                    logging::truncate_text(&debug_sentence_parts(&question.sentence), 80)
                );
            }
        }

        questions
    }

    /// 单次会话的交互循环
    async fn run_session(
        &self,
        session: &mut QuizSession,
        lines: &mut Lines<BufReader<Stdin>>,
    ) -> Result<Outcome> {
        let mut needs_render = true;

        loop {
            if needs_render {
                match session.phase() {
                    Phase::Presenting => Self::render_question(session),
                    Phase::Submitted => {
                        Self::render_question(session);
                        Self::render_explanation(session);
                    }
                    Phase::Finished => Self::render_result(session),
                }
            }
            needs_render = true;

            Self::print_prompt(session.phase());
            let Some(line) = lines.next_line().await? else {
                return Ok(Outcome::Quit);
            };

            let command = match Self::parse_command(&line, session.phase()) {
                Some(cmd) => cmd,
                None => {
                    Self::print_hint(session);
                    needs_render = false;
                    continue;
                }
            };

            match command {
                Command::Quit => return Ok(Outcome::Quit),
                Command::Restart => {
                    info!("🔄 重新开始");
                    return Ok(Outcome::Restart);
                }
                Command::Select { blank, option } => {
                    if !session.select_option(blank, option) {
                        println!("该选择无效（空格或选项不存在，或本题已提交）。");
                        needs_render = false;
                    }
                }
                Command::Submit => match session.submit() {
                    Some(true) => info!("✓ 回答正确，当前得分 {}", session.score()),
                    Some(false) => info!("✗ 回答错误，当前得分 {}", session.score()),
                    None => {
                        println!("还有空格未选择，不能提交。");
                        needs_render = false;
                    }
                },
                Command::Next => {
                    if !session.next() {
                        println!("请先提交本题。");
                        needs_render = false;
                    }
                }
            }
        }
    }

    /// 加载失败界面的选择
    async fn prompt_restart_or_quit(lines: &mut Lines<BufReader<Stdin>>) -> Result<Outcome> {
        loop {
            print!("[r] 重新开始  [q] 退出 > ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                return Ok(Outcome::Quit);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "r" => return Ok(Outcome::Restart),
                "q" => return Ok(Outcome::Quit),
                _ => continue,
            }
        }
    }

    // ========== 输入解析 ==========

    /// 解析一行用户输入
    ///
    /// 支持：`A`（给唯一的空选 A）、`2 B` / `2B`（给第 2 个空选 B）、
    /// `s` 提交、`n` / 空行 下一题、`r` 重新开始、`q` 退出
    fn parse_command(line: &str, phase: Phase) -> Option<Command> {
        let input = line.trim().to_ascii_lowercase();

        match input.as_str() {
            "q" | "quit" | "exit" => return Some(Command::Quit),
            "r" | "restart" => return Some(Command::Restart),
            "s" | "submit" => return Some(Command::Submit),
            "n" | "next" | "" => {
                // 空行在已提交阶段当"下一题"，其他阶段不猜测用户意图
                if matches!(phase, Phase::Submitted) || input == "n" || input == "next" {
                    return Some(Command::Next);
                }
                return None;
            }
            _ => {}
        }

        Self::parse_selection(&input).map(|(blank, option)| Command::Select { blank, option })
    }

    /// 解析选择输入，返回 (空格下标, 选项下标)，均为 0 起始
    fn parse_selection(input: &str) -> Option<(usize, usize)> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();

        let mut chars = compact.chars();
        let first = chars.next()?;

        if first.is_ascii_alphabetic() {
            // 单字母：默认第 1 个空
            if chars.next().is_some() {
                return None;
            }
            return Some((0, (first as u8 - b'a') as usize));
        }

        // 数字 + 字母，如 "2b"（空格编号 1 起始）
        let digits: String = compact.chars().take_while(|c| c.is_ascii_digit()).collect();
        let rest = &compact[digits.len()..];
        if digits.is_empty() || rest.len() != 1 {
            return None;
        }
        let blank: usize = digits.parse().ok()?;
        let letter = rest.chars().next()?;
        if blank == 0 || !letter.is_ascii_alphabetic() {
            return None;
        }
        Some((blank - 1, (letter.to_ascii_lowercase() as u8 - b'a') as usize))
    }

    // ========== 界面渲染 ==========

    fn render_question(session: &QuizSession) {
        let question = session.current_question();

        println!();
        println!("{}", "=".repeat(60));
        println!(
            "题目 {}/{}  [{}] [{}]  当前得分: {}",
            session.current_index() + 1,
            session.total(),
            question.difficulty,
            question.grammar_point,
            session.score()
        );
        println!("{}", "=".repeat(60));
        println!();
        println!("  {}", session.render_current_sentence());
        println!();

        for (blank_idx, options) in question.options.iter().enumerate() {
            if question.blank_count() > 1 {
                print!("第 {} 空 ", blank_idx + 1);
            }
            match session.is_blank_correct(blank_idx) {
                Some(true) => println!("✓ 选对了"),
                Some(false) => println!(
                    "✗ 正确答案: {}",
                    options[question.correct_answers[blank_idx]]
                ),
                None => println!("请选择最合适的选项:"),
            }
            for (opt_idx, option) in options.iter().enumerate() {
                let letter = (b'A' + opt_idx as u8) as char;
                let marker = if session.answers().get(blank_idx).copied().flatten()
                    == Some(opt_idx)
                {
                    "▶"
                } else {
                    " "
                };
                println!("  {} {}. {}", marker, letter, option);
            }
            println!();
        }
    }

    fn render_explanation(session: &QuizSession) {
        let question = session.current_question();
        let correct = question.is_fully_correct(session.answers());

        println!("{}", "─".repeat(60));
        if correct {
            println!("🎉 太棒了！回答正确");
        } else {
            println!("💪 别灰心，再接再厉");
        }
        println!("{}", "─".repeat(60));
        println!("【语法详解】{}", question.explanation.rule);
        println!("【典型例句】\"{}\"", question.explanation.example);
        println!("【常见错误】{}", question.explanation.common_mistake);
        println!("【本题解析】{}", question.explanation.analysis);
        println!();
    }

    fn render_result(session: &QuizSession) {
        println!();
        println!("{}", "=".repeat(60));
        println!("🏆 练习完成！");
        println!();
        println!("  得分: {} / {}  ({}%)", session.score(), session.total(), session.percentage());
        println!();
        println!("  “{}”", session.result_message());
        println!("{}", "=".repeat(60));
    }

    fn print_prompt(phase: Phase) {
        let prompt = match phase {
            Phase::Presenting => "选择选项 (A-D / \"2 B\")，[s] 提交，[r] 重新开始，[q] 退出 > ",
            Phase::Submitted => "[n] 下一题，[r] 重新开始，[q] 退出 > ",
            Phase::Finished => "[r] 重新开始，[q] 退出 > ",
        };
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
    }

    fn print_hint(session: &QuizSession) {
        match session.phase() {
            Phase::Presenting => {
                if session.current_question().blank_count() > 1 {
                    println!("输入格式：\"空格号 选项字母\"，如 1 B；选完所有空后输入 s 提交。");
                } else {
                    println!("输入选项字母 A-D，然后输入 s 提交。");
                }
            }
            Phase::Submitted => println!("输入 n 进入下一题。"),
            Phase::Finished => println!("输入 r 重新开始，或 q 退出。"),
        }
    }
}

/// 调试辅助：把题干切分结果拼成带标注的字符串（verbose 日志用）
fn debug_sentence_parts(raw: &str) -> String {
    sentence::split_sentence(raw)
        .into_iter()
        .map(|part| match part {
            SentencePart::Text(t) => t,
            SentencePart::Blank(i) => format!("[空{}]", i),
        })
        .collect()
}
