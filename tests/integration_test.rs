//! 端到端测试：用内置题库驱动完整会话，以及生成服务的容错行为

use grammar_master::{builtin_bank, Config, Phase, QuestionSource, QuizError, QuizSession};

/// 按给定的"每题是否答对"序列走完一次会话，返回最终得分
fn play_through(answer_correctly: &[bool]) -> QuizSession {
    let mut bank = builtin_bank();
    bank.truncate(answer_correctly.len());
    let mut session = QuizSession::new(bank).unwrap();

    for &correct in answer_correctly {
        let correct_answers = session.current_question().correct_answers.clone();
        let options = session.current_question().options.clone();
        for (blank, &right) in correct_answers.iter().enumerate() {
            let choice = if correct {
                right
            } else {
                // 选一个错误选项
                (right + 1) % options[blank].len()
            };
            assert!(session.select_option(blank, choice));
        }
        assert_eq!(session.submit(), Some(correct));
        assert!(session.next());
    }

    session
}

#[test]
fn perfect_run_scores_full_marks() {
    let session = play_through(&[true, true, true, true, true]);

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.score(), 5);
    assert_eq!(session.percentage(), 100);
    assert_eq!(session.result_message(), "太出色了！你简直是语法大师！");
}

#[test]
fn mixed_run_counts_only_fully_correct_questions() {
    let session = play_through(&[true, false, true, false, true]);

    assert_eq!(session.score(), 3);
    assert_eq!(session.percentage(), 60);
    assert_eq!(session.result_message(), "继续努力，语法是英语的骨架！");
}

#[test]
fn restart_builds_a_fresh_session() {
    let finished = play_through(&[false, false, false]);
    assert!(finished.is_finished());
    assert_eq!(finished.score(), 0);

    // 重新开始 = 丢弃旧会话，用新一批题目重建
    let restarted = QuizSession::new(builtin_bank()).unwrap();
    assert_eq!(restarted.phase(), Phase::Presenting);
    assert_eq!(restarted.current_index(), 0);
    assert_eq!(restarted.score(), 0);
    assert!(restarted.answers().iter().all(|a| a.is_none()));
}

#[test]
fn rendering_finished_session_has_no_residual_tokens() {
    let mut session = QuizSession::new(builtin_bank()).unwrap();
    let correct = session.current_question().correct_answers.clone();
    for (blank, &right) in correct.iter().enumerate() {
        session.select_option(blank, right);
    }

    let rendered = session.render_current_sentence();
    assert!(!rendered.contains("{{"));
    assert!(!rendered.contains("______"));
}

fn unreachable_config() -> Config {
    let mut config = Config::default();
    // 本机保留端口，连接会立刻被拒绝
    config.llm_api_base_url = "http://127.0.0.1:9/v1".to_string();
    config.llm_api_key = "test-key".to_string();
    config
}

#[tokio::test]
async fn request_questions_fails_soft_to_empty_batch() {
    let source = QuestionSource::new(&unreachable_config());

    let questions = source.request_questions(5).await;

    // 失败折叠为空列表，而不是 panic 或错误
    assert!(questions.is_empty());
    // 空列表作为"加载失败"终态：没有可展示的会话
    assert!(QuizSession::new(questions).is_none());
}

#[test]
fn generate_surfaces_a_distinct_error() {
    tokio_test::block_on(async {
        let source = QuestionSource::new(&unreachable_config());

        let result = source.generate(5).await;

        assert!(matches!(result, Err(QuizError::LlmApiFailed { .. })));
    });
}
