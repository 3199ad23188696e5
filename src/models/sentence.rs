//! 题干占位符处理
//!
//! 题干中用 `{{0}}`、`{{1}}` 标记第 N 个空格。
//! 本模块负责切分题干、扫描引用到的空格编号、以及把用户选择回填成完整句子。

use regex::Regex;
use std::sync::OnceLock;

/// 未作答空格的显示占位
pub const BLANK_MARKER: &str = "______";

fn blank_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(\d+)\}\}").expect("空格占位符正则非法"))
}

/// 题干片段：普通文本或第 N 个空格
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentencePart {
    /// 普通文本
    Text(String),
    /// 第 N 个空格（0 起始）
    Blank(usize),
}

/// 把题干切分为文本与空格片段（保持原顺序）
pub fn split_sentence(sentence: &str) -> Vec<SentencePart> {
    let re = blank_pattern();
    let mut parts = Vec::new();
    let mut last_end = 0;

    for caps in re.captures_iter(sentence) {
        let m = caps.get(0).unwrap();
        if m.start() > last_end {
            parts.push(SentencePart::Text(sentence[last_end..m.start()].to_string()));
        }
        // 正则保证捕获组是纯数字；过长的数字序列当普通文本处理
        match caps[1].parse::<usize>() {
            Ok(idx) => parts.push(SentencePart::Blank(idx)),
            Err(_) => parts.push(SentencePart::Text(m.as_str().to_string())),
        }
        last_end = m.end();
    }
    if last_end < sentence.len() {
        parts.push(SentencePart::Text(sentence[last_end..].to_string()));
    }

    parts
}

/// 扫描题干中引用到的所有空格编号（按出现顺序，可能有重复）
pub fn referenced_blanks(sentence: &str) -> Vec<usize> {
    split_sentence(sentence)
        .into_iter()
        .filter_map(|p| match p {
            SentencePart::Blank(idx) => Some(idx),
            SentencePart::Text(_) => None,
        })
        .collect()
}

/// 渲染题干：已选择的空格回填选项文本，未选择的显示占位线
///
/// 越界的空格编号保留原始标记（正常数据在校验阶段已被拒绝）
pub fn render_sentence(
    sentence: &str,
    options: &[Vec<String>],
    selections: &[Option<usize>],
) -> String {
    let mut out = String::with_capacity(sentence.len());
    for part in split_sentence(sentence) {
        match part {
            SentencePart::Text(text) => out.push_str(&text),
            SentencePart::Blank(idx) => {
                let chosen = selections
                    .get(idx)
                    .copied()
                    .flatten()
                    .and_then(|opt| options.get(idx).and_then(|opts| opts.get(opt)));
                match chosen {
                    Some(text) => out.push_str(text),
                    None if idx < options.len() => out.push_str(BLANK_MARKER),
                    None => {
                        out.push_str("{{");
                        out.push_str(&idx.to_string());
                        out.push_str("}}");
                    }
                }
            }
        }
    }
    out
}
