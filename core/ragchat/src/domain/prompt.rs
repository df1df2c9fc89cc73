//! プロンプト組み立て（純粋関数）
//!
//! Query Rewriter への指示文、検索結果からのコンテキスト、最終プロンプトを作る。

use super::SearchMatch;

/// コンテキスト内のパッセージ区切り
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// 後続質問を単独で意味の通る質問に言い換えさせる指示文
pub fn rewrite_instruction(question: &str) -> String {
    format!(
        "Based on our chat history, rephrase this follow-up question into a complete, standalone question: \"{}\"",
        question
    )
}

/// パッセージ本文を区切り文字で連結する。0 件なら空文字
pub fn assemble_context<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<&str>>()
        .join(CONTEXT_SEPARATOR)
}

/// 検索結果の本文からコンテキストを作る
pub fn context_from_matches(matches: &[SearchMatch]) -> String {
    let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
    assemble_context(&texts)
}

/// コンテキストと言い換え後の質問を埋め込んだ最終プロンプト
pub fn build_final_prompt(context: &str, question: &str) -> String {
    format!("\nContext: {}\n---\nQuestion: {}\n", context, question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_context_two_texts() {
        assert_eq!(assemble_context(&["A", "B"]), "A\n\n---\n\nB");
    }

    #[test]
    fn test_assemble_context_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(assemble_context(&empty), "");
    }

    #[test]
    fn test_assemble_context_single() {
        assert_eq!(assemble_context(&["only".to_string()]), "only");
    }

    #[test]
    fn test_context_from_matches_preserves_order() {
        let matches = vec![
            SearchMatch::new("2", Some(0.9), "second-id first"),
            SearchMatch::new("1", Some(0.8), "first-id second"),
        ];
        assert_eq!(
            context_from_matches(&matches),
            "second-id first\n\n---\n\nfirst-id second"
        );
    }

    #[test]
    fn test_build_final_prompt() {
        assert_eq!(
            build_final_prompt("A\n\n---\n\nB", "What is a stack?"),
            "\nContext: A\n\n---\n\nB\n---\nQuestion: What is a stack?\n"
        );
    }

    #[test]
    fn test_build_final_prompt_empty_context() {
        assert_eq!(
            build_final_prompt("", "Q"),
            "\nContext: \n---\nQuestion: Q\n"
        );
    }

    #[test]
    fn test_rewrite_instruction_quotes_question() {
        let s = rewrite_instruction("and its time complexity?");
        assert!(s.starts_with("Based on our chat history"));
        assert!(s.ends_with("\"and its time complexity?\""));
    }
}
