//! CLI から解釈したコマンド

/// main がディスパッチするコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RagCommand {
    Help,
    /// 対話ループを開始する
    Chat,
}
