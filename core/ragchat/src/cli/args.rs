use crate::domain::{HistoryRetention, RagCommand};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{IndexName, ModelName};
use common::error::Error;

/// 検索件数の上限（Pinecone の topK 上限）
pub const MAX_TOP_K: usize = 1000;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: ログを stderr にも人間向けに出力する
    pub verbose: bool,
    /// --echo: ネットワークを使わずに対話ループを動かす
    pub echo: bool,
    pub model: Option<ModelName>,
    pub embedding_model: Option<ModelName>,
    pub top_k: Option<usize>,
    pub index: Option<IndexName>,
    pub history: Option<HistoryRetention>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("ragchat")
        .about("Retrieval-augmented chat over a vector index")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit human-readable logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("echo")
                .long("echo")
                .help("Offline mode: echo provider, no embedding or index calls")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Chat model used for rewriting and answering")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("embedding-model")
                .long("embedding-model")
                .value_name("model")
                .help("Embedding model (e.g. text-embedding-004)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("top-k")
                .short('k')
                .long("top-k")
                .value_name("n")
                .help("Number of passages to retrieve per question")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("index")
                .long("index")
                .value_name("name")
                .help("Vector index name (overrides PINECONE_INDEX_NAME)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("history")
                .long("history")
                .value_name("policy")
                .help("History retention: unbounded, window:<n> or chars:<n>")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

/// 1..=MAX_TOP_K の範囲か検査する
pub fn validate_top_k(top_k: usize) -> Result<usize, Error> {
    if top_k == 0 || top_k > MAX_TOP_K {
        return Err(Error::invalid_argument(format!(
            "top-k must be between 1 and {} (got {})",
            MAX_TOP_K, top_k
        )));
    }
    Ok(top_k)
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let top_k = matches
        .get_one::<usize>("top-k")
        .copied()
        .map(validate_top_k)
        .transpose()?;
    let history = matches
        .get_one::<String>("history")
        .map(|s| s.parse::<HistoryRetention>())
        .transpose()?;

    Ok(Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        echo: matches.get_flag("echo"),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        embedding_model: matches
            .get_one::<String>("embedding-model")
            .map(|s| ModelName::new(s.clone())),
        top_k,
        index: matches
            .get_one::<String>("index")
            .map(|s| IndexName::new(s.clone())),
        history,
    })
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "ragchat", &mut std::io::stdout());
}

/// Config を RagCommand に変換する
pub fn config_to_command(config: &Config) -> RagCommand {
    if config.help {
        return RagCommand::Help;
    }
    RagCommand::Chat
}
