mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::process;
use std::sync::Arc;

use adapter::{RagSettings, StdinLineInput, StdoutSink};
use cli::{config_to_command, parse_args, print_completion, ParseOutcome};
use common::adapter::StdEnvResolver;
use common::error::Error;
use common::ports::outbound::{EnvResolver, Log, LogRecord};
use domain::RagCommand;
use ports::inbound::RunChat;
use wiring::{wire_logger, wire_rag};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("ragchat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config_to_command(&config) == RagCommand::Help {
        print_help();
        return Ok(0);
    }

    let env: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let logger = wire_logger(env.as_ref(), config.verbose);
    let _ = logger.log(
        &LogRecord::info("command started")
            .layer("cli")
            .kind("lifecycle")
            .field("command", "chat"),
    );

    let result = RagSettings::resolve(env.as_ref(), &config).and_then(|settings| {
        let _ = logger.log(
            &LogRecord::info("settings resolved")
                .layer("wiring")
                .kind("config")
                .field("chat_model", settings.chat_model.as_str())
                .field("embedding_model", settings.embedding_model.as_str())
                .field("top_k", settings.top_k)
                .field("retention", settings.retention.to_string())
                .field("echo", settings.echo)
                .field("verbose", settings.verbose),
        );
        let app = wire_rag(&settings, Arc::clone(&env), Arc::clone(&logger))?;
        app.run(&mut StdinLineInput::new(), &mut StdoutSink::new())
    });

    let code = result.as_ref().map_or_else(Error::exit_code, |c| *c);
    let _ = logger.log(
        &LogRecord::info("command finished")
            .layer("cli")
            .kind("lifecycle")
            .field("exit_code", code),
    );
    if let Err(ref e) = result {
        let _ = logger.log(&LogRecord::error(e.to_string()).layer("cli").kind("error"));
    }
    result
}

fn print_usage() {
    eprintln!("Usage: ragchat [options]");
}

fn print_help() {
    println!("Usage: ragchat [options]");
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  -v, --verbose                 Also print logs to stderr");
    println!("  --echo                        Offline mode: echo provider, no embedding or index calls");
    println!("  -m, --model <model>           Chat model for rewriting and answering. Default: x-ai/grok-4-fast:free");
    println!("  --embedding-model <model>     Embedding model. Default: text-embedding-004");
    println!("  -k, --top-k <n>               Passages retrieved per question (1-1000). Default: 10");
    println!("  --index <name>                Vector index name (overrides PINECONE_INDEX_NAME)");
    println!("  --history <policy>            History retention: unbounded, window:<n>, chars:<n>. Default: unbounded");
    println!("  --generate <shell>            Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  OPENROUTER_API_KEY            Chat completion API key (Bearer)");
    println!("  RAGCHAT_CHAT_BASE_URL         Chat completion base URL. Default: https://openrouter.ai/api/v1");
    println!("  RAGCHAT_CHAT_MODEL            Chat model (same as -m)");
    println!("  RAGCHAT_HTTP_REFERER          Optional HTTP-Referer header for OpenRouter");
    println!("  RAGCHAT_APP_TITLE             Optional X-Title header and welcome title");
    println!("  GEMINI_API_KEY                Embedding API key");
    println!("  RAGCHAT_EMBEDDING_MODEL       Embedding model (same as --embedding-model)");
    println!("  PINECONE_API_KEY              Vector index API key");
    println!("  PINECONE_INDEX_NAME           Vector index name");
    println!("  PINECONE_INDEX_HOST           Index data-plane host (skips describe_index)");
    println!("  RAGCHAT_TOP_K                 Same as -k");
    println!("  RAGCHAT_HISTORY               Same as --history");
    println!("  RAGCHAT_HTTP_TIMEOUT_SECS     HTTP timeout in seconds. Default: 120");
    println!("  RAGCHAT_HOME                  Log directory base. Logs: $RAGCHAT_HOME/log/ragchat.jsonl");
    println!("                                If unset, $XDG_CONFIG_HOME/ragchat (e.g. ~/.config/ragchat) is used.");
    println!();
    println!("Type 'exit' at the prompt (or send EOF) to quit.");
}
