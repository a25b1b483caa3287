use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use csvql::config::EngineConfig;
use csvql::query::executor::engine::ExecutionEngine;
use csvql::query::executor::result::{QueryError, QueryResultSet};
use csvql::query::parser::{self, tokenize, SelectStatement, Token};
use csvql::query::planner::{ast_to_ir, QueryPlan};
use csvql::query::semantic::SemanticResult;

const HISTORY_FILE: &str = ".csvql_history";

#[derive(Parser)]
#[command(author, version, about = "CSVQL - query CSV files with a small SQL dialect")]
struct Cli {
    /// Directory that table names are resolved against
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Log level (overrides RUST_LOG)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Execute a query directly
    Query {
        /// Query to execute
        query: String,

        /// Print the output of every compilation stage
        #[arg(short, long)]
        verbose: bool,

        /// Result output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show tokens, AST, semantic diagnostics and plan without executing
    Plan {
        /// Query to compile
        query: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    let _ = builder.try_init();
}

fn engine_config(cli: &Cli) -> Result<EngineConfig> {
    if !cli.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", cli.delimiter);
    }
    Ok(EngineConfig {
        data_dir: cli.data_dir.clone(),
        delimiter: cli.delimiter as u8,
        ..EngineConfig::default()
    })
}

/// Front-end stages of one query, for `plan` which never executes
struct Compiled {
    tokens: Vec<Token>,
    statement: SelectStatement,
    semantic: SemanticResult,
    plan: QueryPlan,
}

fn compile(engine: &ExecutionEngine, query: &str) -> Result<Compiled> {
    let tokens = tokenize(query);
    let statement = parser::parse(tokens.clone()).context("Syntax analysis failed")?;

    let semantic = engine.analyzer().analyze(&statement);
    let plan = ast_to_ir(&statement);

    Ok(Compiled {
        tokens,
        statement,
        semantic,
        plan,
    })
}

fn run_query(engine: &ExecutionEngine, query: &str, verbose: bool, format: OutputFormat) -> Result<()> {
    let outcome = match engine.execute_query(query) {
        Ok(outcome) => outcome,
        Err(QueryError::Parse(err)) => return Err(err).context("Syntax analysis failed"),
        Err(QueryError::Semantic(semantic)) => {
            print_diagnostics(&semantic, verbose);
            bail!("Semantic analysis failed with {} error(s)", semantic.errors.len());
        }
        Err(err) => return Err(err).context("Failed to execute query"),
    };

    if verbose {
        print_tokens(&outcome.tokens);
        print_statement(&outcome.statement);
    }
    print_diagnostics(&outcome.semantic, verbose);
    if verbose {
        print_plan(&outcome.plan);
    }
    display_result(&outcome.result, format)
}

fn explain_query(engine: &ExecutionEngine, query: &str) -> Result<()> {
    let compiled = compile(engine, query)?;
    print_tokens(&compiled.tokens);
    print_statement(&compiled.statement);
    print_diagnostics(&compiled.semantic, true);
    print_plan(&compiled.plan);
    Ok(())
}

fn print_statement(statement: &SelectStatement) {
    println!("== AST ==");
    println!("{:#?}", statement);
    println!();
}

fn print_plan(plan: &QueryPlan) {
    println!("== Query plan ==");
    println!("{}", plan);
    println!();
}

fn print_tokens(tokens: &[Token]) {
    println!("== Tokens ({}) ==", tokens.len());
    for token in tokens {
        println!("  {}", token);
    }
    println!();
}

fn print_diagnostics(semantic: &SemanticResult, verbose: bool) {
    if verbose {
        println!("== Semantic analysis ==");
        println!("  valid: {}", semantic.valid);
    }
    for error in &semantic.errors {
        eprintln!("Error: {}", error);
    }
    for warning in &semantic.warnings {
        eprintln!("Warning: {}", warning);
    }
    if verbose {
        println!();
    }
}

fn display_result(result: &QueryResultSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", result.to_string_table()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Split a trailing `--verbose`/`-v` flag off a shell line
fn split_verbose_flag(line: &str) -> (&str, bool) {
    for flag in ["--verbose", "-v"] {
        if let Some(query) = line.strip_suffix(flag) {
            if query.is_empty() || query.ends_with(char::is_whitespace) {
                return (query.trim_end(), true);
            }
        }
    }
    (line, false)
}

fn run_shell(engine: &ExecutionEngine) -> Result<()> {
    println!("Welcome to CSVQL. Type 'help' for assistance or 'exit' to quit.");
    println!("Tables are read from {}", engine.config().data_dir.display());

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        match rl.readline("csvql> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.to_lowercase().as_str() {
                    "exit" | "quit" | "q" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => print_help(),
                    "dfa" => println!("{}", lexer_state_table()),
                    "clear" => {
                        print!("\x1B[2J\x1B[1;1H");
                        let _ = io::stdout().flush();
                    }
                    _ => {
                        let (query, verbose) = split_verbose_flag(line);
                        if let Err(err) = run_query(engine, query, verbose, OutputFormat::Table) {
                            println!("Error: {:#}", err);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

/// Lexer states and the input that moves q0 into each of them
const LEXER_TRANSITIONS: [(&str, &str, &str); 4] = [
    ("q1:Ident", "A-Z a-z _", "KEYWORD / IDENTIFIER (continues on A-Z a-z 0-9 _ .)"),
    ("q2:Number", "0-9", "NUMBER (continues on 0-9 .)"),
    ("q3:String", "\" '", "STRING (until the same quote)"),
    ("q4:Operator", "* , = ! < >", "STAR COMMA EQUALS NotEqual LessThan LessEqual GreaterThan GreaterEqual"),
];

fn lexer_state_table() -> String {
    let mut table = String::from("q0:Start skips whitespace and drops any other character\n");
    for (state, input, emits) in LEXER_TRANSITIONS {
        table.push_str(&format!("  q0 --[{}]--> {:<12} => {}\n", input, state, emits));
    }
    table.push_str("  every state returns to q0 once its token is accepted");
    table
}

fn print_help() {
    println!("Query syntax:");
    println!("  SELECT <cols|*> FROM <file.csv> [WHERE <cond>] [LIMIT <n>]");
    println!();
    println!("Conditions:");
    println!("  <col> = 'text'                - Text comparison (also !=, <>)");
    println!("  <col> > 80                    - Numeric comparison (also <, >=, <=)");
    println!("  <cond> AND <cond>             - Both conditions (binds tighter than OR)");
    println!("  <cond> OR <cond>              - Either condition");
    println!();
    println!("Other commands:");
    println!("  <query> --verbose | -v        - Show tokens, AST, diagnostics and plan");
    println!("  dfa                           - Show the lexer's state transitions");
    println!("  clear                         - Clear the screen");
    println!("  help                          - Display this help message");
    println!("  exit | quit | q               - Exit the CLI");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let engine = ExecutionEngine::new(engine_config(&cli)?);

    let outcome = match &cli.command {
        Some(Commands::Query { query, verbose, format }) => run_query(&engine, query, *verbose, *format),
        Some(Commands::Plan { query }) => explain_query(&engine, query),
        // Default to shell if no command is specified
        Some(Commands::Shell) | None => run_shell(&engine),
    };
    outcome.map_err(|err| anyhow!("{:#}", err))
}
