use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use frames::api::{
    AllSuggestionsRequest, ChunksRequest, ConnectRequest, ContentRequest, DeleteSuggestionRequest, DocumentRequest,
    ResetMode, ResetRequest, SearchDocumentsRequest, SetRagConfigRequest, SuggestionsRequest, VectorsRequest,
};
use frames::{Credentials, Deployment, RagConfig};
use serde_json::Value;

mod chat;
mod import;
mod rest;
mod socket;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use rest::RestClient;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Http { endpoint: String, status: u16, body: String },
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("websocket failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("timed out waiting for websocket frame")]
    Timeout,
    #[error("frame decode failed: {0}")]
    Frame(#[from] frames::FrameError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server returned error for {endpoint}: {message}")]
    Application { endpoint: String, message: String },
    #[error("unknown deployment `{0}`; expected Weaviate, Docker, Local or Custom")]
    InvalidDeployment(String),
    #[error("unknown reset mode `{0}`; expected ALL, DOCUMENTS, CONFIG or SUGGESTIONS")]
    InvalidResetMode(String),
    #[error("{failed} file(s) failed to import")]
    ImportFailed { failed: usize },
}

#[derive(Parser, Debug)]
#[command(name = "verba-cli", about = "Verba REST and websocket CLI")]
struct Cli {
    #[arg(long, env = "VERBA_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "VERBA_DEPLOYMENT", default_value = "Local")]
    deployment: String,

    /// Vector store URL for Weaviate and Custom deployments.
    #[arg(long, env = "VERBA_URL", default_value = "")]
    url: String,

    #[arg(long, env = "VERBA_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Port for Custom deployments.
    #[arg(long, default_value = "")]
    port: String,

    /// Repeat for more log detail on stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Health,
    Connect,
    /// Retrieval only: print matching documents and context.
    Query {
        text: String,
        #[arg(long = "label")]
        labels: Vec<String>,
    },
    /// Retrieval plus the streamed answer.
    Chat { text: String },
    Import(ImportArgs),
    Documents(DocumentsCommand),
    Suggestions(SuggestionsCommand),
    Config(ConfigCommand),
    Labels,
    Meta,
    /// Wipe backend data: ALL, DOCUMENTS, CONFIG or SUGGESTIONS.
    Reset { mode: String },
}

#[derive(Args, Debug)]
struct ImportArgs {
    paths: Vec<PathBuf>,
    #[arg(long = "url")]
    urls: Vec<String>,
    #[arg(long = "label")]
    labels: Vec<String>,
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

#[derive(Args, Debug)]
struct DocumentsCommand {
    #[command(subcommand)]
    command: DocumentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum DocumentsSubcommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long = "label")]
        labels: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 50)]
        page_size: u32,
    },
    Get {
        uuid: String,
    },
    Delete {
        uuid: String,
    },
    Content {
        uuid: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Chunks {
        uuid: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    Vectors {
        uuid: String,
        #[arg(long, default_value_t = false)]
        show_all: bool,
    },
}

#[derive(Args, Debug)]
struct SuggestionsCommand {
    #[command(subcommand)]
    command: SuggestionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SuggestionsSubcommand {
    /// Autocompletion candidates for a partial query.
    Get {
        query: String,
        #[arg(long, default_value_t = 3)]
        limit: u32,
    },
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    Delete {
        uuid: String,
    },
}

#[derive(Args, Debug)]
struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    Rag,
    User,
    Theme,
    /// Replace the pipeline config with the JSON object in `file`.
    SetRag { file: PathBuf },
}

impl Cli {
    fn credentials(&self) -> Result<Credentials, CliError> {
        let deployment =
            Deployment::parse(&self.deployment).ok_or_else(|| CliError::InvalidDeployment(self.deployment.clone()))?;
        Ok(Credentials { deployment, url: self.url.clone(), key: self.api_key.clone(), default_deployment: None })
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).with_target(false).init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let client = RestClient::new(&cli.base_url, cli.credentials()?, cli.port.clone());
    tracing::debug!(base_url = client.base_url(), deployment = client.credentials.deployment.as_str(), "client ready");

    match cli.command {
        Command::Health => print_json(&client.get::<Value>("health").await?),
        Command::Connect => {
            let body = ConnectRequest { credentials: client.credentials.clone(), port: client.port.clone() };
            let response: frames::api::ConnectResponse = client.post_checked("connect", &body).await?;
            print_json(&serde_json::to_value(response)?)
        }
        Command::Query { text, labels } => run_query(&client, text, labels).await,
        Command::Chat { text } => chat::run(&client, text).await,
        Command::Import(args) => {
            let options =
                import::ImportOptions { paths: args.paths, urls: args.urls, labels: args.labels, overwrite: args.overwrite };
            import::run(&client, options).await
        }
        Command::Documents(documents) => run_documents(&client, documents.command).await,
        Command::Suggestions(suggestions) => run_suggestions(&client, suggestions.command).await,
        Command::Config(config) => run_config(&client, config.command).await,
        Command::Labels => print_json(&client.post_value("get_labels", &client.credentials).await?),
        Command::Meta => print_json(&client.post_value("get_meta", &client.credentials).await?),
        Command::Reset { mode } => {
            let reset_mode = ResetMode::parse(&mode).ok_or(CliError::InvalidResetMode(mode))?;
            let body = ResetRequest { reset_mode, credentials: client.credentials.clone() };
            client.post_value("reset", &body).await?;
            println!("reset {}", reset_mode.as_str());
            Ok(())
        }
    }
}

async fn run_query(client: &RestClient, query: String, labels: Vec<String>) -> Result<(), CliError> {
    let connect: frames::api::ConnectResponse = client
        .post_checked("connect", &ConnectRequest { credentials: client.credentials.clone(), port: client.port.clone() })
        .await?;
    let body = frames::api::QueryRequest {
        query,
        rag: connect.rag_config,
        labels,
        document_filter: Vec::new(),
        credentials: client.credentials.clone(),
    };
    let response: frames::api::QueryResponse = client.post_checked("query", &body).await?;
    print_json(&serde_json::to_value(response)?)
}

async fn run_documents(client: &RestClient, command: DocumentsSubcommand) -> Result<(), CliError> {
    let credentials = client.credentials.clone();
    let json = match command {
        DocumentsSubcommand::List { query, labels, page, page_size } => {
            let body = SearchDocumentsRequest { query, labels, page, page_size, credentials };
            client.post_value("get_all_documents", &body).await?
        }
        DocumentsSubcommand::Get { uuid } => {
            client.post_value("get_document", &DocumentRequest { uuid, credentials }).await?
        }
        DocumentsSubcommand::Delete { uuid } => {
            tracing::info!(%uuid, "deleting document");
            client.post_value("delete_document", &DocumentRequest { uuid, credentials }).await?
        }
        DocumentsSubcommand::Content { uuid, page } => {
            let body = ContentRequest { uuid, page, chunk_scores: Vec::new(), credentials };
            client.post_value("get_content", &body).await?
        }
        DocumentsSubcommand::Chunks { uuid, page, page_size } => {
            client.post_value("get_chunks", &ChunksRequest { uuid, page, page_size, credentials }).await?
        }
        DocumentsSubcommand::Vectors { uuid, show_all } => {
            client.post_value("get_vectors", &VectorsRequest { uuid, show_all, credentials }).await?
        }
    };
    print_json(&json)
}

async fn run_suggestions(client: &RestClient, command: SuggestionsSubcommand) -> Result<(), CliError> {
    let credentials = client.credentials.clone();
    let json = match command {
        SuggestionsSubcommand::Get { query, limit } => {
            client.post_value("get_suggestions", &SuggestionsRequest { query, limit, credentials }).await?
        }
        SuggestionsSubcommand::List { page, page_size } => {
            client.post_value("get_all_suggestions", &AllSuggestionsRequest { page, page_size, credentials }).await?
        }
        SuggestionsSubcommand::Delete { uuid } => {
            client.post_value("delete_suggestion", &DeleteSuggestionRequest { uuid, credentials }).await?
        }
    };
    print_json(&json)
}

async fn run_config(client: &RestClient, command: ConfigSubcommand) -> Result<(), CliError> {
    let json = match command {
        ConfigSubcommand::Rag => client.post_value("get_rag_config", &client.credentials).await?,
        ConfigSubcommand::User => client.post_value("get_user_config", &client.credentials).await?,
        ConfigSubcommand::Theme => client.post_value("get_theme_config", &client.credentials).await?,
        ConfigSubcommand::SetRag { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let rag_config: RagConfig = serde_json::from_str(&text)?;
            let body = SetRagConfigRequest { rag_config, credentials: client.credentials.clone() };
            let response: frames::api::StatusResponse = client.post_checked("set_rag_config", &body).await?;
            serde_json::to_value(response)?
        }
    };
    print_json(&json)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
