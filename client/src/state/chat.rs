//! Chat conversation state.
//!
//! SYSTEM CONTEXT
//! ==============
//! A query runs in two phases: a REST retrieval (`/api/query`) that yields
//! scored documents and a context string, then a generation request on the
//! chat socket that streams the answer. This state owns the permanent message
//! list plus the in-flight stream accumulator; the chat socket handler and the
//! chat page only call the transition methods below.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use frames::api::{DocumentScore, QueryResponse, Suggestion};
use frames::{ApiResponse, ChatFrame, ChatStream, ConversationItem, GeneratePayload, RagConfig, Theme};

use super::connection::ConnectionStatus;

/// Who produced a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    User,
    System,
    Error,
    /// Retrieved documents shown above the answer they ground.
    Retrieval,
}

impl MessageKind {
    /// Conversation role sent back to the generator, if this kind is part of
    /// the dialogue.
    #[must_use]
    pub fn conversation_role(self) -> Option<&'static str> {
        match self {
            Self::User => Some("user"),
            Self::System => Some("system"),
            Self::Error | Self::Retrieval => None,
        }
    }
}

/// One permanent entry in the message list.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub content: String,
    pub cached: bool,
    pub distance: Option<f64>,
    pub reasoning: Option<String>,
    pub documents: Vec<DocumentScore>,
    pub context: String,
}

impl Message {
    fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            cached: false,
            distance: None,
            reasoning: None,
            documents: Vec::new(),
            context: String::new(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageKind::System, content)
    }

    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, content)
    }

    #[must_use]
    pub fn retrieval(documents: Vec<DocumentScore>, context: String) -> Self {
        Self { documents, context, ..Self::new(MessageKind::Retrieval, "") }
    }
}

/// Pending-request indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStage {
    #[default]
    Idle,
    /// Waiting on `/api/query`.
    Retrieving,
    /// Waiting on streamed tokens.
    Generating,
}

#[derive(Clone, Debug, PartialEq)]
struct PendingQuery {
    query: String,
    conversation: Vec<ConversationItem>,
}

/// State for the chat view.
#[derive(Clone, Debug)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub stream: ChatStream,
    pub stage: FetchStage,
    pub connection: ConnectionStatus,
    /// Set on socket error or unexpected close; cleared by reconnect.
    pub offline: bool,
    /// Bumped to remount the chat socket.
    pub reconnect_seq: u64,
    pub user_input: String,
    pub suggestions: Vec<Suggestion>,
    pub show_reasoning: bool,
    pending: Option<PendingQuery>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

impl ChatState {
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        Self {
            messages: vec![Message::system(theme.intro_text())],
            stream: ChatStream::new(),
            stage: FetchStage::Idle,
            connection: ConnectionStatus::Closed,
            offline: false,
            reconnect_seq: 0,
            user_input: String::new(),
            suggestions: Vec::new(),
            show_reasoning: false,
            pending: None,
        }
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.stage != FetchStage::Idle
    }

    /// Reset to a fresh conversation: exactly one system message carrying the
    /// theme's intro text.
    pub fn clear(&mut self, theme: &Theme) {
        self.messages = vec![Message::system(theme.intro_text())];
        self.stream.discard();
        self.stage = FetchStage::Idle;
        self.pending = None;
        self.suggestions.clear();
    }

    /// Start a query. Returns the trimmed query text to send to retrieval, or
    /// `None` if the text is blank, a query is already running, or the socket
    /// is offline.
    pub fn begin_query(&mut self, text: &str) -> Option<String> {
        let query = text.trim();
        if query.is_empty() || self.is_fetching() || self.offline {
            return None;
        }
        let conversation = self.conversation();
        self.messages.push(Message::user(query));
        self.pending = Some(PendingQuery { query: query.to_owned(), conversation });
        self.stage = FetchStage::Retrieving;
        self.user_input.clear();
        self.suggestions.clear();
        Some(query.to_owned())
    }

    /// Record the retrieval result. On success returns the generate request to
    /// write to the chat socket; an application error ends the query instead.
    pub fn apply_retrieval(&mut self, response: QueryResponse, rag_config: &RagConfig) -> Option<GeneratePayload> {
        let pending = self.pending.take()?;
        if let Some(err) = response.error_message() {
            self.fail_query(err);
            return None;
        }
        let QueryResponse { documents, context, .. } = response;
        self.messages.push(Message::retrieval(documents, context.clone()));
        self.stage = FetchStage::Generating;
        Some(GeneratePayload {
            query: pending.query,
            context,
            conversation: pending.conversation,
            rag_config: rag_config.clone(),
        })
    }

    /// End the running query with an error message.
    pub fn fail_query(&mut self, err: &str) {
        self.messages.push(Message::error(err));
        self.stage = FetchStage::Idle;
        self.pending = None;
    }

    /// Feed one inbound chat frame. Returns `true` when a terminal frame
    /// appended the completed answer.
    pub fn apply_frame(&mut self, frame: ChatFrame) -> bool {
        let Some(answer) = self.stream.apply(frame) else {
            return false;
        };
        self.messages.push(Message {
            cached: answer.cached,
            distance: answer.distance,
            reasoning: answer.reasoning,
            ..Message::system(answer.text)
        });
        self.stage = FetchStage::Idle;
        true
    }

    pub fn on_socket_connecting(&mut self) {
        self.connection = ConnectionStatus::Connecting;
    }

    pub fn on_socket_open(&mut self) {
        self.connection = ConnectionStatus::Open;
        self.offline = false;
    }

    /// Socket error or unexpected close: go offline, stop the pending-request
    /// indicator and drop partially streamed text.
    pub fn on_socket_lost(&mut self) {
        self.connection = ConnectionStatus::Error;
        self.offline = true;
        self.stage = FetchStage::Idle;
        self.pending = None;
        self.stream.discard();
    }

    /// The view released its socket. An answer still streaming on it is
    /// abandoned so the next socket starts idle.
    pub fn on_socket_closed(&mut self) {
        self.connection = ConnectionStatus::Closed;
        self.stage = FetchStage::Idle;
        self.pending = None;
        self.stream.discard();
    }

    pub fn request_reconnect(&mut self) {
        self.reconnect_seq += 1;
        self.offline = false;
        self.connection = ConnectionStatus::Connecting;
    }

    /// Prior dialogue turns in order, excluding errors and retrieval blocks.
    #[must_use]
    pub fn conversation(&self) -> Vec<ConversationItem> {
        self.messages
            .iter()
            .filter_map(|m| {
                m.kind.conversation_role().map(|role| ConversationItem {
                    kind: role.to_owned(),
                    content: m.content.clone(),
                })
            })
            .collect()
    }
}
