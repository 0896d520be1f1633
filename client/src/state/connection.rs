//! Socket lifecycle shared by the chat and ingestion channels.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

/// Lifecycle of one websocket connection.
///
/// A socket is created on view mount (`Connecting`), becomes `Open`, and
/// ends as `Closed` (unmount) or `Error` (transport failure or unexpected
/// close). The only way out of `Error` is an explicit reconnect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Closed,
    Connecting,
    Open,
    Error,
}

impl ConnectionStatus {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Short label for the navigation indicator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Connecting => "connecting",
            Self::Open => "online",
            Self::Error => "offline",
        }
    }
}
