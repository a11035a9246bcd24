use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    You,
    Assistant,
    System,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::You => "You",
            Sender::Assistant => "Assistant",
            Sender::System => "System",
        }
    }
}

/// Backend chunk identifier. The backend sends integers today, but the
/// client treats the value as opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkId::Number(n) => write!(f, "{n}"),
            ChunkId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub source: String,
    pub chunk: ChunkId,
}

/// One transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    sender: Sender,
    text: String,
    sources: Vec<SourceRef>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, sources: Vec<SourceRef>) -> Self {
        Self {
            sender,
            text: text.into(),
            sources,
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }
}

/// Append-only list of messages; display order is append order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub(crate) fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// Visual alignment of a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bubble {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationAnchor {
    pub label: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationLine {
    pub anchors: Vec<CitationAnchor>,
}

impl CitationLine {
    pub const PREFIX: &'static str = "Sources: ";

    /// Plain-text form: `Sources: [chunk 1], [chunk 2]`.
    pub fn text(&self) -> String {
        let labels: Vec<&str> = self.anchors.iter().map(|a| a.label.as_str()).collect();
        format!("{}{}", Self::PREFIX, labels.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub sender: Sender,
    pub bubble: Bubble,
    /// Message text split on newlines; each entry renders on its own line.
    pub lines: Vec<String>,
    pub citations: Option<CitationLine>,
}

pub fn render_message(message: &ChatMessage) -> MessageView {
    let bubble = match message.sender() {
        Sender::You => Bubble::User,
        Sender::Assistant | Sender::System => Bubble::Bot,
    };

    let citations = if message.sources().is_empty() {
        None
    } else {
        Some(CitationLine {
            anchors: message
                .sources()
                .iter()
                .map(|source| CitationAnchor {
                    label: format!("[chunk {}]", source.chunk),
                    tooltip: source.source.clone(),
                })
                .collect(),
        })
    };

    MessageView {
        sender: message.sender(),
        bubble,
        lines: message.text().split('\n').map(ToOwned::to_owned).collect(),
        citations,
    }
}
