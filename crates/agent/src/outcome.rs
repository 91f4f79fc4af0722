/// Why a tool call was refused. The conversation surface stays a plain
/// string either way; the tag lets dispatch, logging, and tests branch
/// without matching on message prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefusalKind {
    InvalidArguments,
    UnknownMenuItem,
    NotInOrder,
    EmptyOrder,
    SubmissionFailed,
    UnknownTool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    Spoken(String),
    Refused { kind: RefusalKind, text: String },
}

impl ToolOutcome {
    pub fn spoken(text: impl Into<String>) -> Self {
        Self::Spoken(text.into())
    }

    pub fn refused(kind: RefusalKind, text: impl Into<String>) -> Self {
        Self::Refused { kind, text: text.into() }
    }

    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::Refused { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Spoken(text) | Self::Refused { text, .. } => text,
        }
    }

    /// Collapses to the single conversational string delivered to the
    /// caller and the speech pipeline.
    pub fn render(self) -> String {
        match self {
            Self::Spoken(text) | Self::Refused { text, .. } => text,
        }
    }
}
