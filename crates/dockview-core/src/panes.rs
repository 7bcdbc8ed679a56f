//! Content of the details and logs panes

/// Details pane text when the list is empty
pub const NO_CONTAINERS: &str = "No containers found.";

/// Logs pane text when the daemon returned nothing
pub const NO_LOGS: &str = "(no logs)";

/// A labelled line in the details pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailField {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// What the details pane shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPane {
    #[default]
    Empty,
    /// Informational text, e.g. [`NO_CONTAINERS`]
    Message(String),
    Fields(Vec<DetailField>),
    /// Inspect failure, rendered in red
    Error(String),
}

impl DetailPane {
    /// Value of the field with the given label, if shown
    pub fn field(&self, label: &str) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields
                .iter()
                .find(|f| f.label == label)
                .map(|f| f.value.as_str()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Unstyled text of the pane
    pub fn plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Message(msg) | Self::Error(msg) => msg.clone(),
            Self::Fields(fields) => fields
                .iter()
                .map(|f| format!("{}: {}", f.label, f.value))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// What the logs pane shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogPane {
    #[default]
    Empty,
    Text(String),
    /// Log fetch failure, rendered in red
    Error(String),
}

impl LogPane {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) | Self::Error(text) => text.clone(),
        }
    }
}
