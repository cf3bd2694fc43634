use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    NotFound,
    Permission,
    Parse,
    Io,
}

// Every failure in this tool is worded at the point it is raised, so the
// message is part of construction rather than an optional attachment.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    rule: Option<String>,
    path: Option<PathBuf>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            rule: None,
            path: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(rule) = &self.rule {
            write!(f, " [rule {rule}]")?;
        }
        if let Some(path) = &self.path {
            write!(f, " [path {}]", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Permission => 4,
        ErrorKind::Parse => 5,
        ErrorKind::Io => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};

    #[test]
    fn exit_code_table_is_stable() {
        let table = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::NotFound, 3),
            (ErrorKind::Permission, 4),
            (ErrorKind::Parse, 5),
            (ErrorKind::Io, 6),
        ];

        for (kind, code) in table {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_leads_with_message_and_appends_context() {
        let err = Error::new(ErrorKind::Parse, "match data is not valid JSON")
            .with_rule("rule_one")
            .with_path("report.json");
        assert_eq!(
            err.to_string(),
            "match data is not valid JSON [rule rule_one] [path report.json]"
        );
    }

    #[test]
    fn source_chain_is_preserved() {
        let inner = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::new(ErrorKind::Parse, "match data is not valid JSON").with_source(inner);
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("line 1"));
    }
}
