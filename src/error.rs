use std::{fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    MissingAnchor(&'static str),
    Render(handlebars::RenderError),
    Script { line: usize, reason: String },
    Template(handlebars::TemplateError),
    Toml(toml::de::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingAnchor(name) => write!(f, "page has no {} element", name),
            Error::Script { line, reason } => write!(f, "script line {}: {}", line, reason),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
