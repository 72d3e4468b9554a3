use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal error: {}", .0)]
    Terminal(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Invalid name: command names, aliases and argument tags may not be empty")]
    EmptyName,

    #[error("Invalid name `{}`: names may not contain whitespace", .0)]
    NameWithWhitespace(String),

    #[error("Found a non-unique argument tag on command {}: `{}`", .0, .1)]
    NonUniqueArgumentTag(String, String),

    #[error("Argument `{}` has value `{}`, which is not a valid {}", .tag, .value, .expected)]
    InvalidArgumentValue {
        tag: String,
        value: String,
        expected: &'static str,
    },
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn invalid_argument_value(tag: &str, value: &str, expected: &'static str) -> Self {
        Self::InvalidArgumentValue {
            tag: tag.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}
