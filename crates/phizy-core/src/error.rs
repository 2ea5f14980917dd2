//! Error taxonomy shared by every phizy-stack operation

use std::path::PathBuf;

pub type Result<T, E = StackError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// The target directory has no `.phizy-stack.json`
    #[error("Not in a valid phizy-stack project directory: {}", .root.display())]
    NotAProject { root: PathBuf },

    #[error("Module \"{name}\" is not supported. Available modules: {}", .available.join(", "))]
    ModuleNotFound { name: String, available: Vec<String> },

    #[error("Module \"{0}\" is already installed in this project")]
    AlreadyInstalled(String),

    #[error("Module \"{0}\" is not installed in this project")]
    NotInstalled(String),

    /// The user declined a confirmation. Not a failure.
    #[error("{0}")]
    Cancelled(String),

    #[error("Failed to {phase} module \"{module}\": {source}")]
    HookExecution {
        module: String,
        phase: HookPhase,
        #[source]
        source: Box<StackError>,
    },

    #[error("{message} ({}): {source}", .path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project manifest {} is corrupt: {source}", .path.display())]
    ConfigCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Directory already exists: {}", .0.display())]
    ProjectExists(PathBuf),

    #[error("Invalid module registry: {0}")]
    InvalidRegistry(String),

    #[error("Command `{command}` failed with exit code {code}{}", format_stderr(.stderr))]
    Command {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Which lifecycle hook an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Initialize,
    Remove,
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookPhase::Initialize => write!(f, "add"),
            HookPhase::Remove => write!(f, "remove"),
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl StackError {
    /// Build a filesystem error with a short description of what was attempted
    pub fn fs(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StackError::FileSystem {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// True when the user declined somewhere along the way, including inside a hook
    pub fn is_cancelled(&self) -> bool {
        match self {
            StackError::Cancelled(_) => true,
            StackError::HookExecution { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }

    /// Wrap a hook failure, letting cancellations through untouched
    pub(crate) fn hook(module: &str, phase: HookPhase, err: StackError) -> Self {
        if matches!(err, StackError::Cancelled(_)) {
            return err;
        }
        StackError::HookExecution {
            module: module.to_string(),
            phase,
            source: Box::new(err),
        }
    }
}
