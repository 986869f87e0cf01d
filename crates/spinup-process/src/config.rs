//! Launch configuration.

use crate::output::OutputSink;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Binding for the child's standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdinMode {
    /// Connect stdin to the null device.
    #[default]
    Null,
    /// Inherit stdin from the launching process.
    Inherit,
}

/// Describes a process to launch: executable, arguments, working
/// directory, environment overlay, and stream bindings.
///
/// The environment overlay is merged over the inherited environment;
/// explicit entries win. When an output sink is configured the
/// corresponding child stream is piped and every byte is forwarded to
/// the sink; otherwise the stream is inherited.
pub struct LaunchSpec {
    pub(crate) executable: String,
    pub(crate) args: Vec<String>,
    pub(crate) working_dir: Option<PathBuf>,
    pub(crate) env: HashMap<String, String>,
    pub(crate) stdin: StdinMode,
    pub(crate) stdout_sink: Option<OutputSink>,
    pub(crate) stderr_sink: Option<OutputSink>,
}

impl fmt::Debug for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchSpec")
            .field("executable", &self.executable)
            .field("args", &self.args)
            .field("working_dir", &self.working_dir)
            .field("env", &self.env)
            .field("stdin", &self.stdin)
            .field("stdout_sink", &self.stdout_sink.is_some())
            .field("stderr_sink", &self.stderr_sink.is_some())
            .finish()
    }
}

impl LaunchSpec {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
            stdin: StdinMode::default(),
            stdout_sink: None,
            stderr_sink: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add one environment variable to the overlay.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Merge a set of environment variables into the overlay.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn stdin(mut self, mode: StdinMode) -> Self {
        self.stdin = mode;
        self
    }

    /// Forward the child's stdout to the given sink.
    pub fn stdout(mut self, sink: OutputSink) -> Self {
        self.stdout_sink = Some(sink);
        self
    }

    /// Forward the child's stderr to the given sink.
    pub fn stderr(mut self, sink: OutputSink) -> Self {
        self.stderr_sink = Some(sink);
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}
