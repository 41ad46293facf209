//! Command-line mode selection.

use std::path::PathBuf;

use crate::error::DemoError;
use crate::scenarios::Scenario;

/// Usage text printed for `help` and argument errors.
pub const USAGE: &str = "\
usage: reconcile-demo <mode>

modes:
  scenario <name>   feed a preset arrival sequence
  stream            feed the shuffled random stream, one event per delay
  replay <path|->   feed JSON-lines events from a file or stdin
  list              list preset scenario names";

/// Where replayed events are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input.
    Stdin,
    /// A JSON-lines file.
    File(PathBuf),
}

/// What the demo should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Feed one preset.
    Scenario(Scenario),
    /// Feed the shuffled stream with delays.
    Stream,
    /// Feed events read from JSON lines.
    Replay(Source),
    /// Print the preset names.
    List,
}

impl Mode {
    /// Parse the arguments that follow the program name.
    ///
    /// No arguments at all means [`Mode::List`].
    pub fn parse<I, S>(args: I) -> Result<Self, DemoError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mode = match args.next().as_deref() {
            None | Some("list") => Self::List,
            Some("stream") => Self::Stream,
            Some("scenario") => {
                let name = args.next().ok_or_else(|| usage("scenario needs a name"))?;
                Self::Scenario(Scenario::from_name(&name)?)
            }
            Some("replay") => match args.next().as_deref() {
                None => return Err(usage("replay needs a path or -")),
                Some("-") => Self::Replay(Source::Stdin),
                Some(path) => Self::Replay(Source::File(PathBuf::from(path))),
            },
            Some(other) => return Err(usage(&format!("unknown mode {other:?}"))),
        };

        if let Some(extra) = args.next() {
            return Err(usage(&format!("unexpected argument {extra:?}")));
        }
        Ok(mode)
    }
}

fn usage(message: &str) -> DemoError {
    DemoError::Usage {
        message: format!("{message}\n\n{USAGE}"),
    }
}
