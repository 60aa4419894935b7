use clap::{Command, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "babelfish")]
#[command(about = "Translate text, .txt, .resx and .xlsx files with Google Translate")]
#[command(override_usage = "babelfish [options...] <text>")]
#[command(version)]
pub struct Args {
    /// Language to translate from (code or English name, detected when omitted)
    #[arg(short = 'f', long = "from", value_name = "LANG")]
    pub from: Option<String>,

    /// Language to translate to (defaults to the current locale)
    #[arg(short = 't', long = "to", value_name = "LANG")]
    pub to: Option<String>,

    /// File to translate (.txt, .resx or .xlsx)
    #[arg(short = 's', long = "source", value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// File to write the translation to (prints to stdout when omitted)
    #[arg(short = 'd', long = "destination", value_name = "PATH")]
    pub destination: Option<PathBuf>,

    /// Number of lines to translate (ignored unless positive)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub take: Option<i64>,

    /// Google Translate API key
    #[arg(long = "apikey", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Do not show progress or status messages
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Text to translate when no source file is given
    pub text: Vec<String>,
}

/// How a token relates to the options of the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionToken {
    /// A switch such as `-q` or `--help`.
    Flag,
    /// An option whose value is the next token, such as `-t ru`.
    Separate,
    /// An option with its value attached, such as `--to=ru` or `-tru`.
    Attached,
}

impl Args {
    /// Parses `args` like [`Parser::try_parse_from`], except that tokens which
    /// are not options of this command become part of the inline text, even
    /// when they start with a hyphen (`-5 degrees`, `Hello --world`).
    pub fn try_parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut command = Self::command();
        command.build();

        let mut args = args.into_iter().map(Into::into);
        let mut known: Vec<OsString> = args.next().into_iter().collect();
        let mut text = Vec::new();

        while let Some(arg) = args.next() {
            match arg.to_str().and_then(|token| classify(&command, token)) {
                Some(OptionToken::Flag | OptionToken::Attached) => known.push(arg),
                Some(OptionToken::Separate) => {
                    known.push(arg);
                    known.extend(args.next());
                }
                None => text.push(arg),
            }
        }

        if !text.is_empty() {
            known.push("--".into());
            known.extend(text);
        }

        Self::try_parse_from(known)
    }

    /// The positional words joined with single spaces.
    pub fn inline_text(&self) -> String {
        self.text.join(" ")
    }
}

fn classify(command: &Command, token: &str) -> Option<OptionToken> {
    let (arg, attached) = if let Some(long) = token.strip_prefix("--") {
        let (name, attached) = long.split_once('=').map_or((long, false), |(n, _)| (n, true));
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(name))?;
        (arg, attached)
    } else {
        let mut chars = token.strip_prefix('-')?.chars();
        let short = chars.next()?;
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_short() == Some(short))?;
        (arg, chars.next().is_some())
    };

    match (arg.get_action().takes_values(), attached) {
        (false, false) => Some(OptionToken::Flag),
        (false, true) => None,
        (true, false) => Some(OptionToken::Separate),
        (true, true) => Some(OptionToken::Attached),
    }
}
