use std::path::PathBuf;

/// Where the markdown bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

const INPUT_PREFIX: &str = "input=";

/// Parses the arguments after the program name.
///
/// Accepts `input=<path>`, a bare `<path>`, `-` for stdin, or nothing (stdin).
pub fn parse_args(args: &[String]) -> Result<InputSource, String> {
    match args {
        [] => Ok(InputSource::Stdin),
        [arg] if arg == "-" => Ok(InputSource::Stdin),
        [arg] => match arg.strip_prefix(INPUT_PREFIX) {
            Some("") => Err(format!("'{INPUT_PREFIX}' needs a path")),
            Some(path) => Ok(InputSource::File(PathBuf::from(path))),
            None => Ok(InputSource::File(PathBuf::from(arg))),
        },
        _ => Err("expected at most one input".to_string()),
    }
}

pub fn usage(program: &str) -> String {
    format!("Usage: {program} [input=<markdown-file> | <markdown-file> | -]")
}
