//! Command-line arguments of the `gl-smoke` binary

use gl_smoke::{ShaderCase, SuiteOptions};

use crate::{CliError, ContextConfig};

pub const USAGE: &str = "\
Usage: gl-smoke [OPTIONS]

Options:
  --width <PIXELS>     Window width (default 800)
  --height <PIXELS>    Window height (default 600)
  --visible            Show the window instead of keeping it hidden
  --gl <MAJOR.MINOR>   Context version to request (default 4.1)
  --extended           Also compile the fragment shader cases
  --log <FILTER>       tracing filter, overrides RUST_LOG
  -h, --help           Print this help";

/// Options for one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub context: ContextConfig,
    pub extended: bool,
    pub log_filter: Option<String>,
}

impl RunOptions {
    /// Suite expectations matching the requested context
    pub fn suite_options(&self) -> SuiteOptions {
        let cases = if self.extended {
            ShaderCase::extended()
        } else {
            ShaderCase::stock()
        };
        let (major, minor) = self.context.version;
        // No driver reports a major version past i32::MAX, so clamping keeps the check failing
        let expected_major = i32::try_from(major).unwrap_or(i32::MAX);
        SuiteOptions::default()
            .with_expected_major(expected_major)
            .with_requested_version(major, minor)
            .with_shader_cases(cases)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
}

/// Parse arguments, excluding the program name
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--visible" => options.context.visible = true,
            "--extended" => options.extended = true,
            "--width" => options.context.width = parse_dimension("--width", args.next())?,
            "--height" => options.context.height = parse_dimension("--height", args.next())?,
            "--gl" => {
                let value = args.next().ok_or(CliError::MissingValue("--gl"))?;
                options.context.version = parse_version(&value).ok_or(CliError::InvalidValue {
                    flag: "--gl",
                    value,
                })?;
            }
            "--log" => {
                options.log_filter = Some(args.next().ok_or(CliError::MissingValue("--log"))?);
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(Command::Run(options))
}

fn parse_dimension(flag: &'static str, value: Option<String>) -> Result<u32, CliError> {
    let value = value.ok_or(CliError::MissingValue(flag))?;
    match value.parse::<u32>() {
        Ok(pixels) if pixels > 0 => Ok(pixels),
        _ => Err(CliError::InvalidValue { flag, value }),
    }
}

/// `MAJOR.MINOR`, with the major version in range of `GL_MAJOR_VERSION`'s `GLint`
fn parse_version(value: &str) -> Option<(u32, u32)> {
    let (major, minor) = value.split_once('.')?;
    let major = u32::try_from(major.parse::<i32>().ok()?).ok()?;
    Some((major, minor.parse().ok()?))
}
