use crate::cli::ProbeArgs;
use nextping_model::{RunConfig, DEFAULT_TCP_PORT};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

pub const PROBES_PROMPT: &str = "Enter the number of probes to send: ";
pub const MAX_HOPS_PROMPT: &str = "Enter the maximum number of hops (TTL): ";
pub const TIMEOUT_PROMPT: &str = "Enter the timeout in milliseconds: ";

/// Asks for one number. Unreadable or non-numeric answers become 0.
pub fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<i64> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if let Err(err) = input.read_line(&mut line) {
        debug!(error = %err, "failed to read answer");
        return Ok(0);
    }

    Ok(line.trim().parse().unwrap_or(0))
}

/// Builds the run configuration, prompting for each value the command line
/// left out. Negative answers are treated as zero.
pub fn acquire_config<R: BufRead, W: Write>(
    target: &str,
    args: &ProbeArgs,
    input: &mut R,
    output: &mut W,
) -> io::Result<RunConfig> {
    let mut value = |given: Option<i64>, label: &str| match given {
        Some(value) => Ok(value),
        None => prompt_number(input, output, label),
    };

    let probes = value(args.probes, PROBES_PROMPT)?;
    let max_hops = value(args.max_hops, MAX_HOPS_PROMPT)?;
    let timeout_ms = value(args.timeout_ms, TIMEOUT_PROMPT)?;

    Ok(RunConfig::new(
        target,
        usize::try_from(probes).unwrap_or(0),
        u32::try_from(max_hops).unwrap_or(0),
        u64::try_from(timeout_ms).unwrap_or(0),
    ))
}

pub fn parse_port(raw: Option<&str>) -> u16 {
    let Some(raw) = raw else {
        return DEFAULT_TCP_PORT;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        warn!(port = raw, "invalid port, using {DEFAULT_TCP_PORT}");
        DEFAULT_TCP_PORT
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompts_in_order() {
        let mut input = Cursor::new("3\n5\n200\n");
        let mut output = Vec::new();

        let config =
            acquire_config("example.com", &ProbeArgs::default(), &mut input, &mut output).unwrap();

        assert_eq!(config, RunConfig::new("example.com", 3, 5, 200));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("{PROBES_PROMPT}{MAX_HOPS_PROMPT}{TIMEOUT_PROMPT}")
        );
    }

    #[test]
    fn garbage_and_missing_answers_become_zero() {
        let mut input = Cursor::new("three\n  7  \n");
        let mut output = Vec::new();

        let config =
            acquire_config("example.com", &ProbeArgs::default(), &mut input, &mut output).unwrap();

        assert_eq!(config.probes, 0);
        assert_eq!(config.max_hops, 7);
        assert_eq!(config.timeout_ms, 0);
    }

    #[test]
    fn negative_answers_clamp_to_zero() {
        let mut input = Cursor::new("-4\n-1\n-200\n");
        let mut output = Vec::new();

        let config =
            acquire_config("example.com", &ProbeArgs::default(), &mut input, &mut output).unwrap();

        assert_eq!((config.probes, config.max_hops, config.timeout_ms), (0, 0, 0));
    }

    #[test]
    fn flags_skip_their_prompts() {
        let args = ProbeArgs {
            probes: Some(2),
            max_hops: None,
            timeout_ms: Some(500),
        };
        let mut input = Cursor::new("9\n");
        let mut output = Vec::new();

        let config = acquire_config("example.com", &args, &mut input, &mut output).unwrap();

        assert_eq!(config, RunConfig::new("example.com", 2, 9, 500));
        assert_eq!(String::from_utf8(output).unwrap(), MAX_HOPS_PROMPT);
    }

    #[test]
    fn port_parsing_falls_back() {
        assert_eq!(parse_port(None), 80);
        assert_eq!(parse_port(Some("443")), 443);
        assert_eq!(parse_port(Some("http")), 80);
        assert_eq!(parse_port(Some("70000")), 80);
    }
}
