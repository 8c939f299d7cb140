use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use crate::command::{OperationResult, Payload};

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Failure = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

/// Name used to prefix error lines, taken from argv[0].
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg| {
            Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Write `result` for the user and decide the exit status.
///
/// Successful output goes to `out`; failures are a single
/// `<program>: error: <message>` line on `err`.
pub fn report<O: Write, E: Write>(
    program: &str,
    result: OperationResult,
    out: &mut O,
    err: &mut E,
) -> ExitStatus {
    match result {
        OperationResult::Success(payload) => match write_payload(payload, out) {
            Ok(()) => ExitStatus::Success,
            Err(e) => {
                // Nothing left to report to if stderr is gone too.
                let _ = writeln!(err, "{}: error: could not write output: {}", program, e);
                ExitStatus::Failure
            }
        },
        OperationResult::Failure(e) => {
            // Ignore stderr write failures; the exit status still carries the error.
            let _ = writeln!(err, "{}: error: {}", program, e);
            ExitStatus::Failure
        }
    }
}

/// [`report`] to the process's stdout and stderr.
pub fn report_to_stdio(program: &str, result: OperationResult) -> ExitStatus {
    let stdout = io::stdout();
    let stderr = io::stderr();
    report(program, result, &mut stdout.lock(), &mut stderr.lock())
}

fn write_payload<O: Write>(payload: Payload, out: &mut O) -> io::Result<()> {
    match payload {
        Payload::Zones(names) => {
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        Payload::Response(value) => {
            writeln!(out, "result \"{}\"", value)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Field, ValidationError, ZoneNames};
    use crate::dns::{Zone, ZoneProperties};
    use crate::error::Error;
    use serde_json::json;

    fn zone(name: &str) -> Zone {
        Zone {
            properties: ZoneProperties {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_success_response_line() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = OperationResult::Success(Payload::Response(json!({"message": "Successful"})));

        let status = report("zonectl", result, &mut out, &mut err);

        assert_eq!(status, ExitStatus::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "result \"{\"message\":\"Successful\"}\"\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_zone_names_one_per_line() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let names = ZoneNames::new(vec![zone("b.example."), zone("a.example.")]);

        let result = OperationResult::Success(Payload::Zones(names));

        let status = report("zonectl", result, &mut out, &mut err);

        assert_eq!(status, ExitStatus::Success);
        assert_eq!(String::from_utf8(out).unwrap(), "b.example\na.example\n");
    }

    #[test]
    fn test_failure_goes_to_stderr() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = OperationResult::Failure(Error::Validation(ValidationError::MissingArgument(
            Field::Zone,
        )));

        let status = report("zonectl", result, &mut out, &mut err);

        assert_eq!(status, ExitStatus::Failure);
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "zonectl: error: please specify zone to run query against (-z/--zone)\n"
        );
    }

    #[test]
    fn test_exit_status_codes() {
        assert_eq!(ExitStatus::Success as u8, 0);
        assert_eq!(ExitStatus::Failure as u8, 1);
    }
}
