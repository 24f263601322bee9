//! Host boundary for the execution phase: where inputs come from and where
//! the single outcome goes.

use crate::error::{RankError, Result};
use crate::execution::{ExecutionPhase, FeedFetcher, Outcome};
use std::io::{Read, Write};

pub trait ExecutionHost {
    fn inputs(&mut self) -> Result<Vec<u8>>;

    /// Terminal. Returns the exit code the process should end with.
    fn report(&mut self, outcome: &Outcome) -> Result<u8>;
}

/// Host backed by the current process: inputs from an argument or stdin,
/// outcome on the given writer (stdout in the binary).
pub struct ProcessHost<R, W> {
    explicit_input: Option<Vec<u8>>,
    stdin: R,
    out: W,
}

impl<R: Read, W: Write> ProcessHost<R, W> {
    pub fn new(explicit_input: Option<Vec<u8>>, stdin: R, out: W) -> Self {
        Self {
            explicit_input,
            stdin,
            out,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<R: Read, W: Write> ExecutionHost for ProcessHost<R, W> {
    fn inputs(&mut self) -> Result<Vec<u8>> {
        if let Some(input) = self.explicit_input.take() {
            return Ok(input);
        }
        let mut buf = Vec::new();
        self.stdin
            .read_to_end(&mut buf)
            .map_err(|e| RankError::internal(format!("Failed to read inputs: {}", e)))?;
        Ok(buf)
    }

    fn report(&mut self, outcome: &Outcome) -> Result<u8> {
        let line = match outcome {
            Outcome::Success(bytes) => hex::encode(bytes),
            Outcome::Error(bytes) => single_line(&String::from_utf8_lossy(bytes)),
        };
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| RankError::internal(format!("Failed to report outcome: {}", e)))?;
        Ok(outcome.exit_code())
    }
}

// Error text may echo feed content; control characters are escaped so the
// outcome always occupies one line.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Drives one invocation end to end and reports exactly one outcome.
pub async fn run_once<H, F>(host: &mut H, phase: &ExecutionPhase<F>) -> Result<u8>
where
    H: ExecutionHost,
    F: FeedFetcher,
{
    let outcome = match host.inputs() {
        Ok(input) => phase.execute(&input).await,
        Err(err) => {
            tracing::error!("{}", err);
            Outcome::error_message(err.outcome_message())
        }
    };
    host.report(&outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::encode_u128;

    #[test]
    fn explicit_input_wins_over_stdin() {
        let mut host =
            ProcessHost::new(Some(b"BTC-USDT".to_vec()), &b"ignored"[..], Vec::new());
        assert_eq!(host.inputs().unwrap(), b"BTC-USDT");
    }

    #[test]
    fn reads_stdin_without_explicit_input() {
        let mut host = ProcessHost::new(None, &b"2"[..], Vec::new());
        assert_eq!(host.inputs().unwrap(), b"2");
    }

    #[test]
    fn success_is_written_as_hex() {
        let mut host = ProcessHost::new(None, &b""[..], Vec::new());
        let code = host.report(&Outcome::Success(encode_u128(255))).unwrap();
        assert_eq!(code, 0);
        let written = String::from_utf8(host.into_writer()).unwrap();
        assert_eq!(written, "ff000000000000000000000000000000\n");
    }

    #[test]
    fn error_is_written_as_text() {
        let mut host = ProcessHost::new(None, &b""[..], Vec::new());
        let code = host
            .report(&Outcome::error_message("Error while fetching price feed"))
            .unwrap();
        assert_eq!(code, 1);
        let written = String::from_utf8(host.into_writer()).unwrap();
        assert_eq!(written, "Error while fetching price feed\n");
    }

    #[test]
    fn error_text_with_newlines_stays_on_one_line() {
        let mut host = ProcessHost::new(None, &b""[..], Vec::new());
        host.report(&Outcome::error_message("Error while converting price data: 1\r\n2"))
            .unwrap();
        let written = String::from_utf8(host.into_writer()).unwrap();
        assert_eq!(written, "Error while converting price data: 1\\r\\n2\n");
    }

    struct BrokenStdin;

    impl Read for BrokenStdin {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn unreadable_inputs_still_report_once() {
        let phase =
            ExecutionPhase::from_config(crate::config::FeedConfig::new("http://127.0.0.1:1"))
                .unwrap();
        let mut host = ProcessHost::new(None, BrokenStdin, Vec::new());
        let code = tokio_test::block_on(run_once(&mut host, &phase)).unwrap();
        assert_eq!(code, 1);
        let written = String::from_utf8(host.into_writer()).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.starts_with("Internal error: Failed to read inputs"));
    }
}
