//! User supplied `--jq` map stage, evaluated by an external `jq` binary

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use serde_json::Value;

use crate::error::{QueryTagsError, Result};

/// A transformation applied to each surviving record of a page
pub trait MapStage {
    /// Map every value; the result may have a different length when the
    /// expression yields zero or several outputs per input.
    fn map(&self, values: Vec<Value>) -> Result<Vec<Value>>;
}

/// Evaluates `map(<expression>)` with `jq -c`
#[derive(Debug, Clone)]
pub struct JqCommand {
    program: String,
    expression: String,
}

impl JqCommand {
    pub fn new(program: impl Into<String>, expression: impl Into<String>) -> Self {
        JqCommand {
            program: program.into(),
            expression: expression.into(),
        }
    }

    pub fn program_text(&self) -> String {
        format!("map({})", self.expression)
    }
}

impl MapStage for JqCommand {
    fn map(&self, values: Vec<Value>) -> Result<Vec<Value>> {
        let input = serde_json::to_vec(&values)?;

        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg(self.program_text())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| QueryTagsError::jq(format!("failed to run {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // jq exits early on a bad expression; its exit status says why
            if let Err(e) = stdin.write_all(&input) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(QueryTagsError::jq(format!(
                "{} exited with code {}",
                self.program,
                output.status.code().unwrap_or(-1)
            )));
        }

        match serde_json::from_slice(&output.stdout)? {
            Value::Array(mapped) => Ok(mapped),
            other => Err(QueryTagsError::jq(format!(
                "expected an array from jq, got {}",
                other
            ))),
        }
    }
}
