//! # Script interpreter module
//!
//! Interpreter for timed command scripts. Each command in a script is a
//! timestamp (seconds since the start of the script), a colon, a JSON payload
//! and a terminating semicolon:
//!
//! ```text
//! 0.0: {"cmd": "stand"};
//! 2.5: {"cmd": "forward"};
//! ```
//!
//! The payload is deserialised into the command type chosen by the user.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Matches one `<time>: <payload>;` entry per line.
const CMD_PATTERN: &str = r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug)]
struct Command<C> {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    cmd: C,
}

/// A script interpreter.
///
/// After loading a script use `.get_pending` to acquire the commands that
/// need executing.
#[derive(Debug)]
pub struct ScriptInterpreter<C> {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command<C>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid command at {0} s: {1}")]
    InvalidCmd(f64, serde_json::Error),

    #[error("Command timestamps must not decrease ({0} s follows {1} s)")]
    OutOfOrder(f64, f64),

    #[error("Could not build the script pattern: {0}")]
    Pattern(regex::Error),
}

#[derive(Debug, PartialEq)]
pub enum PendingCmds<C> {
    None,
    Some(Vec<C>),
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: DeserializeOwned> ScriptInterpreter<C> {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut interp = Self::parse(&script)?;
        interp.script_path = Some(path);

        Ok(interp)
    }

    /// Create a new interpreter from the text of a script.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut cmds: VecDeque<Command<C>> = VecDeque::new();

        let re = RegexBuilder::new(CMD_PATTERN)
            .multi_line(true)
            .build()
            .map_err(ScriptError::Pattern)?;

        for cap in re.captures_iter(script) {
            let time_str = cap.get(1).map_or("", |m| m.as_str());
            let payload = cap.get(3).map_or("", |m| m.as_str());

            // Parse the exec time
            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            if let Some(last) = cmds.back() {
                if exec_time_s < last.exec_time_s {
                    return Err(ScriptError::OutOfOrder(exec_time_s, last.exec_time_s));
                }
            }

            // Parse the command from the payload. The scripts contain JSON only.
            let cmd = serde_json::from_str(payload.trim())
                .map_err(|e| ScriptError::InvalidCmd(exec_time_s, e))?;

            cmds.push_back(Command { exec_time_s, cmd });
        }

        if cmds.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds,
        })
    }
}

impl<C> ScriptInterpreter<C> {

    /// Return the commands due at `current_time_s`, in script order.
    pub fn get_pending(&mut self, current_time_s: f64) -> PendingCmds<C> {

        // If the queue is empty the script is over
        if self.cmds.is_empty() {
            return PendingCmds::EndOfScript
        }

        let mut due = vec![];

        // Pop commands off the queue until the head's exec time is in the
        // future
        while let Some(head) = self.cmds.front() {
            if head.exec_time_s > current_time_s {
                break;
            }
            if let Some(c) = self.cmds.pop_front() {
                due.push(c.cmd);
            }
        }

        if due.is_empty() {
            PendingCmds::None
        }
        else {
            PendingCmds::Some(due)
        }
    }

    /// Get the number of commands left in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }

    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(tag = "cmd", rename_all = "snake_case")]
    enum TestCmd {
        Start,
        Move { x: f64 },
    }

    #[test]
    fn test_pending() {
        let mut interp = ScriptInterpreter::<TestCmd>::parse(
            "0.0: {\"cmd\": \"start\"};\n\
             # comment lines are ignored\n\
             1.5: {\"cmd\": \"move\", \"x\": 3.0};\n\
             1.5: {\"cmd\": \"move\", \"x\": 4.0};\n",
        )
        .unwrap();

        assert_eq!(interp.get_num_cmds(), 3);
        assert_eq!(interp.get_duration(), 1.5);

        assert_eq!(interp.get_pending(0.0), PendingCmds::Some(vec![TestCmd::Start]));
        assert_eq!(interp.get_pending(1.0), PendingCmds::None);
        assert_eq!(
            interp.get_pending(2.0),
            PendingCmds::Some(vec![TestCmd::Move { x: 3.0 }, TestCmd::Move { x: 4.0 }])
        );
        assert_eq!(interp.get_pending(3.0), PendingCmds::EndOfScript);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::parse("nothing here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::parse("1.0: {\"cmd\": \"jump\"};"),
            Err(ScriptError::InvalidCmd(t, _)) if t == 1.0
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::parse(
                "2.0: {\"cmd\": \"start\"};\n1.0: {\"cmd\": \"start\"};"
            ),
            Err(ScriptError::OutOfOrder(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::new("/no/such/script.wks"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
