//! replay scripts: a line based list of editor inputs
//!
//! ```text
//! # place a resistor and wire it up
//! key r
//! click 100 60
//! key w
//! press 120 60
//! move 200 60
//! release 200 60
//! ```

use crate::error::{Error, Result};
use crate::transforms::CSPoint;

use super::tools::{Input, Key};

fn script_error(line: usize, message: impl Into<String>) -> Error {
    Error::Script {
        line,
        message: message.into(),
    }
}

fn coord(line: usize, s: Option<&str>) -> Result<f64> {
    let s = s.ok_or_else(|| script_error(line, "expected two coordinates"))?;
    s.parse()
        .map_err(|_| script_error(line, format!("not a number: {s}")))
}

/// parses a script into inputs. `click` expands into a press and a release.
pub fn parse(src: &str) -> Result<Vec<Input>> {
    let mut inputs = vec![];
    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        let mut words = text.split_whitespace();
        let Some(cmd) = words.next() else {
            continue;
        };
        match cmd {
            "press" | "move" | "release" | "click" => {
                let p = CSPoint::new(coord(line, words.next())?, coord(line, words.next())?);
                match cmd {
                    "press" => inputs.push(Input::Press(p)),
                    "move" => inputs.push(Input::Motion(p)),
                    "release" => inputs.push(Input::Release(p)),
                    _ => inputs.extend([Input::Press(p), Input::Release(p)]),
                }
            }
            "key" => {
                let k = words
                    .next()
                    .ok_or_else(|| script_error(line, "expected a key"))?;
                let key: Key = k
                    .parse()
                    .map_err(|_| script_error(line, format!("unknown key: {k}")))?;
                inputs.push(Input::Key(key));
            }
            other => return Err(script_error(line, format!("unknown command: {other}"))),
        }
        if let Some(extra) = words.next() {
            return Err(script_error(line, format!("unexpected argument: {extra}")));
        }
    }
    Ok(inputs)
}
