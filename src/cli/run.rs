//! Run command - replay a JSON-lines script through a bound adapter
//!
//! Each non-empty line not starting with `#` is one call:
//! `{"op": "getDoc", "args": {"index": "books", "key": "42"}}`

use std::path::PathBuf;

use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::adapter::AdapterKind;
use crate::config::Config;
use crate::contract::Operation;
use crate::port::bind;

#[derive(Args)]
pub struct RunArgs {
    /// Script file, one JSON call per line
    pub script: PathBuf,

    /// Adapter to bind (default: from config)
    #[arg(long)]
    pub adapter: Option<String>,

    /// Keep going after validation errors
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Deserialize)]
struct RawStep {
    op: String,
    #[serde(default)]
    args: Value,
}

/// One parsed script call
#[derive(Debug)]
struct Step {
    line: usize,
    operation: Operation,
    args: Value,
}

fn parse_script(content: &str) -> anyhow::Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let raw: RawStep = serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("Invalid call on line {}: {}", line_no, e))?;
        let operation = raw
            .op
            .parse::<Operation>()
            .map_err(|e| anyhow::anyhow!("Line {}: {}", line_no, e))?;

        steps.push(Step {
            line: line_no,
            operation,
            args: raw.args,
        });
    }
    Ok(steps)
}

pub async fn run(args: RunArgs, verbose: bool) -> anyhow::Result<()> {
    let config = Config::load();

    let kind: AdapterKind = args
        .adapter
        .as_deref()
        .unwrap_or(&config.adapter.kind)
        .parse()?;
    let env = config.adapter.adapter_env()?;
    let port = bind(kind.build(&env)?, env)?;
    let keep_going = args.keep_going || config.run.keep_going;

    let content = std::fs::read_to_string(&args.script).map_err(|e| {
        anyhow::anyhow!("Failed to read script {}: {}", args.script.display(), e)
    })?;
    let steps = parse_script(&content)?;

    info!(
        "Replaying {} calls against adapter '{}'",
        steps.len(),
        port.adapter_name()
    );

    let mut violations = 0;
    for step in steps {
        if verbose {
            println!("{}:{} {}({})", args.script.display(), step.line, step.operation, step.args);
        }

        match port.call(step.operation, step.args).await {
            Ok(reply) => println!("{} {}", step.operation, reply),
            Err(e) if e.is_contract_violation() && keep_going => {
                violations += 1;
                warn!("Line {}: {}", step.line, e);
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("Line {}", step.line)));
            }
        }
    }

    if violations > 0 {
        anyhow::bail!("{} call(s) violated the port contract", violations);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_script() {
        let script = r#"
# set up
{"op": "createIndex", "args": {"index": "books", "mappings": {}}}

{"op": "deleteIndex", "args": "books"}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].line, 3);
        assert_eq!(steps[0].operation, Operation::CreateIndex);
        assert_eq!(steps[1].line, 5);
        assert_eq!(steps[1].args, json!("books"));
    }

    #[test]
    fn test_parse_script_unknown_op() {
        let err = parse_script(r#"{"op": "reindex"}"#).unwrap_err().to_string();
        assert!(err.starts_with("Line 1"));
        assert!(err.contains("reindex"));
    }

    #[test]
    fn test_parse_script_bad_json() {
        let err = parse_script("{op: getDoc}").unwrap_err().to_string();
        assert!(err.contains("Invalid call on line 1"));
    }
}
