use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::{hash_string, parse::parse_set, HashSet, Value};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operation {
    Values,
    Keys,
    Size,
    HashKey,
    Union,
    Intersection,
    Difference,
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "values" => Ok(Operation::Values),
            "keys" => Ok(Operation::Keys),
            "size" => Ok(Operation::Size),
            "hash-key" => Ok(Operation::HashKey),
            "union" => Ok(Operation::Union),
            "intersection" => Ok(Operation::Intersection),
            "difference" => Ok(Operation::Difference),
            other => Err(anyhow!("unknown operation: {}", other)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    /// djb2 of a raw string
    Hash(String),
    Set {
        op: Operation,
        left: String,
        right: Option<String>,
    },
}

pub fn run(command: &Command) -> Result<String> {
    let (op, left, right) = match command {
        Command::Hash(text) => return Ok(hash_string(text).to_string()),
        Command::Set { op, left, right } => (*op, left, right),
    };
    let left = parse_set(left).context("failed to read the left set")?;

    let combine: fn(&HashSet<Value>, &HashSet<Value>) -> HashSet<Value> = match op {
        Operation::Union => HashSet::union,
        Operation::Intersection => HashSet::intersection,
        Operation::Difference => HashSet::difference,
        unary => {
            if right.is_some() {
                info!(?unary, "second set ignored");
            }
            return Ok(describe(unary, &left));
        }
    };

    let right = right
        .as_deref()
        .ok_or_else(|| anyhow!("{:?} needs two sets", op))?;
    let right = parse_set(right).context("failed to read the right set")?;
    Ok(combine(&left, &right).to_string())
}

fn describe(op: Operation, set: &HashSet<Value>) -> String {
    match op {
        Operation::Keys => format!("{:?}", set.keys()),
        Operation::Size => set.len().to_string(),
        Operation::HashKey => set.to_hash_key().to_string(),
        _ => set.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_command(op: Operation, left: &str, right: Option<&str>) -> Command {
        Command::Set {
            op,
            left: left.to_string(),
            right: right.map(str::to_string),
        }
    }

    #[test]
    fn operation_names() {
        assert_eq!("hash-key".parse::<Operation>().unwrap(), Operation::HashKey);
        assert_eq!("union".parse::<Operation>().unwrap(), Operation::Union);
        assert!("xor".parse::<Operation>().is_err());
    }

    #[test]
    fn unary_operations() {
        let run_op = |op| run(&set_command(op, "{c, 2, 1}", None)).unwrap();
        assert_eq!(run_op(Operation::Values), "{1, 2, c}");
        assert_eq!(run_op(Operation::Keys), "[1, 2, 177672]");
        assert_eq!(run_op(Operation::Size), "3");
        assert_eq!(
            run_op(Operation::HashKey),
            hash_string("12177672").to_string()
        );
    }

    #[test]
    fn binary_operations() {
        let run_op = |op| run(&set_command(op, "0, 1", Some("1, 2"))).unwrap();
        assert_eq!(run_op(Operation::Union), "{0, 1, 2}");
        assert_eq!(run_op(Operation::Intersection), "{1}");
        assert_eq!(run_op(Operation::Difference), "{0}");
    }

    #[test]
    fn binary_operation_needs_two_sets() {
        assert!(run(&set_command(Operation::Union, "0", None)).is_err());
        assert!(run(&set_command(Operation::Union, "0", Some("{"))).is_err());
    }

    #[test]
    fn hash_command() {
        assert_eq!(run(&Command::Hash("0".to_string())).unwrap(), "177621");
    }
}
