//! Reading JSON documents from arguments.
//!
//! A document argument is inline JSON, `@path` to a file, or `-` for stdin.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::CliError;

/// Load the document named by `arg`.
pub fn load_document(arg: &str) -> Result<Value> {
    load_document_from(arg, io::stdin())
}

fn load_document_from<R: Read>(arg: &str, mut stdin: R) -> Result<Value> {
    let (origin, text) = if arg == "-" {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        ("stdin".to_string(), buf)
    } else if let Some(path) = arg.strip_prefix('@') {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document from {:?}", path))?;
        (arg.to_string(), text)
    } else {
        ("argument".to_string(), arg.to_string())
    };

    serde_json::from_str(&text).map_err(|e| CliError::document(origin, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inline_document() {
        let doc = load_document_from(r#"{"length": 9}"#, io::empty()).unwrap();
        assert_eq!(doc, json!({"length": 9}));
    }

    #[test]
    fn test_file_document() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"id": "abc", "length": 3}"#).unwrap();

        let arg = format!("@{}", file.path().display());
        let doc = load_document_from(&arg, io::empty()).unwrap();
        assert_eq!(doc["id"], "abc");
    }

    #[test]
    fn test_stdin_document() {
        let doc = load_document_from("-", &b"{\"keepers\": {\"a\": \"b\"}}"[..]).unwrap();
        assert_eq!(doc["keepers"]["a"], "b");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_document_from("@/nonexistent/state.json", io::empty()).unwrap_err();
        assert!(err.to_string().contains("Failed to read document"));
    }

    #[test]
    fn test_malformed_document_is_a_document_error() {
        let err = load_document_from("{length: 9}", io::empty()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Document { origin, .. }) if origin == "argument"
        ));
    }
}
