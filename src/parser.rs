//! Tree-sitter parser construction for Kotlin

use tree_sitter::{Parser, Tree};

use crate::error::{KtMineError, Result};

/// Build a tree-sitter parser configured with the Kotlin grammar
pub fn kotlin_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
        .map_err(|e| KtMineError::ParseFailure {
            message: format!("Failed to set Kotlin language: {:?}", e),
        })?;
    Ok(parser)
}

/// Parse Kotlin source into a syntax tree
pub fn parse_source(parser: &mut Parser, source: &str) -> Result<Tree> {
    parser
        .parse(source, None)
        .ok_or_else(|| KtMineError::ParseFailure {
            message: "Failed to parse source".to_string(),
        })
}
