//! Canonical signature synthesis for extracted functions
//!
//! Deterministically reconstructs a function signature string from the
//! flattened fields of one record. Three grammatical shapes are handled:
//! free functions (`fun name(...)`), functions with a declared return type
//! (`fun name(...): Type`), and extension functions with receiver and return
//! generics (`fun <V, R> Iterable<V>.name(...): List<R>`).

use crate::record::{resolve_return_shape, ReturnShape};
use crate::table::FunctionRow;

/// Signature-length bucket labels, in column order
pub const LENGTH_BUCKETS: [&str; 4] = ["0-20", "20-50", "50-100", "100+"];

/// Synthesize the canonical signature text for one function row.
///
/// The trailing ` +` on single-expression functions is a sentinel consumed by
/// downstream text formatting, not valid Kotlin.
pub fn synthesize(row: &FunctionRow) -> String {
    let mut text = String::new();

    // Annotations one per line, keyword modifiers inline
    for modifier in row.modifiers.split(", ") {
        if modifier.is_empty() {
            continue;
        }
        if modifier.starts_with('@') {
            text.push_str(modifier);
            text.push('\n');
        } else {
            text.push_str(modifier);
            text.push(' ');
        }
    }

    let mut identifier = row.simple_identifier.clone();
    let mut return_type = String::new();
    match resolve_return_shape(&row.user_type) {
        ReturnShape::None => {}
        ReturnShape::Return(ty) => return_type = ty,
        ReturnShape::ReceiverAndReturn {
            receiver,
            return_type: ty,
        } => {
            identifier = format!("{}.{}", receiver, identifier);
            return_type = ty;
        }
    }

    text.push_str("fun ");
    if !row.type_parameters.is_empty() {
        text.push_str(&row.type_parameters);
        text.push(' ');
    }
    text.push_str(&identifier);

    // The normalized cell holds the bare parameter list; parentheses are
    // always re-added here (empty parens when no parameters were recorded)
    text.push('(');
    text.push_str(&row.function_value_parameters);
    text.push(')');

    if !return_type.is_empty() {
        text.push_str(": ");
        text.push_str(&return_type);
    }

    if row.is_single_expression {
        text.push_str(" +");
    }

    text
}

/// Bucket a signature by character length.
///
/// Boundaries are inclusive upper bounds at 23, 43, and 73 characters.
pub fn categorize_length(signature: &str) -> &'static str {
    let length = signature.len();
    if length <= 23 {
        LENGTH_BUCKETS[0]
    } else if length <= 43 {
        LENGTH_BUCKETS[1]
    } else if length <= 73 {
        LENGTH_BUCKETS[2]
    } else {
        LENGTH_BUCKETS[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        modifiers: &str,
        type_parameters: &str,
        identifier: &str,
        parameters: &str,
        user_type: &str,
        is_single_expression: bool,
    ) -> FunctionRow {
        FunctionRow {
            function_id: 0,
            simple_identifier: identifier.to_string(),
            function_value_parameters: parameters.to_string(),
            user_type: user_type.to_string(),
            modifiers: modifiers.to_string(),
            function_body: String::new(),
            type_parameters: type_parameters.to_string(),
            is_single_expression,
            is_test: false,
        }
    }

    #[test]
    fn test_plain_function() {
        let row = row("", "", "main", "", "", false);
        assert_eq!(synthesize(&row), "fun main()");
    }

    #[test]
    fn test_return_type() {
        let row = row("", "", "detect", "", "IdeaSyncDetector", false);
        assert_eq!(synthesize(&row), "fun detect(): IdeaSyncDetector");
    }

    #[test]
    fn test_missing_parameters_emit_empty_parens() {
        let row = row("", "", "noParams", "", "", false);
        assert_eq!(synthesize(&row), "fun noParams()");
    }

    #[test]
    fn test_receiver_and_generic_return() {
        // Parameter cells are stored without parentheses; the synthesizer
        // must add them itself
        let row = row(
            "public",
            "<V, R>",
            "transform",
            "v: V",
            "Iterable<V>, List<R>",
            true,
        );
        assert_eq!(
            synthesize(&row),
            "public fun <V, R> Iterable<V>.transform(v: V): List<R> +"
        );
    }

    #[test]
    fn test_annotation_on_own_line() {
        let row = row("@Test", "", "testSum", "", "", false);
        assert_eq!(synthesize(&row), "@Test\nfun testSum()");
    }

    #[test]
    fn test_mixed_modifiers() {
        let row = row("@JvmStatic, private", "", "helper", "x: Int", "Int", false);
        assert_eq!(
            synthesize(&row),
            "@JvmStatic\nprivate fun helper(x: Int): Int"
        );
    }

    #[test]
    fn test_single_expression_sentinel() {
        let row = row("", "", "answer", "", "Int", true);
        assert_eq!(synthesize(&row), "fun answer(): Int +");
    }

    #[test]
    fn test_length_buckets() {
        assert_eq!(categorize_length(""), "0-20");
        assert_eq!(categorize_length(&"x".repeat(23)), "0-20");
        assert_eq!(categorize_length(&"x".repeat(24)), "20-50");
        assert_eq!(categorize_length(&"x".repeat(43)), "20-50");
        assert_eq!(categorize_length(&"x".repeat(44)), "50-100");
        assert_eq!(categorize_length(&"x".repeat(73)), "50-100");
        assert_eq!(categorize_length(&"x".repeat(74)), "100+");
    }
}
