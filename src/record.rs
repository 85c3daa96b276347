//! Function records and classification policy
//!
//! A `FunctionRecord` holds the raw token strings collected for one Kotlin
//! `function_declaration` node. Fields are lists because the grammar may
//! attach a kind more than once to the same declaration; `user_type` in
//! particular collects twice for extension functions (receiver type first,
//! declared return type second).

/// Flag token for functions with an expression body (`= expr`)
pub const FLAG_SINGLE_EXPRESSION: &str = "is_single_expression";

/// Flag token for test functions (identifier contains "test" or `@Test`)
pub const FLAG_TEST: &str = "is_test";

/// Raw extraction result for one function declaration
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub simple_identifier: Vec<String>,
    pub function_value_parameters: Vec<String>,
    pub user_type: Vec<String>,
    pub modifiers: Vec<String>,
    pub function_body: Vec<String>,
    pub type_parameters: Vec<String>,
    pub flags: Vec<String>,
}

impl FunctionRecord {
    /// A body is empty iff its sole token is `""` or `"{}"`.
    ///
    /// A declaration the grammar attached no `function_body` child to at all
    /// (e.g. inside an interface) counts as empty rather than aborting the
    /// file.
    pub fn has_empty_body(&self) -> bool {
        match self.function_body.first() {
            None => true,
            Some(body) => body.is_empty() || body == "{}",
        }
    }

    /// Compute the two classification flags from body, identifier, and
    /// modifiers. The flags are independent; both, neither, or either may be
    /// set.
    pub fn compute_flags(&mut self) {
        if let Some(body) = self.function_body.first() {
            if body.trim_start().starts_with('=') {
                self.flags.push(FLAG_SINGLE_EXPRESSION.to_string());
            }
        }

        let named_test = self
            .simple_identifier
            .first()
            .map(|id| id.to_lowercase().contains("test"))
            .unwrap_or(false);
        let annotated_test = self.modifiers.iter().any(|m| m == "@Test");
        if named_test || annotated_test {
            self.flags.push(FLAG_TEST.to_string());
        }
    }

    pub fn is_single_expression(&self) -> bool {
        self.flags.iter().any(|f| f == FLAG_SINGLE_EXPRESSION)
    }

    pub fn is_test(&self) -> bool {
        self.flags.iter().any(|f| f == FLAG_TEST)
    }
}

/// Accumulation table for one extraction run.
///
/// Owned by the caller of a run and passed `&mut` into each walk invocation;
/// never shared across concurrent runs.
#[derive(Debug, Default)]
pub struct FunctionTable {
    records: Vec<FunctionRecord>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FunctionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FunctionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another table's records, preserving their order.
    ///
    /// Used to merge per-file tables back into corpus order after a parallel
    /// run.
    pub fn merge(&mut self, other: FunctionTable) {
        self.records.extend(other.records);
    }

    /// Reset between logical runs so results never contaminate a later run
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Join a list-of-tokens field into its single display string
pub fn flatten_field(tokens: &[String]) -> String {
    tokens.join(", ")
}

/// Split on commas that sit outside any `<...>` nesting.
///
/// `"Iterable<V, W>, List<R>"` splits into `["Iterable<V, W>", "List<R>"]`;
/// the comma inside the generic argument list does not split. Parts are
/// trimmed of the whitespace that followed the separator.
pub fn split_outside_angles(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for ch in text.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth <= 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

/// Normalize a flattened parameter-list cell: drop the surrounding
/// parentheses, collapse the depth-aware comma split back to a canonical
/// `", "` join, and squash whitespace runs. The synthesizer re-adds the
/// parentheses around the stored cell.
pub fn normalize_parameters(cell: &str) -> String {
    let inner = strip_parens(cell.trim());
    let joined = split_outside_angles(inner).join(", ");
    squash_whitespace(&joined)
}

fn strip_parens(cell: &str) -> &str {
    match cell.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        Some(inner) => inner,
        None => cell,
    }
}

/// Collapse every run of whitespace to a single space and trim the ends
fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How the collected `user_type` entries map onto the synthesized signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// No declared return type and no receiver
    None,
    /// Ordinary declared return type
    Return(String),
    /// Extension function: receiver type prefixes the name, second entry is
    /// the declared return type
    ReceiverAndReturn {
        receiver: String,
        return_type: String,
    },
}

/// Resolve the receiver/return shape from a flattened `user_type` cell.
///
/// The `">,"` substring check is a heuristic tied to the grammar's emission
/// order: two `user_type` children are only ever receiver-then-return, and
/// the joined cell then carries a comma right after the receiver's closing
/// angle bracket. It is not general type parsing.
pub fn resolve_return_shape(user_type: &str) -> ReturnShape {
    if user_type.is_empty() {
        return ReturnShape::None;
    }

    if user_type.split(">,").count() > 1 {
        let parts = split_outside_angles(user_type);
        if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return ReturnShape::ReceiverAndReturn {
                receiver: parts[0].clone(),
                return_type: parts[1].clone(),
            };
        }
        // Degenerate split: fall back to the first usable part
        if let Some(first) = parts.into_iter().find(|p| !p.is_empty()) {
            return ReturnShape::Return(first);
        }
        return ReturnShape::None;
    }

    ReturnShape::Return(user_type.to_string())
}
