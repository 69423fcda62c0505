//! Lightweight inspection of GraphQL operations.
//!
//! The client needs two facts about a document without fully parsing it: the
//! operation's type and name (for request logging) and which declared
//! variables are required (for the run-time variable check). Both are read
//! from a token stream of the source text.

use std::fmt;

/// The kind of a GraphQL operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OperationType {
    /// A `query` operation (also the shorthand `{ ... }` form).
    #[default]
    Query,
    /// A `mutation` operation.
    Mutation,
    /// A `subscription` operation.
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// Type and name of the first operation in a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationInfo {
    /// The operation type. Documents without an operation report `Query`.
    pub operation_type: OperationType,
    /// The operation name, or `None` for anonymous operations.
    pub name: Option<String>,
}

impl OperationInfo {
    /// Returns the operation name, or `"anonymous"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

/// A variable declared in an operation's variable definitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDefinition {
    /// The variable name without the leading `$`.
    pub name: String,
    /// Whether the variable must be supplied: non-null type and no default.
    pub required: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Name(&'a str),
    Punct(char),
    Value,
}

fn tokenize(source: &str) -> Vec<Token<'_>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
            }
            b'"' => {
                i = skip_string(bytes, i);
                tokens.push(Token::Value);
            }
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => {
                let start = i;
                while i < bytes.len() && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric()) {
                    i += 1;
                }
                tokens.push(Token::Name(&source[start..i]));
            }
            b'-' | b'0'..=b'9' => {
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'-' | b'+' | b'.'))
                {
                    i += 1;
                }
                tokens.push(Token::Value);
            }
            b'.' => {
                while i < bytes.len() && bytes[i] == b'.' {
                    i += 1;
                }
                tokens.push(Token::Punct('.'));
            }
            b'!' | b'$' | b'&' | b'(' | b')' | b':' | b'=' | b'@' | b'[' | b']' | b'{' | b'|'
            | b'}' => {
                tokens.push(Token::Punct(char::from(b)));
                i += 1;
            }
            // Whitespace, commas, and anything unrecognised are insignificant here.
            _ => i += 1,
        }
    }

    tokens
}

/// Returns the index just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    if bytes[start..].starts_with(b"\"\"\"") {
        let mut i = start + 3;
        while i < bytes.len() {
            if bytes[i] == b'\\' && bytes[i + 1..].starts_with(b"\"\"\"") {
                i += 4;
            } else if bytes[i..].starts_with(b"\"\"\"") {
                return i + 3;
            } else {
                i += 1;
            }
        }
        return i;
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' | b'\n' => return i + 1,
            _ => i += 1,
        }
    }
    i.min(bytes.len())
}

/// Index of the token after the matching close of the bracket at `open`.
fn skip_group(tokens: &[Token<'_>], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while i < tokens.len() {
        match tokens[i] {
            Token::Punct('{' | '(' | '[') => depth += 1,
            Token::Punct('}' | ')' | ']') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

struct OperationHeader<'a> {
    info: OperationInfo,
    /// Token index of the `(` opening the variable definitions, if any.
    variables_at: Option<usize>,
    tokens: Vec<Token<'a>>,
}

/// Finds the first operation definition, skipping fragment definitions.
fn find_operation(source: &str) -> Option<OperationHeader<'_>> {
    let tokens = tokenize(source);
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Punct('{') => {
                return Some(OperationHeader {
                    info: OperationInfo::default(),
                    variables_at: None,
                    tokens,
                });
            }
            Token::Name(keyword @ ("query" | "mutation" | "subscription")) => {
                let operation_type = match keyword {
                    "mutation" => OperationType::Mutation,
                    "subscription" => OperationType::Subscription,
                    _ => OperationType::Query,
                };
                let mut next = i + 1;
                let name = match tokens.get(next) {
                    Some(Token::Name(name)) => {
                        next += 1;
                        Some((*name).to_string())
                    }
                    _ => None,
                };
                let variables_at = matches!(tokens.get(next), Some(Token::Punct('('))).then_some(next);
                return Some(OperationHeader {
                    info: OperationInfo {
                        operation_type,
                        name,
                    },
                    variables_at,
                    tokens,
                });
            }
            _ => {
                // Skip a whole fragment (or any other top-level definition) body.
                match tokens[i..].iter().position(|t| *t == Token::Punct('{')) {
                    Some(offset) => i = skip_group(&tokens, i + offset),
                    None => return None,
                }
            }
        }
    }

    None
}

/// Extracts the type and name of the document's operation.
///
/// ```rust
/// use catalyst_client::clients::{operation_info, OperationType};
///
/// let info = operation_info("mutation AddCartLineItem($input: AddCartLineItemsInput!) { cart { id } }");
/// assert_eq!(info.operation_type, OperationType::Mutation);
/// assert_eq!(info.name.as_deref(), Some("AddCartLineItem"));
///
/// assert_eq!(operation_info("{ site { id } }").display_name(), "anonymous");
/// ```
#[must_use]
pub fn operation_info(source: &str) -> OperationInfo {
    find_operation(source).map(|op| op.info).unwrap_or_default()
}

/// Lists the variables declared by the document's operation.
#[must_use]
pub fn variable_definitions(source: &str) -> Vec<VariableDefinition> {
    let Some(op) = find_operation(source) else {
        return Vec::new();
    };
    let Some(open) = op.variables_at else {
        return Vec::new();
    };

    let tokens = &op.tokens;
    let close = skip_group(tokens, open) - 1;
    let mut definitions = Vec::new();
    let mut i = open + 1;

    while i < close {
        if tokens[i] != Token::Punct('$') {
            i += 1;
            continue;
        }
        let Some(Token::Name(name)) = tokens.get(i + 1) else {
            i += 1;
            continue;
        };

        // Type runs from after `:` to a default value, directive, or the next variable.
        let mut j = i + 2;
        if tokens.get(j) == Some(&Token::Punct(':')) {
            j += 1;
        }
        let mut last_type_token = None;
        let mut has_default = false;
        while j < close {
            match tokens[j] {
                Token::Punct('$' | '@') => break,
                Token::Punct('=') => {
                    has_default = true;
                    break;
                }
                token => last_type_token = Some(token),
            }
            j += 1;
        }

        // Skip the default value and directives up to the next variable.
        while j < close {
            match tokens[j] {
                Token::Punct('$') => break,
                Token::Punct('(' | '[' | '{') => j = skip_group(tokens, j),
                _ => j += 1,
            }
        }

        definitions.push(VariableDefinition {
            name: (*name).to_string(),
            required: !has_default && last_type_token == Some(Token::Punct('!')),
        });
        i = j;
    }

    definitions
}

/// Names of variables that must be supplied for the document to be valid.
#[must_use]
pub fn required_variables(source: &str) -> Vec<String> {
    variable_definitions(source)
        .into_iter()
        .filter(|definition| definition.required)
        .map(|definition| definition.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_info_named_query() {
        let info = operation_info("query ProductPage($id: Int!) { site { id } }");
        assert_eq!(info.operation_type, OperationType::Query);
        assert_eq!(info.name.as_deref(), Some("ProductPage"));
        assert_eq!(info.display_name(), "ProductPage");
    }

    #[test]
    fn test_operation_info_anonymous_and_shorthand() {
        let info = operation_info("query { site { id } }");
        assert_eq!(info.operation_type, OperationType::Query);
        assert!(info.name.is_none());

        let info = operation_info("{ site { id } }");
        assert_eq!(info, OperationInfo::default());
        assert_eq!(info.display_name(), "anonymous");
    }

    #[test]
    fn test_operation_info_skips_leading_fragments() {
        let source = "fragment ProductFields on Product { name prices { price { value } } }\n\
                      mutation Login($email: String!, $password: String!) { login(email: $email, password: $password) { result } }";
        let info = operation_info(source);
        assert_eq!(info.operation_type, OperationType::Mutation);
        assert_eq!(info.name.as_deref(), Some("Login"));
    }

    #[test]
    fn test_operation_info_ignores_keywords_in_comments_and_strings() {
        let source = "# mutation Fake\nquery Real { search(term: \"mutation\") { id } }";
        let info = operation_info(source);
        assert_eq!(info.operation_type, OperationType::Query);
        assert_eq!(info.name.as_deref(), Some("Real"));
    }

    #[test]
    fn test_operation_info_subscription() {
        let info = operation_info("subscription OnCart { cart { id } }");
        assert_eq!(info.operation_type, OperationType::Subscription);
        assert_eq!(info.operation_type.to_string(), "subscription");
    }

    #[test]
    fn test_operation_info_for_empty_document() {
        assert_eq!(operation_info(""), OperationInfo::default());
    }

    #[test]
    fn test_required_variables_detects_non_null_types() {
        let source = "query Search($term: String!, $first: Int, $filters: [ID!], $ids: [ID!]!) { site { id } }";
        assert_eq!(required_variables(source), vec!["term", "ids"]);
    }

    #[test]
    fn test_variable_with_default_is_not_required() {
        let source = "query Products($first: Int! = 10, $sort: SortInput! = { field: NAME, direction: ASC }, $id: Int!) { site { id } }";
        let definitions = variable_definitions(source);
        assert_eq!(definitions.len(), 3);
        assert!(!definitions[0].required);
        assert!(!definitions[1].required);
        assert_eq!(definitions[2].name, "id");
        assert!(definitions[2].required);
    }

    #[test]
    fn test_variable_directives_are_skipped() {
        let source = "query Q($id: Int! @deprecated(reason: \"x\"), $locale: String) { site { id } }";
        let definitions = variable_definitions(source);
        assert_eq!(
            definitions,
            vec![
                VariableDefinition {
                    name: "id".to_string(),
                    required: true
                },
                VariableDefinition {
                    name: "locale".to_string(),
                    required: false
                },
            ]
        );
    }

    #[test]
    fn test_no_variable_definitions() {
        assert!(variable_definitions("query Settings { site { id } }").is_empty());
        assert!(variable_definitions("{ site { id } }").is_empty());
    }

    #[test]
    fn test_variable_usages_in_selection_are_not_definitions() {
        let source = "query Q($id: Int) { site { product(entityId: $id) { name } } }";
        assert_eq!(variable_definitions(source).len(), 1);
        assert!(required_variables(source).is_empty());
    }

    #[test]
    fn test_works_on_normalized_text() {
        let source = "query Q($id:Int!,$x:String){site{id}}";
        assert_eq!(required_variables(source), vec!["id"]);
        assert_eq!(operation_info(source).name.as_deref(), Some("Q"));
    }
}
