//! Typed GraphQL documents and query normalization.
//!
//! A [`Document`] is a query or mutation string tagged with the Rust types of
//! its result (`R`) and variables (`V`). The tags exist only at compile time;
//! at run time a document is just its source text.
//!
//! # Example
//!
//! ```rust
//! use catalyst_client::clients::Document;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct ProductResult {
//!     site: serde_json::Value,
//! }
//!
//! #[derive(Serialize)]
//! struct ProductVariables {
//!     id: i64,
//! }
//!
//! static PRODUCT: Document<ProductResult, ProductVariables> = Document::new(
//!     "query Product($id: Int!) { site { product(entityId: $id) { name } } }",
//! );
//!
//! assert!(PRODUCT.as_str().starts_with("query Product"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

/// Variables type for documents that declare no variables.
///
/// This type has no values, so a [`FetchRequest`](crate::clients::FetchRequest)
/// for a `Document<R, NoVariables>` can never carry variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NoVariables {}

/// A GraphQL document with compile-time result and variable types.
pub struct Document<R, V = NoVariables> {
    source: Cow<'static, str>,
    _types: PhantomData<fn() -> (R, V)>,
}

/// A document without static typing: JSON in, JSON out.
///
/// Calls made with raw documents rely on the run-time variable check in
/// [`Client::fetch`](crate::Client::fetch).
pub type RawDocument = Document<serde_json::Value, serde_json::Value>;

impl<R, V> Document<R, V> {
    /// Creates a document from static query text. Usable in `static` items.
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            _types: PhantomData,
        }
    }

    /// Creates a document from owned query text.
    #[must_use]
    pub fn from_string(source: impl Into<String>) -> Self {
        Self {
            source: Cow::Owned(source.into()),
            _types: PhantomData,
        }
    }

    /// Returns the source text exactly as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the canonical query text sent over the wire.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_query(&self.source)
    }
}

impl<R, V> Clone for Document<R, V> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            _types: PhantomData,
        }
    }
}

impl<R, V> fmt::Debug for Document<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.source).finish()
    }
}

/// Normalizes GraphQL source text.
///
/// Comments are removed, every run of whitespace outside string literals is
/// collapsed to a single space, whitespace next to punctuators is dropped, and
/// the result is trimmed. String and block string contents are preserved
/// byte-for-byte. The text is not parsed or validated; malformed queries are
/// left for the server to reject.
///
/// ```rust
/// use catalyst_client::clients::normalize_query;
///
/// let query = "
///     ## fetch the store name
///     query Settings {
///         site { settings { storeName } }
///     }
/// ";
/// assert_eq!(normalize_query(query), "query Settings{site{settings{storeName}}}");
/// ```
#[must_use]
pub fn normalize_query(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match c {
            '#' => {
                while chars.peek().is_some_and(|&n| n != '\n' && n != '\r') {
                    chars.next();
                }
                pending_space = true;
            }
            c if c.is_whitespace() || c == '\u{feff}' => pending_space = true,
            '"' => {
                push_separator(&mut out, &mut pending_space, c);
                out.push('"');
                if chars.peek() == Some(&'"') {
                    chars.next();
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        out.push_str("\"\"");
                        copy_block_string(&mut chars, &mut out);
                    } else {
                        // Empty string literal.
                        out.push('"');
                    }
                } else {
                    copy_string(&mut chars, &mut out);
                }
            }
            c => {
                push_separator(&mut out, &mut pending_space, c);
                out.push(c);
            }
        }
    }

    out
}

fn is_punctuator(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '(' | ')' | ':' | '=' | '@' | '[' | ']' | '{' | '|' | '}' | ','
    )
}

/// Emits the single space owed from skipped whitespace, unless either neighbour
/// is a punctuator (or the output is still empty).
fn push_separator(out: &mut String, pending_space: &mut bool, next: char) {
    if std::mem::take(pending_space) {
        if let Some(prev) = out.chars().last() {
            if !is_punctuator(prev) && !is_punctuator(next) {
                out.push(' ');
            }
        }
    }
}

fn copy_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' | '\n' => return,
            _ => {}
        }
    }
}

fn copy_block_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    let mut quotes = 0;
    while let Some(c) = chars.next() {
        if c == '\\' && chars.clone().take(3).eq("\"\"\"".chars()) {
            // Escaped triple quote: \""" is content, not a delimiter.
            out.push_str("\\\"\"\"");
            for _ in 0..3 {
                chars.next();
            }
            quotes = 0;
            continue;
        }
        out.push(c);
        if c == '"' {
            quotes += 1;
            if quotes == 3 {
                return;
            }
        } else {
            quotes = 0;
        }
    }
}
