//! Dockerfile rules (DF001-DF012).
//!
//! All rules read the line view of the document. Per-line rules skip blank
//! lines and `#` comments; instruction keywords match case-insensitively.

use crate::analyzer::document::LineDocument;
use crate::analyzer::rules::Rule;

pub mod df001;
pub mod df002;
pub mod df003;
pub mod df004;
pub mod df005;
pub mod df006;
pub mod df007;
pub mod df008;
pub mod df009;
pub mod df010;
pub mod df011;
pub mod df012;

/// Get all Dockerfile rules in catalog order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(df001::rule()),
        Box::new(df002::rule()),
        Box::new(df003::rule()),
        Box::new(df004::rule()),
        Box::new(df005::rule()),
        Box::new(df006::rule()),
        Box::new(df007::rule()),
        Box::new(df008::rule()),
        Box::new(df009::rule()),
        Box::new(df010::rule()),
        Box::new(df011::rule()),
        Box::new(df012::rule()),
    ]
}

/// One instruction line: `KEYWORD args…`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Instruction<'a> {
    pub line: usize,
    pub keyword: &'a str,
    pub args: &'a str,
    /// The whole line, trimmed.
    pub text: &'a str,
}

impl Instruction<'_> {
    pub fn is(&self, keyword: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(keyword)
    }
}

/// Instruction lines of the document.
pub(crate) fn instructions(doc: &LineDocument) -> impl Iterator<Item = Instruction<'_>> {
    doc.instructions().map(|(line, raw)| {
        let text = raw.trim();
        let (keyword, args) = match text.split_once(char::is_whitespace) {
            Some((keyword, args)) => (keyword, args.trim()),
            None => (text, ""),
        };
        Instruction {
            line,
            keyword,
            args,
            text,
        }
    })
}

/// The user part of a `USER user[:group]` argument.
pub(crate) fn user_name(args: &str) -> &str {
    let spec = args.split_whitespace().next().unwrap_or("");
    spec.split(':').next().unwrap_or(spec)
}

/// Whether a `USER` argument switches to root.
pub(crate) fn is_root_user(args: &str) -> bool {
    let user = user_name(args);
    user.eq_ignore_ascii_case("root") || user == "0"
}
