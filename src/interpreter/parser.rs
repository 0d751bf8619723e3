/// Parser session state, token plumbing and error recovery.
///
/// Owns the scanner, the current/previous token slots and the sticky error
/// flags, and exposes the [`core::Parser::parse`] entry point.
pub mod core;
/// Precedence-climbing expression parsing.
///
/// Implements the prefix and infix parse actions referenced by the rule table
/// and the climbing loop that drives them.
pub mod expression;
/// The per-token-kind parse rule table.
pub mod rules;
/// Declarations, statements, blocks and `per` loop desugaring.
pub mod statement;
