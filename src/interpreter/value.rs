/// Runtime values.
///
/// Defines the `Value` enum shared by the parser's literal folding and the
/// evaluator, together with the language's truthiness and equality rules and
/// the textual form used by `printo`.
pub mod core;
