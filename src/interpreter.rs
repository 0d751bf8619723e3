/// Variable scopes.
///
/// An environment is a string-keyed hash table of bindings with an optional
/// link to the enclosing environment. Lookups walk the chain outward;
/// definitions always land in the innermost scope.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree produced by the parser, threading an
/// environment through every node, and writes `printo` output to a caller
/// supplied sink.
///
/// # Responsibilities
/// - Evaluates every node kind to a value.
/// - Propagates `kthe` out of blocks and loops up to the enclosing call.
/// - Reports runtime errors such as undefined variables, type mismatches,
///   division by zero and bad calls.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The scanner reads the raw source text on demand and produces tokens that
/// borrow their lexemes straight from the source buffer.
///
/// # Responsibilities
/// - Recognizes punctuation, one and two character operators, numbers,
///   strings, identifiers and keywords.
/// - Tracks line numbers, skipping whitespace and `#` comments.
/// - Turns malformed input into error tokens instead of failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A single-pass Pratt parser drives the scanner and produces one tree for the
/// whole program, recording syntax errors as it goes.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
pub mod value;
