/*!
Error types used in the library.

Most conditions in the core are not errors: an unsatisfiable clause set surfaces as
'no more configurations' from the generator, and invariant violations are asserted.
What remains is parsing, which can fail on external input.
*/

/// Errors during parsing of a DIMACS formula.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification line of a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// A literal which could not be read as a non-zero integer.
    Literal(String),

    /// Fewer clauses were found than the problem specification declared.
    MissingClauses,

    /// A clause was left unterminated at the end of the input.
    MissingDelimiter,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseError::ProblemSpecification => write!(f, "missing or malformed 'p cnf' line"),
            ParseError::Line(line) => write!(f, "unreadable input at line {line}"),
            ParseError::Literal(token) => write!(f, "unreadable literal: {token:?}"),
            ParseError::MissingClauses => write!(f, "fewer clauses than declared"),
            ParseError::MissingDelimiter => write!(f, "unterminated clause at end of input"),
        }
    }
}

impl std::error::Error for ParseError {}
