//! A reader for formulas in DIMACS form, used by the stand-alone solver driver.
//!
//! Accepts comment lines beginning with `c`, the problem line
//! `p cnf <variables> <clauses>`, and then the declared number of zero-terminated
//! literal runs, in free whitespace layout.
//! Trailing whitespace is ignored; a `%` line ends the formula early (some
//! benchmark archives carry one).

use std::io::BufRead;

use crate::{
    structures::{clause::Clause, literal::Literal},
    types::err::ParseError,
};

/// The problem line counts, as declared.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProblemInfo {
    pub variables: usize,
    pub clauses: usize,
}

/// Read a DIMACS formula: the declared counts and the clauses themselves.
pub fn read_dimacs(mut reader: impl BufRead) -> Result<(ProblemInfo, Vec<Clause>), ParseError> {
    let mut buffer = String::new();
    let mut lines = 0;

    // First phase: read until the formula begins.
    let info = loop {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => return Err(ParseError::ProblemSpecification),
            Ok(_) => lines += 1,
            Err(_) => return Err(ParseError::Line(lines)),
        }

        match buffer.trim_start().chars().next() {
            None | Some('c') => continue,

            Some('p') => {
                let mut details = buffer.split_whitespace();
                if details.next() != Some("p") || details.next() != Some("cnf") {
                    return Err(ParseError::ProblemSpecification);
                }

                let variables = match details.next().map(str::parse) {
                    Some(Ok(count)) => count,
                    _ => return Err(ParseError::ProblemSpecification),
                };
                let clauses = match details.next().map(str::parse) {
                    Some(Ok(count)) => count,
                    _ => return Err(ParseError::ProblemSpecification),
                };

                break ProblemInfo { variables, clauses };
            }

            Some(_) => return Err(ParseError::ProblemSpecification),
        }
    };

    // Second phase: read clauses until the declared count is met.
    let mut formula = Vec::with_capacity(info.clauses);
    let mut clause: Clause = Vec::new();

    'formula: loop {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => break 'formula,
            Ok(_) => lines += 1,
            Err(_) => return Err(ParseError::Line(lines)),
        }

        match buffer.trim_start().chars().next() {
            None | Some('c') => continue 'formula,
            Some('%') => break 'formula,
            Some(_) => {}
        }

        for item in buffer.split_whitespace() {
            match item {
                "0" => formula.push(std::mem::take(&mut clause)),
                _ => match item.parse::<i64>() {
                    Ok(int) if int != 0 => clause.push(Literal::from_dimacs(int)),
                    _ => return Err(ParseError::Literal(item.to_string())),
                },
            }
        }

        if formula.len() >= info.clauses {
            break 'formula;
        }
    }

    if !clause.is_empty() {
        return Err(ParseError::MissingDelimiter);
    }
    if formula.len() < info.clauses {
        return Err(ParseError::MissingClauses);
    }

    Ok((info, formula))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_clauses() {
        let dimacs = b"c a comment\nc another\np cnf 3 2\n1 -2 0\n2 3 0\n" as &[u8];
        let (info, formula) = read_dimacs(dimacs).expect("well-formed input");
        assert_eq!(
            info,
            ProblemInfo {
                variables: 3,
                clauses: 2
            }
        );
        assert_eq!(formula.len(), 2);
        assert_eq!(formula[0], vec![Literal::from_dimacs(1), Literal::from_dimacs(-2)]);
    }

    #[test]
    fn clauses_split_across_lines() {
        let dimacs = b"p cnf 2 1\n1\n-2\n0\n" as &[u8];
        let (_, formula) = read_dimacs(dimacs).expect("well-formed input");
        assert_eq!(formula.len(), 1);
        assert_eq!(formula[0].len(), 2);
    }

    #[test]
    fn missing_problem_line() {
        let dimacs = b"1 2 0\n" as &[u8];
        assert_eq!(read_dimacs(dimacs), Err(ParseError::ProblemSpecification));
    }

    #[test]
    fn short_problem_line() {
        let dimacs = b"p cnf\n1 2 0\n" as &[u8];
        assert_eq!(read_dimacs(dimacs), Err(ParseError::ProblemSpecification));
    }

    #[test]
    fn unterminated_clause() {
        let dimacs = b"p cnf 2 1\n1 2\n" as &[u8];
        assert_eq!(read_dimacs(dimacs), Err(ParseError::MissingDelimiter));
    }

    #[test]
    fn too_few_clauses() {
        let dimacs = b"p cnf 2 2\n1 2 0\n" as &[u8];
        assert_eq!(read_dimacs(dimacs), Err(ParseError::MissingClauses));
    }

    #[test]
    fn trailing_whitespace_ignored() {
        let dimacs = b"p cnf 2 1\n1 2 0\n   \n\n" as &[u8];
        assert!(read_dimacs(dimacs).is_ok());
    }
}
