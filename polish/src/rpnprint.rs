use crate::parser::RPNExpr;
use crate::token::{Assoc, OpInfo, OperatorTable, Token};
use std::fmt;

impl RPNExpr {
    /// Render back to space delimited infix.
    ///
    /// There's no grouping in the infix syntax, so this gives up (`None`)
    /// when the expression would need parentheses, eg: `1 2 3 + *`. Also
    /// `None` for invalid RPN or operators missing from `table`.
    pub fn to_infix(&self, table: &OperatorTable) -> Option<String> {
        // rendered subtrees with their root operator, None for leaves
        let mut subtrees: Vec<(String, Option<&OpInfo>)> = Vec::new();
        for token in self.0.iter() {
            let info = match *token {
                Token::Operand(_) => {
                    subtrees.push((token.to_string(), None));
                    continue;
                }
                Token::Operator(op) => table.info(op)?,
            };
            let (rh, rinfo) = subtrees.pop()?;
            let (lh, linfo) = subtrees.pop()?;
            // an equal rank on the left groups first only if the parent is
            // left associative, on the right only if the child is right
            // associative
            if let Some(l) = linfo {
                if info.rank > l.rank || (info.rank == l.rank && info.assoc != Assoc::Left) {
                    return None;
                }
            }
            if let Some(r) = rinfo {
                if info.rank > r.rank || (info.rank == r.rank && r.assoc != Assoc::Right) {
                    return None;
                }
            }
            subtrees.push((format!("{} {} {}", lh, info.op, rh), Some(info)));
        }
        match (subtrees.pop(), subtrees.is_empty()) {
            (Some((infix, _)), true) => Some(infix),
            _ => None,
        }
    }
}

impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut tokens = self.0.iter();
        if let Some(first) = tokens.next() {
            write!(f, "{}", first)?;
        }
        for token in tokens {
            write!(f, " {}", token)?;
        }
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
