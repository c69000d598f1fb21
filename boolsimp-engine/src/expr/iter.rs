use super::Expr;

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first, children before their parent).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order.
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Operand(_) => return self.visit(),
                Expr::Not(inner) => {
                    if self.is_last_visited(inner) {
                        return self.visit();
                    }
                    self.stack.push(inner);
                },
                Expr::Nary(_, children) => match children.last() {
                    Some(last) if !self.is_last_visited(last) => {
                        for child in children.iter().rev() {
                            self.stack.push(child);
                        }
                    },
                    _ => return self.visit(),
                },
            }
        }
    }
}
