//! Generic tree transformer for traversing expression trees.
//!
//! The transformer is stateful (it takes `&mut self`) and is responsible for
//! recursing into children itself, so one trait covers evaluation, analysis
//! and instruction generation alike.

/// Transforms a tree node of type `T` into [`Self::Output`].
///
/// This trait can be used for:
/// - Side-effect traversals (Output = `()` or `Result<(), E>`, e.g. code generation)
/// - Evaluation (Output = value type)
/// - Analysis (Output = analysis result)
pub trait TreeTransformer<T> {
    /// The type of value produced by the transformation.
    type Output;

    /// Transform a tree node.
    ///
    /// This method is called recursively to traverse and transform the tree.
    fn transform(&mut self, tree: T) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::TreeTransformer;
    use crate::expr::{Expr, ExprBuilder};
    use crate::{vec, Vec};
    use bumpalo::Bump;

    /// Longest root-to-leaf path.
    struct Depth;

    impl<'a, 'e> TreeTransformer<&'a Expr<'e>> for Depth {
        type Output = usize;

        fn transform(&mut self, tree: &'a Expr<'e>) -> usize {
            let children: Vec<&Expr<'e>> = match *tree {
                Expr::Not(operand) | Expr::Pop(operand) => vec![operand],
                Expr::Or(lhs, rhs) => vec![lhs, rhs],
                Expr::Ternary {
                    test,
                    on_true,
                    on_false,
                } => vec![test, on_true, on_false],
                _ => Vec::new(),
            };
            1 + children
                .iter()
                .map(|child| self.transform(*child))
                .max()
                .unwrap_or(0)
        }
    }

    #[test]
    fn test_transformer_recurses() {
        let arena = Bump::new();
        let b = ExprBuilder::new(&arena);
        let expr = b.or(b.not(b.not(b.bool(true))), b.bool(false));
        assert_eq!(Depth.transform(expr), 4);
    }
}
