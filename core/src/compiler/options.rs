//! Configuration options for expression compilation.

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use stackgen_core::compiler::CompilerOptions;
///
/// let options = CompilerOptions {
///     compact_constants: false,
///     ..CompilerOptions::default()
/// };
/// assert!(options.check_stack_balance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Use `iconst`/`bipush`/`sipush` for integer literals that fit.
    ///
    /// When disabled, every integer literal other than booleans is loaded
    /// through the constant pool.
    ///
    /// Default: true
    pub compact_constants: bool,

    /// Verify that each top-level compile leaves exactly the values the
    /// expression produces (one, or none for `pop` and `void` calls).
    ///
    /// Default: true
    pub check_stack_balance: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            compact_constants: true,
            check_stack_balance: true,
        }
    }
}
