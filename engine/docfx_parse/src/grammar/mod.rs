//! Grammar productions, as `impl Parser` blocks split by precedence tier.

mod expr;
mod postfix;
mod primary;
