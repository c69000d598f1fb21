pub mod binary;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod repeat;
pub mod unary;

pub use binary::Binary;
pub use expr::Expr;
pub use literal::{Literal, LitBool, LitSym};
pub use paren::Paren;
pub use repeat::Repeat;
pub use unary::Unary;
