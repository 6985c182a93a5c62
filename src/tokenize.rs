mod cursor;
mod lexer;
pub mod tag;
pub mod token;
mod tokenizer;

pub use cursor::Cursor;
pub use lexer::{Lexer, DEFAULT_TAB_WIDTH};
pub use tag::{PrototypeRole, SyntaxRole};
pub use token::{FundamentalType, Token};
pub use tokenizer::Tokenizer;
