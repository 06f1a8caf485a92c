pub mod classifier;
pub mod errors;
pub mod preprocess;
pub mod rules;
pub mod scanner;
pub mod tokens;

pub use classifier::*;
pub use errors::*;
pub use preprocess::*;
pub use scanner::*;
pub use tokens::*;
