//! Title extraction from raw response bytes.
//!
//! ```text
//! body chunks → StreamingTitleScanner → CharsetResolver::decode → TextNormalizer → title
//! ```

mod charset;
mod scanner;

pub use charset::CharsetResolver;
pub use scanner::StreamingTitleScanner;
