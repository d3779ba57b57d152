pub mod error;
pub mod options;
pub mod report;
pub mod types;

pub use error::ConvertError;
pub use options::*;
pub use report::*;
pub use types::*;
