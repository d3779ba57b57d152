mod props;
mod xml;

pub use props::*;
pub use xml::*;
