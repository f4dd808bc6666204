pub mod circbuf;
pub mod linkedlist;
pub mod safety;
pub mod sequence;

pub use circbuf::*;
pub use linkedlist::*;
pub use safety::*;
pub use sequence::*;
