pub mod fixed;
pub mod serde;
pub mod variable;

pub use fixed::{FDeserializable, FSer, FSerializable};
pub use variable::{TFTuple, VDeserializable, VSer, VSerializable};
