pub mod codec;
pub mod normalize;
