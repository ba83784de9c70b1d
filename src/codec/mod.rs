pub mod decoder;
pub mod encoder;
pub mod parallel;
pub mod window;

pub use decoder::Decoder;
pub use encoder::SingleThreadedEncoder;
pub use parallel::ParallelEncoder;
pub use window::copy_back;
