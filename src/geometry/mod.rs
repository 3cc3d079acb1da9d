pub mod frame;

pub use frame::ViewFrame;
