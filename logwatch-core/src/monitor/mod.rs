mod alert;
mod sliding_window;


pub use alert::*;
pub use sliding_window::*;
