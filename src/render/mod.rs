pub mod braille;
pub mod chart;
pub mod compress;
pub mod legend;

pub use braille::Canvas;
pub use chart::render;
pub use compress::{Compressed, Units, compress};
pub use legend::YAxis;
