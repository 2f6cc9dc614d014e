pub mod blaze_svg;
pub mod serialize;
