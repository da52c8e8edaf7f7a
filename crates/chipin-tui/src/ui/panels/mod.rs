pub mod chip_box;
pub mod dropdown;
pub mod statusbar;
