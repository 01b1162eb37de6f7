//! Cartridge codec.
//!
//! A cartridge is a whole brand packed into one PNG: equal cells on a
//! near-square grid, with the cell size kept in the file name
//! (`Apple-72x72.png`) so the sheet can be sliced back without metadata.

mod pack;
mod unpack;

pub use pack::{cartridge_file_name, grid_for, write_cartridge, Cartridge, CartridgePacker};
pub use unpack::{parse_dimensions, parse_tile_suffix, slice_cartridge, unpack, Cell};
