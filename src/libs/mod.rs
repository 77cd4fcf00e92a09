pub mod error;
pub mod gff;
pub mod interval;
pub mod io;
pub mod pile;
pub mod resolve;
pub mod select;
pub mod sizes;
