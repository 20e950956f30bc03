//! # samos-conf
//!
//! Reads, edits and writes the control scripts of the SAMoS particle simulator.
//!
//! A script is a sequence of newline-terminated commands:
//!
//!     messages messages.msg
//!     input cells.dat
//!     nlist {rcut=2.4;pad=0.5}
//!     pair_potential vp {K=1;gamma=1;lambda=-5.0}
//!     run 10000
//!
//! [conf::parse] turns such text into a [conf::Config], the `Config` methods in
//! [conf::editing] return edited copies, and [conf::generate] writes it back out.
//! Everything is re-exported from [conf].

pub mod conf;
