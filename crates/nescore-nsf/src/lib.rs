//! NSF/NSFe music-file playback.
//!
//! An NSF file is a cartridge stripped down to just its sound driver: a
//! `load`/`init`/`play` triple of addresses, optional PRG bank-switching,
//! and the PRG image itself. This crate parses both the flat NSF header and
//! the chunked NSFe container, then drives a [`nescore_cpu::Cpu`] and
//! [`nescore_apu::Apu`] against a purpose-built bus to play the tune —
//! there's no PPU involved.
//!
//! # Example
//!
//! ```no_run
//! use nescore_nsf::{NsfModule, NsfPlayer};
//!
//! # fn load() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("tune.nsf")?;
//! let module = NsfModule::parse(&bytes)?;
//! let mut player = NsfPlayer::new(module);
//!
//! let sample = player.step();
//! if player.silence_exceeded() {
//!     player.next_song();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # no_std Support
//!
//! This crate supports `no_std` environments with the `alloc` crate. Enable
//! the `std` feature (enabled by default) for standard library support and
//! to pull in the APU's high-quality resampler.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bus;
mod header;
mod player;

pub use bus::NsfBus;
pub use header::{NsfError, NsfFormat, NsfModule, NsfRegion, BANK_SIZE, BANK_SLOTS, NSF_HEADER_SIZE};
pub use player::{NsfPlayer, MAX_SILENCE_FRAMES, NSF_SENTINEL_ADDR};
