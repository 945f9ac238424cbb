//! NSF playback driver.
//!
//! Reuses the CPU and APU as a tune engine: `init` and `play` are invoked by
//! synthesizing a `JSR` to a sentinel return address and running the CPU
//! until it gets back there, exactly as a real 6502 would after an `RTS`.

use nescore_apu::{Apu, CPU_CLOCK_NTSC, CPU_CLOCK_PAL};
use nescore_cpu::{Bus, Cpu};

use crate::bus::NsfBus;
use crate::header::{NsfModule, NsfRegion};

/// Return address the sentinel `JSR` resolves to. Reaching this PC means the
/// most recently invoked `init`/`play` routine has executed its `RTS`.
pub const NSF_SENTINEL_ADDR: u16 = 0x5FF5;

/// Consecutive silent frames after which playback should skip to the next
/// track.
pub const MAX_SILENCE_FRAMES: u32 = 150;

/// Hard cap on cycles spent waiting for `init` to return, guarding against a
/// malformed tune that never executes an `RTS`.
const INIT_CYCLE_BUDGET: u32 = 2_000_000;

/// Drives a loaded NSF/NSFe tune.
pub struct NsfPlayer {
    module: NsfModule,
    cpu: Cpu,
    bus: NsfBus,
    current_song: u8,
    initializing: bool,
    silent_frames: u32,
    pal: bool,
}

impl NsfPlayer {
    /// Load a tune and run `init` for its starting song.
    #[must_use]
    pub fn new(module: NsfModule) -> Self {
        let pal = matches!(module.region, NsfRegion::Pal);
        let bus = NsfBus::new(&module);
        let starting_song = module.starting_song;

        let mut player = Self {
            module,
            cpu: Cpu::new(),
            bus,
            current_song: starting_song,
            initializing: true,
            silent_frames: 0,
            pal,
        };
        player.init_song(starting_song);
        player
    }

    /// Tune metadata and PRG image.
    #[must_use]
    pub fn module(&self) -> &NsfModule {
        &self.module
    }

    /// 1-indexed song currently selected.
    #[must_use]
    pub fn current_song(&self) -> u8 {
        self.current_song
    }

    /// Per-track playback rate, in microseconds between `play` calls, for
    /// the currently active region.
    #[must_use]
    pub fn frame_speed_us(&self) -> u16 {
        if self.pal {
            self.module.pal_speed
        } else {
            self.module.ntsc_speed
        }
    }

    /// CPU cycles to run between successive `play` calls.
    #[must_use]
    pub fn cycles_per_call(&self) -> u32 {
        let clock_hz = if self.pal { CPU_CLOCK_PAL } else { CPU_CLOCK_NTSC };
        u32::from(self.frame_speed_us()) * clock_hz / 1_000_000
    }

    /// Re-initialize the given 1-indexed song.
    pub fn init_song(&mut self, song: u8) {
        self.current_song = song;
        self.silent_frames = 0;

        self.bus.clear_ram();
        self.bus.reset_banks(&self.module);
        *self.bus.apu_mut() = Apu::new();

        for addr in 0x4000..=0x400D {
            self.bus.write(addr, 0);
        }
        self.bus.write(0x4015, 0x00);
        self.bus.write(0x4015, 0x0F);
        self.bus.write(0x4017, 0x40);

        if let Some(bank_init) = self.module.bank_init {
            for (i, &bank) in bank_init.iter().enumerate() {
                self.bus.write(0x5FF8 + i as u16, bank);
            }
        }

        self.cpu = Cpu::new();
        self.cpu.a = song.saturating_sub(1);
        self.cpu.x = u8::from(self.pal);
        self.initializing = true;

        self.jsr(self.module.init_addr);

        let mut budget = INIT_CYCLE_BUDGET;
        while self.cpu.pc != NSF_SENTINEL_ADDR && budget > 0 {
            self.cpu.step(&mut self.bus);
            budget -= 1;
        }
        if budget == 0 {
            log::warn!("NSF init routine for song {song} never returned; giving up");
        }

        self.initializing = false;
    }

    /// Advance to the next song, wrapping around to the first.
    pub fn next_song(&mut self) {
        let total = self.module.total_songs.max(1);
        let next = if self.current_song >= total {
            1
        } else {
            self.current_song + 1
        };
        self.init_song(next);
    }

    /// Step back to the previous song, wrapping around to the last.
    pub fn prev_song(&mut self) {
        let total = self.module.total_songs.max(1);
        let prev = if self.current_song <= 1 {
            total
        } else {
            self.current_song - 1
        };
        self.init_song(prev);
    }

    /// Run one playback tick: call `play` if the previous call has
    /// returned, then clock the CPU and APU for one call period. Returns the
    /// average APU output sample over the tick.
    pub fn step(&mut self) -> f32 {
        if self.cpu.pc == NSF_SENTINEL_ADDR {
            self.jsr(self.module.play_addr);
        }

        let cycles = self.cycles_per_call().max(1);
        let mut sum = 0.0f32;

        for _ in 0..cycles {
            if self.cpu.pc != NSF_SENTINEL_ADDR {
                self.cpu.step(&mut self.bus);
            }

            self.bus.apu_mut().clock();
            if self.bus.apu_mut().dmc_needs_sample() {
                let addr = self.bus.apu_mut().dmc_sample_addr();
                let sample = self.bus.read_prg(addr);
                self.bus.apu_mut().dmc_fill_sample(sample);
            }
            sum += self.bus.apu().output();
        }

        let level = sum / cycles as f32;
        if level < f32::EPSILON {
            self.silent_frames += 1;
        } else {
            self.silent_frames = 0;
        }

        level
    }

    /// Whether the silence watchdog has tripped and the caller should
    /// advance to the next track.
    #[must_use]
    pub fn silence_exceeded(&self) -> bool {
        self.silent_frames >= MAX_SILENCE_FRAMES
    }

    fn jsr(&mut self, addr: u16) {
        let ret = NSF_SENTINEL_ADDR - 1;
        let hi = (ret >> 8) as u8;
        let lo = (ret & 0xFF) as u8;
        self.bus.write(0x0100 | u16::from(self.cpu.sp), hi);
        self.cpu.sp = self.cpu.sp.wrapping_sub(1);
        self.bus.write(0x0100 | u16::from(self.cpu.sp), lo);
        self.cpu.sp = self.cpu.sp.wrapping_sub(1);
        self.cpu.pc = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::NSF_HEADER_SIZE;

    /// A tiny tune whose `init` and `play` are both a single `RTS` ($60).
    fn rts_only_module() -> NsfModule {
        let mut header = vec![0u8; NSF_HEADER_SIZE];
        header[0..5].copy_from_slice(b"NESM\x1A");
        header[5] = 1;
        header[6] = 3; // total songs
        header[7] = 1; // starting song
        header[8..10].copy_from_slice(&0x8000u16.to_le_bytes()); // load
        header[10..12].copy_from_slice(&0x8000u16.to_le_bytes()); // init
        header[12..14].copy_from_slice(&0x8001u16.to_le_bytes()); // play
        header[0x6E..0x70].copy_from_slice(&16639u16.to_le_bytes());
        header[0x78..0x7A].copy_from_slice(&19997u16.to_le_bytes());

        let mut bytes = header;
        bytes.push(0x60); // init: RTS
        bytes.push(0x60); // play: RTS

        NsfModule::parse(&bytes).unwrap()
    }

    #[test]
    fn init_returns_to_sentinel() {
        let player = NsfPlayer::new(rts_only_module());
        assert_eq!(player.cpu.pc, NSF_SENTINEL_ADDR);
        assert!(!player.initializing);
    }

    #[test]
    fn step_calls_play_and_returns_to_sentinel() {
        let mut player = NsfPlayer::new(rts_only_module());
        player.step();
        assert_eq!(player.cpu.pc, NSF_SENTINEL_ADDR);
    }

    #[test]
    fn next_song_wraps_around() {
        let mut player = NsfPlayer::new(rts_only_module());
        assert_eq!(player.current_song(), 1);
        player.next_song();
        assert_eq!(player.current_song(), 2);
        player.next_song();
        assert_eq!(player.current_song(), 3);
        player.next_song();
        assert_eq!(player.current_song(), 1);
    }

    #[test]
    fn prev_song_wraps_around() {
        let mut player = NsfPlayer::new(rts_only_module());
        player.prev_song();
        assert_eq!(player.current_song(), 3);
    }

    #[test]
    fn silence_watchdog_trips_after_threshold() {
        let mut player = NsfPlayer::new(rts_only_module());
        assert!(!player.silence_exceeded());
        for _ in 0..(MAX_SILENCE_FRAMES as usize + 1) {
            player.step();
        }
        assert!(player.silence_exceeded());
    }

    #[test]
    fn cycles_per_call_matches_region_speed() {
        let player = NsfPlayer::new(rts_only_module());
        let expected = u32::from(16639u16) * CPU_CLOCK_NTSC / 1_000_000;
        assert_eq!(player.cycles_per_call(), expected);
    }
}
