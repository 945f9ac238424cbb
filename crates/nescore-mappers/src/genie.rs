//! Game Genie cheat device.
//!
//! The Game Genie sits between the CPU and the cartridge mapper. It holds
//! up to three patch slots, each comparing a fixed PRG address against an
//! expected byte and substituting a replacement when the comparison (or the
//! unconditional form) matches. A control write to $8000 with bit 0 set
//! loads the three slots from the 12 bytes most recently written to
//! $8001-$800C (two address bytes, a compare byte and a replacement byte per
//! slot); a write with bit 0 clear disengages the device and the loaded
//! slots start patching PRG reads.
//!
//! This is an outer decorator over a `Box<dyn Mapper>`: everything other
//! than PRG reads in the patched range passes straight through to the inner
//! mapper.

use crate::mapper::{Mapper, Mirroring};

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Number of bytes captured from $8000-$800C: the control byte plus three
/// 4-byte slot records (address hi/lo, compare, replace).
const CODE_MEM_LEN: usize = 13;

/// A single Game Genie patch slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenieCode {
    /// CPU address this slot patches, always in $8000-$FFFF.
    pub address: u16,
    /// Expected byte at `address`. When `None`, the slot always substitutes
    /// `replace` regardless of what the cartridge holds there.
    pub compare: Option<u8>,
    /// Replacement byte returned when the slot is active and matches.
    pub replace: u8,
    /// Whether this slot is currently enabled.
    pub enabled: bool,
}

/// Game Genie decorator over an inner cartridge mapper.
pub struct GameGenie {
    inner: Box<dyn Mapper>,
    slots: [GenieCode; 3],
    /// True while the control byte's bit 0 is set: the device is in its
    /// setup phase and PRG reads are not patched.
    engaged: bool,
    /// Bytes most recently written to $8000-$800C, used to load slots when
    /// the control byte's bit 0 is set.
    code_mem: [u8; CODE_MEM_LEN],
}

impl GameGenie {
    /// Wrap a mapper with up to three Game Genie patch slots.
    ///
    /// Slots beyond the codes given are left disabled. At most 3 codes are
    /// used; extras are ignored. These seed the initial state directly, as
    /// if already loaded; a cartridge can still reconfigure them later by
    /// writing its own codes through $8000-$800C.
    #[must_use]
    pub fn new(inner: Box<dyn Mapper>, codes: &[GenieCode]) -> Self {
        let mut slots = [GenieCode::default(); 3];
        for (slot, code) in slots.iter_mut().zip(codes.iter()) {
            *slot = *code;
        }

        Self {
            inner,
            slots,
            engaged: false,
            code_mem: [0; CODE_MEM_LEN],
        }
    }

    /// Handle a write to the $8000 control register.
    ///
    /// Bit 0 set: load the three slots from `code_mem` (bits 1-3 pick
    /// compare vs. unconditional per slot, bits 4-6 disable a slot). Bit 0
    /// clear: disengage, leaving the slots as last loaded so they start
    /// patching PRG reads.
    fn apply_control(&mut self, val: u8) {
        self.engaged = val & 0x01 != 0;
        if !self.engaged {
            return;
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let base = 1 + i * 4;
            let hi = self.code_mem[base];
            let lo = self.code_mem[base + 1];
            let cmp = self.code_mem[base + 2];
            let repl = self.code_mem[base + 3];

            slot.address = 0x8000 | (u16::from(hi) << 8) | u16::from(lo);
            slot.compare = if val & (0x02 << i) != 0 { Some(cmp) } else { None };
            slot.replace = repl;
            slot.enabled = val & (0x10 << i) == 0;
        }
    }

    fn patched_prg(&self, addr: u16, value: u8) -> u8 {
        for slot in &self.slots {
            if slot.enabled && slot.address == addr {
                return match slot.compare {
                    Some(cmp) if cmp == value => slot.replace,
                    Some(_) => value,
                    None => slot.replace,
                };
            }
        }
        value
    }
}

impl Mapper for GameGenie {
    fn read_prg(&self, addr: u16) -> u8 {
        let value = self.inner.read_prg(addr);
        if !self.engaged && (0x8000..=0xFFFF).contains(&addr) {
            self.patched_prg(addr, value)
        } else {
            value
        }
    }

    fn write_prg(&mut self, addr: u16, val: u8) {
        if (0x8000..=0x800C).contains(&addr) {
            self.code_mem[(addr - 0x8000) as usize] = val;
        }
        if addr == 0x8000 {
            self.apply_control(val);
        }
        self.inner.write_prg(addr, val);
    }

    fn read_chr(&self, addr: u16) -> u8 {
        self.inner.read_chr(addr)
    }

    fn write_chr(&mut self, addr: u16, val: u8) {
        self.inner.write_chr(addr, val);
    }

    fn mirroring(&self) -> Mirroring {
        self.inner.mirroring()
    }

    fn irq_pending(&self) -> bool {
        self.inner.irq_pending()
    }

    fn irq_acknowledge(&mut self) {
        self.inner.irq_acknowledge();
    }

    fn clock(&mut self, cycles: u8) {
        self.inner.clock(cycles);
    }

    fn scanline(&mut self) {
        self.inner.scanline();
    }

    fn ppu_a12_rising(&mut self) {
        self.inner.ppu_a12_rising();
    }

    fn mapper_number(&self) -> u16 {
        self.inner.mapper_number()
    }

    fn mapper_name(&self) -> &'static str {
        self.inner.mapper_name()
    }

    fn has_battery(&self) -> bool {
        self.inner.has_battery()
    }

    fn battery_ram(&self) -> Option<&[u8]> {
        self.inner.battery_ram()
    }

    fn set_battery_ram(&mut self, data: &[u8]) {
        self.inner.set_battery_ram(data);
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.engaged = false;
    }
}
