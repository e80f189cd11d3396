// References:
// [1] https://en.wikipedia.org/wiki/Master_boot_record
// [2] https://en.wikipedia.org/wiki/Cylinder-head-sector

use std::fmt;

use scroll::{ctx::TryFromCtx, Pread, LE};

use crate::device::Sec;
use crate::error::{Error, Result};

pub const DISK_ID_OFF: usize = 440;
pub const TABLE_OFF: usize = 446;
pub const ENTRY_SZ: usize = 16;
pub const ENTRY_CNT: usize = 4;
pub const SIG_OFF: usize = 510;
pub const BOOT_SIG: [u8; 2] = [0x55, 0xAA];

pub const ACTIVE: u8 = 0x80;
pub const UNUSED: u8 = 0x00;

/// Legacy geometry address. Advisory only, nothing here addresses by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chs {
    pub cylinder: u16, // 10 bits
    pub head: u8,
    pub sector: u8, // 6 bits
}

impl Chs {
    /// `sec_cyl` carries the sector in its low 6 bits and cylinder bits 8-9 on top.
    pub fn unpack(head: u8, sec_cyl: u8, cyl_lo: u8) -> Self {
        Chs {
            cylinder: ((sec_cyl & 0xC0) as u16) << 2 | cyl_lo as u16,
            head,
            sector: sec_cyl & 0x3F,
        }
    }
}

impl fmt::Display for Chs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.cylinder, self.head, self.sector)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionEntry {
    pub boot_flag: u8, // 0x80 active, anything else inactive
    pub start_head: u8,
    pub start_sector: u8,
    pub start_cylinder: u16,
    pub partition_type: u8,
    pub end_head: u8,
    pub end_sector: u8,
    pub end_cylinder: u16,
    pub start_lba: u32,
    pub sectors_count: u32,
}

impl<'a> TryFromCtx<'a, scroll::Endian> for PartitionEntry {
    type Error = scroll::Error;
    fn try_from_ctx(
        from: &'a [u8],
        ctx: scroll::Endian,
    ) -> std::result::Result<(Self, usize), Self::Error> {
        let byte = |off: usize| from.pread_with::<u8>(off, ctx);
        let start = Chs::unpack(byte(1)?, byte(2)?, byte(3)?);
        let end = Chs::unpack(byte(5)?, byte(6)?, byte(7)?);
        Ok((
            PartitionEntry {
                boot_flag: byte(0)?,
                start_head: start.head,
                start_sector: start.sector,
                start_cylinder: start.cylinder,
                partition_type: byte(4)?,
                end_head: end.head,
                end_sector: end.sector,
                end_cylinder: end.cylinder,
                start_lba: from.pread_with(8, ctx)?,
                sectors_count: from.pread_with(12, ctx)?,
            },
            ENTRY_SZ,
        ))
    }
}

impl PartitionEntry {
    pub fn is_active(&self) -> bool {
        self.boot_flag == ACTIVE
    }

    pub fn is_used(&self) -> bool {
        self.partition_type != UNUSED
    }

    /// Last sector of the partition. Wraps in 32 bits like the on-disk fields,
    /// so an empty partition ends one sector before it starts.
    pub fn end_lba(&self) -> u32 {
        self.start_lba
            .wrapping_add(self.sectors_count)
            .wrapping_sub(1)
    }

    /// Size in MiB, truncated.
    pub fn size_mb(&self) -> u64 {
        self.sectors_count as u64 * 512 / (1024 * 1024)
    }

    pub fn start_chs(&self) -> Chs {
        Chs {
            cylinder: self.start_cylinder,
            head: self.start_head,
            sector: self.start_sector,
        }
    }

    pub fn end_chs(&self) -> Chs {
        Chs {
            cylinder: self.end_cylinder,
            head: self.end_head,
            sector: self.end_sector,
        }
    }
}

pub fn validate(sec: &Sec) -> Result<()> {
    let sig = [sec[SIG_OFF], sec[SIG_OFF + 1]];
    if sig != BOOT_SIG {
        return Err(Error::InvalidSignature(sig));
    }
    Ok(())
}

pub fn disk_id(sec: &Sec) -> Result<u32> {
    Ok(sec.pread_with(DISK_ID_OFF, LE)?)
}

/// Decodes all four slots, empty ones included.
pub fn decode(sec: &Sec) -> Result<[PartitionEntry; ENTRY_CNT]> {
    let mut entries = [PartitionEntry::default(); ENTRY_CNT];
    for (i, ent) in entries.iter_mut().enumerate() {
        *ent = sec.pread_with(TABLE_OFF + ENTRY_SZ * i, LE)?;
    }
    Ok(entries)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mbr {
    pub disk_id: u32,
    pub entries: [PartitionEntry; ENTRY_CNT],
}

impl Mbr {
    /// Checks the boot signature before anything else is decoded.
    pub fn new(sec: &Sec) -> Result<Self> {
        validate(sec)?;
        Ok(Mbr {
            disk_id: disk_id(sec)?,
            entries: decode(sec)?,
        })
    }

    /// Occupied slots with their 1-based slot number.
    pub fn partitions(&self) -> impl Iterator<Item = (usize, &PartitionEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, ent)| ent.is_used())
            .map(|(i, ent)| (i + 1, ent))
    }
}
