use std::io::{self, Write};

use crate::label::DiskLabel;
use crate::layout::mbr::{Mbr, PartitionEntry};
use crate::ptype;

const RULE: &str = "-----------------------------------";

pub fn write_label(out: &mut impl Write, label: DiskLabel) -> io::Result<()> {
    writeln!(out, "Disklabel type: {label}")
}

pub fn write_disk_id(out: &mut impl Write, disk_id: u32) -> io::Result<()> {
    writeln!(out, "Disk identifier: 0x{disk_id:08x}")
}

/// Prints the occupied slots only.
pub fn write_table(out: &mut impl Write, mbr: &Mbr, geometry: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Partition Table ---")?;
    for (no, ent) in mbr.partitions() {
        write_partition(out, no, ent, geometry)?;
    }
    Ok(())
}

fn write_partition(
    out: &mut impl Write,
    no: usize,
    ent: &PartitionEntry,
    geometry: bool,
) -> io::Result<()> {
    let status = if ent.is_active() {
        "Active (bootable)"
    } else {
        "Inactive"
    };
    writeln!(out, "Partition {no}:")?;
    writeln!(out, "  Boot status: {status}")?;
    writeln!(
        out,
        "  Partition type: {} (0x{:02X})",
        ptype::label_for(ent.partition_type),
        ent.partition_type
    )?;
    writeln!(out, "  Start (LBA): {}", ent.start_lba)?;
    writeln!(out, "  End (LBA): {}", ent.end_lba())?;
    writeln!(out, "  Sectors: {}", ent.sectors_count)?;
    writeln!(out, "  Size: {} MB", ent.size_mb())?;
    if geometry {
        writeln!(out, "  Start CHS: {}", ent.start_chs())?;
        writeln!(out, "  End CHS: {}", ent.end_chs())?;
    }
    writeln!(out, "{RULE}")
}
