// References:
// [1] https://en.wikipedia.org/wiki/Partition_type

pub const UNKNOWN: &str = "Unknown";

static LABELS: [(u8, &str); 17] = [
    (0x01, "FAT12"),
    (0x04, "FAT16 <32M"),
    (0x05, "Extended"),
    (0x06, "FAT16"),
    (0x07, "NTFS/exFAT"),
    (0x0B, "FAT32"),
    (0x0C, "FAT32 LBA"),
    (0x0E, "FAT16 LBA"),
    (0x0F, "Extended LBA"),
    (0x82, "Linux swap"),
    (0x83, "Linux"),
    (0x85, "Linux extended"),
    (0x8E, "Linux LVM"),
    (0xA5, "FreeBSD"),
    (0xEE, "GPT protective"),
    (0xEF, "EFI System"),
    (0xFD, "Linux RAID"),
];

pub fn label_for(typ: u8) -> &'static str {
    LABELS
        .iter()
        .find(|&&(code, _)| code == typ)
        .map_or(UNKNOWN, |&(_, label)| label)
}
