use std::{io::Write, path::Path};

use crate::device::{self, Device, Sec};
use crate::error::Result;
use crate::label::{self, DiskLabel};
use crate::layout::mbr::Mbr;
use crate::report;

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub verbose: bool,
    pub geometry: bool, // also print CHS
}

#[derive(Debug)]
pub struct Scan {
    pub label: DiskLabel,
    pub mbr: Mbr,
}

pub(crate) struct Scanner<D: Device> {
    device: D,
    verbose: bool,
}

impl<D: Device> Scanner<D> {
    pub fn new(device: D, verbose: bool) -> Self {
        Scanner { device, verbose }
    }

    fn trace(&self, msg: std::fmt::Arguments) {
        if self.verbose {
            eprintln!("[scan] {msg}");
        }
    }

    pub fn disk_label(&mut self) -> Result<DiskLabel> {
        let label = label::classify(&mut self.device)?;
        self.trace(format_args!("disk_label: {label}"));
        Ok(label)
    }

    /// Reads sector 0 and gives the device up.
    pub fn boot_sector(mut self) -> Result<Sec> {
        let sec = self.device.read_sec(0)?;
        self.trace(format_args!("boot_sector: read {} bytes", sec.len()));
        Ok(sec)
    }
}

/// Runs the whole pass over `device`, writing the report to `out` as it goes.
///
/// The disklabel line is written before the boot sector is read, so it stays
/// in `out` even when a later step fails.
pub(crate) fn scan<D: Device>(device: D, config: &Config, out: &mut impl Write) -> Result<Scan> {
    let mut scanner = Scanner::new(device, config.verbose);
    let label = scanner.disk_label()?;
    report::write_label(out, label)?;

    let sec = scanner.boot_sector()?;
    let mbr = Mbr::new(&sec)?;
    report::write_disk_id(out, mbr.disk_id)?;
    report::write_table(out, &mbr, config.geometry)?;
    Ok(Scan { label, mbr })
}

pub fn run(path: &Path, config: &Config, out: &mut impl Write) -> Result<Scan> {
    let file = device::open(path)?;
    scan(file, config, out)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::device::SEC_SZ;
    use crate::error::Error;
    use crate::layout::mbr::tests::{put_entry, raw_entry, signed_sector};

    fn image(sec0: &Sec, gpt: bool) -> Vec<u8> {
        let mut data = vec![0u8; SEC_SZ * 2];
        data[..SEC_SZ].copy_from_slice(sec0);
        if gpt {
            data[SEC_SZ..SEC_SZ + 8].copy_from_slice(b"EFI PART");
        }
        data
    }

    fn scan_bytes(data: Vec<u8>, config: &Config) -> (Result<Scan>, String) {
        let mut out = Vec::new();
        let res = scan(Cursor::new(data), config, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_scan_dos() {
        let mut sec = signed_sector();
        sec[440..444].copy_from_slice(&0xcafe_f00du32.to_le_bytes());
        put_entry(&mut sec, 0, raw_entry(0x80, 0x83, 2048, 204800));
        put_entry(&mut sec, 1, raw_entry(0, 0x82, 206848, 8192));

        let (res, text) = scan_bytes(image(&sec, false), &Config::default());
        let scan = res.unwrap();
        assert_eq!(scan.label, DiskLabel::Dos);
        assert_eq!(scan.mbr.disk_id, 0xcafef00d);
        assert_eq!(scan.mbr.partitions().count(), 2);

        assert!(text.starts_with("Disklabel type: dos\nDisk identifier: 0xcafef00d\n"));
        assert!(text.contains("Partition 1:"));
        assert!(text.contains("Partition type: Linux swap (0x82)"));
        assert!(!text.contains("Partition 3:"));
    }

    #[test]
    fn test_scan_gpt_still_checks_signature() {
        let mut sec = signed_sector();
        put_entry(&mut sec, 0, raw_entry(0, 0xEE, 1, u32::MAX));
        let (res, text) = scan_bytes(image(&sec, true), &Config::default());
        assert_eq!(res.unwrap().label, DiskLabel::Gpt);
        assert!(text.contains("Partition type: GPT protective (0xEE)"));

        sec[511] = 0;
        let (res, text) = scan_bytes(image(&sec, true), &Config::default());
        assert!(matches!(res, Err(Error::InvalidSignature([0x55, 0x00]))));
        assert_eq!(text, "Disklabel type: gpt\n");
    }

    #[test]
    fn test_scan_bad_signature_stops_before_table() {
        let mut sec = [0u8; SEC_SZ];
        put_entry(&mut sec, 0, raw_entry(0x80, 0x83, 2048, 204800));
        let (res, text) = scan_bytes(image(&sec, false), &Config::default());
        assert!(matches!(res, Err(Error::InvalidSignature([0, 0]))));
        assert!(!text.contains("Partition"));
        assert!(!text.contains("Disk identifier"));
    }

    #[test]
    fn test_scan_short_source() {
        let (res, text) = scan_bytes(vec![0u8; 100], &Config::default());
        assert!(matches!(
            res,
            Err(Error::ShortRead {
                offset: 512,
                wanted: 8
            })
        ));
        assert!(text.is_empty());
    }

    #[test]
    fn test_scan_no_partitions() {
        let (res, text) = scan_bytes(image(&signed_sector(), false), &Config::default());
        let scan = res.unwrap();
        assert_eq!(scan.mbr.entries.len(), 4);
        assert_eq!(scan.mbr.partitions().count(), 0);
        assert!(text.ends_with("--- Partition Table ---\n"));
    }

    #[test]
    fn test_run_file() {
        let mut sec = signed_sector();
        put_entry(&mut sec, 3, raw_entry(0, 0x0C, 63, 2048 * 300));
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&image(&sec, false)).unwrap();
        tmp.flush().unwrap();

        let config = Config {
            geometry: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        let scan = run(tmp.path(), &config, &mut out).unwrap();
        assert_eq!(scan.mbr.entries[3].size_mb(), 300);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Partition 4:\n"));
        assert!(text.contains("  Size: 300 MB\n"));
        assert!(text.contains("  Start CHS: 0/0/0\n"));
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let res = run(&dir.path().join("nope.img"), &Config::default(), &mut out);
        assert!(matches!(res, Err(Error::Open { .. })));
        assert!(out.is_empty());
    }
}
