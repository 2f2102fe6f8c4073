pub mod header;
pub mod index;

use header::PackageHeader;
use index::{ClassicEntry, ExtendedEntry, IndexLayout, TgiRecord};
use crate::error::{FormatError, Result};
use binrw::BinReaderExt;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// A parsed package index. Payloads are never read.
#[derive(Debug, Clone)]
pub struct Package {
    pub header: PackageHeader,
    pub layout: IndexLayout,
    pub records: Vec<TgiRecord>,
}

impl Package {
    /// Opens and indexes the archive at `path`. The file is closed before
    /// this returns, on success and on failure alike.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read(&mut BufReader::new(file))
    }

    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let mut head = Vec::with_capacity(PackageHeader::SIZE as usize);
        reader.by_ref().take(PackageHeader::SIZE).read_to_end(&mut head)?;

        if head.len() < PackageHeader::MAGIC.len() {
            return Err(if PackageHeader::MAGIC.starts_with(&head) {
                FormatError::Truncated("header")
            } else {
                FormatError::BadMagic
            });
        }
        if &head[..4] != PackageHeader::MAGIC {
            return Err(FormatError::BadMagic);
        }
        if (head.len() as u64) < PackageHeader::SIZE {
            return Err(FormatError::Truncated("header"));
        }

        let header = PackageHeader::read(&mut Cursor::new(&head))
            .map_err(|e| FormatError::from_binrw(e, "header"))?;

        let layout = IndexLayout::detect(&header).ok_or(FormatError::UnsupportedVersion {
            major: header.major,
            minor: header.minor,
            index_major: header.index_major,
            index_minor: header.index_minor,
        })?;
        debug!(
            "DBPF {}.{} index {}.{}: {:?} layout, {} entries",
            header.major, header.minor, header.index_major, header.index_minor, layout, header.index_count
        );

        let index_start = header.index_start();
        let index_size = header.index_size as u64;
        match index_start.checked_add(index_size) {
            Some(end) if end <= stream_len => {}
            _ => return Err(FormatError::Truncated("index table")),
        }

        if let Some(entry_size) = layout.entry_size() {
            let expected = header.index_count as u64 * entry_size;
            if expected != index_size {
                return Err(FormatError::IndexMismatch {
                    entries: header.index_count,
                    declared: index_size,
                    expected,
                });
            }
        }

        reader.seek(SeekFrom::Start(index_start))?;
        // Bounded by the stream length check above.
        let mut table = vec![0u8; index_size as usize];
        reader
            .read_exact(&mut table)
            .map_err(|e| FormatError::from_io(e, "index table"))?;

        let records = decode_index(&table, layout, header.index_count)?;

        Ok(Self { header, layout, records })
    }
}

/// Reads the index of a DBPF stream, in on-disk order.
pub fn read_index<R: Read + Seek>(reader: &mut R) -> Result<Vec<TgiRecord>> {
    Package::read(reader).map(|p| p.records)
}

fn eof(err: binrw::Error) -> FormatError {
    FormatError::from_binrw(err, "index table")
}

fn decode_index(table: &[u8], layout: IndexLayout, count: u32) -> Result<Vec<TgiRecord>> {
    let mut cursor = Cursor::new(table);

    match layout {
        IndexLayout::Classic => (0..count)
            .map(|_| cursor.read_le::<ClassicEntry>().map(TgiRecord::from).map_err(eof))
            .collect(),
        IndexLayout::Extended => (0..count)
            .map(|_| cursor.read_le::<ExtendedEntry>().map(TgiRecord::from).map_err(eof))
            .collect(),
        IndexLayout::Flagged => decode_flagged(&mut cursor, count),
    }
}

fn decode_flagged(cursor: &mut Cursor<&[u8]>, count: u32) -> Result<Vec<TgiRecord>> {
    let declared = cursor.get_ref().len() as u64;
    let index_flags: u32 = cursor.read_le().map_err(eof)?;
    let expected = index::flagged_index_size(index_flags, count);
    if expected != declared {
        return Err(FormatError::IndexMismatch { entries: count, declared, expected });
    }

    let constant_type = read_constant(cursor, index_flags, index::flags::CONSTANT_TYPE)?;
    let constant_group = read_constant(cursor, index_flags, index::flags::CONSTANT_GROUP)?;
    let constant_instance_hi = read_constant(cursor, index_flags, index::flags::CONSTANT_INSTANCE_HI)?;

    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let type_id = match constant_type {
            Some(t) => t,
            None => cursor.read_le().map_err(eof)?,
        };
        let group_id = match constant_group {
            Some(g) => g,
            None => cursor.read_le().map_err(eof)?,
        };
        let instance_hi = match constant_instance_hi {
            Some(ihi) => ihi,
            None => cursor.read_le().map_err(eof)?,
        };
        let instance_id: u32 = cursor.read_le().map_err(eof)?;
        let offset: u32 = cursor.read_le().map_err(eof)?;
        let filesize: u32 = cursor.read_le().map_err(eof)?;
        // memsize, compression and committed describe the payload only
        let _skipped: [u8; 8] = cursor.read_le().map_err(eof)?;

        records.push(TgiRecord {
            type_id,
            group_id,
            instance_id,
            instance_hi: Some(instance_hi),
            offset: offset as u64,
            size: filesize & 0x7FFF_FFFF, // high bit flags compression
        });
    }

    Ok(records)
}

fn read_constant(cursor: &mut Cursor<&[u8]>, index_flags: u32, bit: u32) -> Result<Option<u32>> {
    if index_flags & bit == 0 {
        return Ok(None);
    }
    cursor.read_le::<u32>().map(Some).map_err(eof)
}
