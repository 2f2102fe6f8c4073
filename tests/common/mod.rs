#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use dbpf_grep::PackageHeader;
use std::io::{Cursor, Seek, SeekFrom, Write};

pub const EXEMPLAR: u32 = 0x6534284A;
pub const S3D: u32 = 0x5AD0E817;
pub const FSH: u32 = 0x7AB50E44;
pub const LTEXT: u32 = 0x2026960B;

/// Builds in-memory DBPF archives. Every entry gets a small dummy payload
/// between the header and the index, and the index is written last.
pub struct ArchiveBuilder {
    major: u32,
    index_minor: u32,
    index_flags: u32,
    entries: Vec<(u32, u32, u64)>,
}

impl ArchiveBuilder {
    /// DBPF 1.0, index 7.0 (SimCity 4).
    pub fn classic() -> Self {
        Self { major: 1, index_minor: 0, index_flags: 0, entries: Vec::new() }
    }

    /// DBPF 1.1, index 7.2.
    pub fn extended() -> Self {
        Self { major: 1, index_minor: 2, index_flags: 0, entries: Vec::new() }
    }

    /// DBPF 2.1 with the given index flags.
    pub fn flagged(index_flags: u32) -> Self {
        Self { major: 2, index_minor: 0, index_flags, entries: Vec::new() }
    }

    pub fn entry(mut self, type_id: u32, group_id: u32, instance: u64) -> Self {
        self.entries.push((type_id, group_id, instance));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();
        let mut cursor = Cursor::new(&mut data);
        cursor.seek(SeekFrom::Start(PackageHeader::SIZE)).unwrap();

        let mut locations = Vec::new();
        for (i, _) in self.entries.iter().enumerate() {
            let offset = cursor.position() as u32;
            cursor.write_all(&[i as u8; 8]).unwrap();
            locations.push((offset, 8u32));
        }

        let index_start = cursor.position();
        if self.major == 2 {
            self.write_flagged_index(&mut cursor, &locations);
        } else {
            for ((t, g, i), (offset, size)) in self.entries.iter().zip(&locations) {
                cursor.write_u32::<LittleEndian>(*t).unwrap();
                cursor.write_u32::<LittleEndian>(*g).unwrap();
                cursor.write_u32::<LittleEndian>(*i as u32).unwrap();
                if self.index_minor == 2 {
                    cursor.write_u32::<LittleEndian>(0xDEADBEEF).unwrap();
                }
                cursor.write_u32::<LittleEndian>(*offset).unwrap();
                cursor.write_u32::<LittleEndian>(*size).unwrap();
            }
        }
        let index_size = (cursor.position() - index_start) as u32;

        let mut header = PackageHeader {
            magic: *b"DBPF",
            major: self.major,
            minor: if self.major == 2 { 1 } else { 0 },
            index_major: if self.major == 2 { 0 } else { 7 },
            index_count: self.entries.len() as u32,
            index_size,
            index_minor: self.index_minor,
            ..Default::default()
        };
        if self.major == 2 {
            header.index_position = index_start;
        } else {
            header.index_offset = index_start as u32;
        }
        cursor.seek(SeekFrom::Start(0)).unwrap();
        header.write(&mut cursor).unwrap();

        data
    }

    fn write_flagged_index<W: Write>(&self, out: &mut W, locations: &[(u32, u32)]) {
        let first = self.entries.first().copied().unwrap_or_default();
        out.write_u32::<LittleEndian>(self.index_flags).unwrap();
        if self.index_flags & 0x01 != 0 {
            out.write_u32::<LittleEndian>(first.0).unwrap();
        }
        if self.index_flags & 0x02 != 0 {
            out.write_u32::<LittleEndian>(first.1).unwrap();
        }
        if self.index_flags & 0x04 != 0 {
            out.write_u32::<LittleEndian>((first.2 >> 32) as u32).unwrap();
        }

        for ((t, g, i), (offset, size)) in self.entries.iter().zip(locations) {
            if self.index_flags & 0x01 == 0 {
                out.write_u32::<LittleEndian>(*t).unwrap();
            }
            if self.index_flags & 0x02 == 0 {
                out.write_u32::<LittleEndian>(*g).unwrap();
            }
            if self.index_flags & 0x04 == 0 {
                out.write_u32::<LittleEndian>((*i >> 32) as u32).unwrap();
            }
            out.write_u32::<LittleEndian>(*i as u32).unwrap();
            out.write_u32::<LittleEndian>(*offset).unwrap();
            out.write_u32::<LittleEndian>(*size | 0x8000_0000).unwrap(); // flagged as compressed
            out.write_u32::<LittleEndian>(*size * 2).unwrap(); // memsize
            out.write_u16::<LittleEndian>(0x5A42).unwrap();
            out.write_u16::<LittleEndian>(0x0001).unwrap();
        }
    }
}

/// The two-entry archive used throughout the tests.
pub fn sample_archive() -> Vec<u8> {
    ArchiveBuilder::classic()
        .entry(EXEMPLAR, 0x12345678, 0x00000001)
        .entry(S3D, 0x00000000, 0x00000002)
        .build()
}
