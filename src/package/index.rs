use binrw::binrw;

use super::header::PackageHeader;

/// One resource entry of a package index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TgiRecord {
    pub type_id: u32,
    pub group_id: u32,
    pub instance_id: u32,
    pub instance_hi: Option<u32>, // 2.x archives carry 64-bit instances
    pub offset: u64,
    pub size: u32,
}

impl TgiRecord {
    pub fn new(type_id: u32, group_id: u32, instance_id: u32) -> Self {
        Self { type_id, group_id, instance_id, instance_hi: None, offset: 0, size: 0 }
    }

    /// Full instance ID, combining the high word when present.
    pub fn instance(&self) -> u64 {
        ((self.instance_hi.unwrap_or(0) as u64) << 32) | self.instance_id as u64
    }
}

/// Entry encoding used by an index table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLayout {
    /// DBPF 1.0 / index 7.0-7.1: type, group, instance, offset, size.
    Classic,
    /// DBPF 1.1 / index 7.2: a reserved word after the instance is skipped.
    Extended,
    /// DBPF 2.x: flags word with optional constant fields, 32-byte entries.
    Flagged,
}

impl IndexLayout {
    pub fn detect(header: &PackageHeader) -> Option<Self> {
        match (header.major, header.index_major, header.index_minor) {
            (1, 7, 0 | 1) => Some(IndexLayout::Classic),
            (1, 7, 2) => Some(IndexLayout::Extended),
            (2, _, _) => Some(IndexLayout::Flagged),
            _ => None,
        }
    }

    /// Bytes per entry for the fixed layouts.
    pub fn entry_size(&self) -> Option<u64> {
        match self {
            IndexLayout::Classic => Some(20),
            IndexLayout::Extended => Some(24),
            IndexLayout::Flagged => None,
        }
    }
}

#[binrw]
#[derive(Debug, Clone, Copy)]
#[br(little)]
#[bw(little)]
pub struct ClassicEntry {
    pub type_id: u32,
    pub group_id: u32,
    pub instance_id: u32,
    pub offset: u32,
    pub size: u32,
}

#[binrw]
#[derive(Debug, Clone, Copy)]
#[br(little)]
#[bw(little)]
pub struct ExtendedEntry {
    pub type_id: u32,
    pub group_id: u32,
    #[brw(pad_after = 4)]
    pub instance_id: u32,
    pub offset: u32,
    pub size: u32,
}

impl From<ClassicEntry> for TgiRecord {
    fn from(e: ClassicEntry) -> Self {
        TgiRecord {
            type_id: e.type_id,
            group_id: e.group_id,
            instance_id: e.instance_id,
            instance_hi: None,
            offset: e.offset as u64,
            size: e.size,
        }
    }
}

impl From<ExtendedEntry> for TgiRecord {
    fn from(e: ExtendedEntry) -> Self {
        TgiRecord {
            type_id: e.type_id,
            group_id: e.group_id,
            instance_id: e.instance_id,
            instance_hi: None,
            offset: e.offset as u64,
            size: e.size,
        }
    }
}

/// Constant-field bits of a 2.x index flags word.
pub mod flags {
    pub const CONSTANT_TYPE: u32 = 0x01;
    pub const CONSTANT_GROUP: u32 = 0x02;
    pub const CONSTANT_INSTANCE_HI: u32 = 0x04;
}

/// Expected byte length of a 2.x index with `count` entries.
pub fn flagged_index_size(index_flags: u32, count: u32) -> u64 {
    let constants = (index_flags & 0x07).count_ones() as u64;
    4 + constants * 4 + count as u64 * (32 - constants * 4)
}
