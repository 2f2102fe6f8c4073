use binrw::binrw;

#[binrw]
#[derive(Debug, Default, Clone)]
#[br(little)]
#[bw(little)]
pub struct PackageHeader {
    pub magic: [u8; 4],      // "DBPF"
    pub major: u32,          // 1 for SimCity 4, 2 for Sims 3/4
    pub minor: u32,
    pub user_major: u32,
    pub user_minor: u32,
    pub flags: u32,
    pub created: u32,
    pub modified: u32,
    pub index_major: u32,    // Always 7 in 1.x archives
    pub index_count: u32,
    pub index_offset: u32,   // Superseded by index_position in 2.x
    pub index_size: u32,
    pub hole_count: u32,
    pub hole_offset: u32,
    pub hole_size: u32,
    pub index_minor: u32,    // 1.1+ only
    pub index_position: u64, // 2.x only
    pub reserved: [u32; 6],
}

impl PackageHeader {
    pub const SIZE: u64 = 96;
    pub const MAGIC: &'static [u8; 4] = b"DBPF";

    /// Byte offset of the index table. 2.x archives store it at 64 but some
    /// writers leave that zero and fill only the 1.x field.
    pub fn index_start(&self) -> u64 {
        if self.major >= 2 && self.index_position != 0 {
            self.index_position
        } else {
            self.index_offset as u64
        }
    }

    pub fn read<R: std::io::Read + std::io::Seek>(reader: &mut R) -> Result<Self, binrw::Error> {
        use binrw::BinReaderExt;
        reader.read_le()
    }

    pub fn write<W: std::io::Write + std::io::Seek>(&self, writer: &mut W) -> Result<(), binrw::Error> {
        use binrw::BinWriterExt;
        writer.write_le(self)
    }
}
