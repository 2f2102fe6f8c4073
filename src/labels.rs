//! Human-readable names for known SimCity 4 resource types.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLabel {
    pub group_id: u32,
    pub name: &'static str,
    /// The group label replaces the type name instead of qualifying it.
    pub standalone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeLabel {
    pub type_id: u32,
    pub name: &'static str,
    pub groups: &'static [GroupLabel],
}

impl TypeLabel {
    pub fn group(&self, group_id: u32) -> Option<&GroupLabel> {
        self.groups.iter().find(|g| g.group_id == group_id)
    }
}

const fn group(group_id: u32, name: &'static str) -> GroupLabel {
    GroupLabel { group_id, name, standalone: false }
}

const EXEMPLAR_GROUPS: &[GroupLabel] = &[
    group(0x2821ED93, "Road"),
    group(0xA92A02EA, "Street"),
    group(0xCBE084CB, "One-Way Road"),
    group(0xCB730FAC, "Avenue"),
    group(0xA8434037, "Highway"),
    group(0xEBE084D1, "Ground Highway"),
    group(0x6BE08658, "Dirtroad"),
    group(0xE8347989, "Rail"),
    group(0x2B79DFFB, "Lightrail"),
    group(0xEBE084C2, "Monorail"),
    group(0x8A15F3F2, "Subway"),
    group(0x088E1962, "Power Pole"),
    group(0x89AC5643, "T21"),
];

const FSH_GROUPS: &[GroupLabel] = &[
    group(0x1ABE787D, "Misc"),
    group(0x0986135E, "Base/Overlay Texture"),
    group(0x2BC2759A, "Shadow Mask"),
    group(0x2A2458F9, "Animation Sprites (Props)"),
    group(0x49A593E7, "Animation Sprites (Non Props)"),
    group(0x891B0E1A, "Terrain/Foundation"),
    group(0x46A006B0, "UI Image"),
];

const COHORT_GROUPS: &[GroupLabel] = &[group(0xB03697D1, "Patch")];
const PATH_GROUPS: &[GroupLabel] = &[group(0x69668828, "2D"), group(0xA966883F, "3D")];

// WAV sounds share the LText type ID
const LTEXT_GROUPS: &[GroupLabel] = &[GroupLabel { group_id: 0xAA4D1933, name: "WAV", standalone: true }];

// S3D models (0x5AD0E817) have no entry and print as bare TGIs.
const STANDARD_LABELS: &[TypeLabel] = &[
    TypeLabel { type_id: 0x7AB50E44, name: "FSH", groups: FSH_GROUPS },
    TypeLabel { type_id: 0xE86B1EEF, name: "Directory", groups: &[] },
    TypeLabel { type_id: 0x05342861, name: "Cohort", groups: COHORT_GROUPS },
    TypeLabel { type_id: 0x6534284A, name: "Exemplar", groups: EXEMPLAR_GROUPS },
    TypeLabel { type_id: 0x296678F7, name: "SC4Path", groups: PATH_GROUPS },
    TypeLabel { type_id: 0x856DDBAC, name: "PNG", groups: &[] },
    TypeLabel { type_id: 0xCA63E2A3, name: "Lua", groups: &[] },
    TypeLabel { type_id: 0x2026960B, name: "LText", groups: LTEXT_GROUPS },
    TypeLabel { type_id: 0x00000000, name: "INI", groups: &[] },
    TypeLabel { type_id: 0x0A5BCF4B, name: "RUL", groups: &[] },
    TypeLabel { type_id: 0xEA5118B0, name: "EffDir", groups: &[] },
];

static STANDARD: TypeNameTable = TypeNameTable { labels: STANDARD_LABELS };

/// Immutable Type ID → label mapping.
#[derive(Debug, Clone, Copy)]
pub struct TypeNameTable {
    labels: &'static [TypeLabel],
}

impl TypeNameTable {
    pub const fn new(labels: &'static [TypeLabel]) -> Self {
        Self { labels }
    }

    /// The built-in SimCity 4 table.
    pub fn standard() -> &'static TypeNameTable {
        &STANDARD
    }

    pub fn lookup(&self, type_id: u32) -> Option<&TypeLabel> {
        self.labels.iter().find(|l| l.type_id == type_id)
    }

    /// Display label for a type/group pair, e.g. `Exemplar` or `Exemplar: Road`.
    pub fn label(&self, type_id: u32, group_id: u32) -> Option<Cow<'static, str>> {
        let label = self.lookup(type_id)?;
        Some(match label.group(group_id) {
            None => Cow::Borrowed(label.name),
            Some(g) if g.standalone => Cow::Borrowed(g.name),
            Some(g) => Cow::Owned(format!("{}: {}", label.name, g.name)),
        })
    }
}
