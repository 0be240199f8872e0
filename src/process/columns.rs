use crate::error::{PipelineError, Result};
use tracing::{debug, warn};

/// The logical fields the pipeline reads from a census file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CensusField {
    RegencyCode,
    RegencyName,
    DistrictCode,
    DistrictName,
    VillageCode,
    VillageName,
    Gender,
    Count,
}

impl CensusField {
    pub const ALL: [CensusField; 8] = [
        CensusField::RegencyCode,
        CensusField::RegencyName,
        CensusField::DistrictCode,
        CensusField::DistrictName,
        CensusField::VillageCode,
        CensusField::VillageName,
        CensusField::Gender,
        CensusField::Count,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CensusField::RegencyCode => "regency code",
            CensusField::RegencyName => "regency name",
            CensusField::DistrictCode => "district code",
            CensusField::DistrictName => "district name",
            CensusField::VillageCode => "village code",
            CensusField::VillageName => "village name",
            CensusField::Gender => "gender",
            CensusField::Count => "population count",
        }
    }

    /// Column position in the published census layout.
    pub fn position(self) -> usize {
        match self {
            CensusField::RegencyCode => 2,
            CensusField::RegencyName => 3,
            CensusField::DistrictCode => 4,
            CensusField::DistrictName => 5,
            CensusField::VillageCode => 6,
            CensusField::VillageName => 7,
            CensusField::Gender => 9,
            CensusField::Count => 10,
        }
    }

    pub fn known_names(self) -> &'static [&'static str] {
        match self {
            CensusField::RegencyCode => &[
                "kemendagri_kode_kabupaten_kota",
                "kode_kabupaten_kota",
                "bps_kode_kabupaten_kota",
            ],
            CensusField::RegencyName => &[
                "kemendagri_nama_kabupaten_kota",
                "nama_kabupaten_kota",
                "bps_nama_kabupaten_kota",
            ],
            CensusField::DistrictCode => &[
                "kemendagri_kode_kecamatan",
                "kode_kecamatan",
                "bps_kode_kecamatan",
            ],
            CensusField::DistrictName => &[
                "kemendagri_nama_kecamatan",
                "nama_kecamatan",
                "bps_nama_kecamatan",
            ],
            CensusField::VillageCode => &[
                "kemendagri_kode_desa",
                "kemendagri_kode_desa_kelurahan",
                "kode_desa",
                "bps_kode_desa_kelurahan",
            ],
            CensusField::VillageName => &[
                "kemendagri_nama_desa",
                "kemendagri_nama_desa_kelurahan",
                "nama_desa",
                "bps_nama_desa_kelurahan",
            ],
            CensusField::Gender => &["jenis_kelamin"],
            CensusField::Count => &[
                "jumlah_penduduk_berdasarkan_jenis_kelamin",
                "jumlah_penduduk",
            ],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Columns in the published census layout, up to the population count.
pub const LAYOUT_WIDTH: usize = 11;

/// Column index for every [`CensusField`], validated against a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 8],
}

impl ColumnMap {
    /// Match each field by a known header name first. Fields left over fall
    /// back to their layout position, but only when the header spans the
    /// whole published layout and no other field already claimed that
    /// column.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let mut resolved: [Option<usize>; 8] = [None; 8];
        for field in CensusField::ALL {
            resolved[field.slot()] = headers.iter().position(|h| {
                field
                    .known_names()
                    .iter()
                    .any(|known| h.eq_ignore_ascii_case(known))
            });
        }

        let missing = |field: CensusField| PipelineError::MissingColumn {
            field: field.label(),
            headers: headers.to_vec(),
        };
        let covers_layout = headers.len() >= LAYOUT_WIDTH;
        for field in CensusField::ALL {
            if resolved[field.slot()].is_some() {
                continue;
            }
            let pos = field.position();
            if !covers_layout || resolved.contains(&Some(pos)) {
                return Err(missing(field));
            }
            warn!(
                field = field.label(),
                position = pos,
                header = %headers[pos],
                "no known header name, using column position"
            );
            resolved[field.slot()] = Some(pos);
        }

        let mut indices = [0usize; 8];
        for field in CensusField::ALL {
            indices[field.slot()] = resolved[field.slot()].ok_or_else(|| missing(field))?;
        }
        debug!(?indices, "resolved census columns");
        Ok(ColumnMap { indices })
    }

    pub fn index(&self, field: CensusField) -> usize {
        self.indices[field.slot()]
    }
}
