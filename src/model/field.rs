use std::fmt;

use serde::{Deserialize, Serialize};

/// A field of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    FullName,
    Gender,
    PlaceOfBirth,
    DateOfBirth,
    Phone,
    Address,
    City,
    Province,
    PostalCode,
    FatherName,
    MotherName,
    ParentPhone,
    ParentOccupation,
    PreviousSchool,
    LastEducation,
    Program,
    Boarding,
    Notes,
    AgreeTerms,
}

static ALL_FIELDS: &[Field] = &[
    Field::FullName,
    Field::Gender,
    Field::PlaceOfBirth,
    Field::DateOfBirth,
    Field::Phone,
    Field::Address,
    Field::City,
    Field::Province,
    Field::PostalCode,
    Field::FatherName,
    Field::MotherName,
    Field::ParentPhone,
    Field::ParentOccupation,
    Field::PreviousSchool,
    Field::LastEducation,
    Field::Program,
    Field::Boarding,
    Field::Notes,
    Field::AgreeTerms,
];

impl Field {
    /// Returns the key used for this field in the intake payload.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Gender => "gender",
            Field::PlaceOfBirth => "placeOfBirth",
            Field::DateOfBirth => "dateOfBirth",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::City => "city",
            Field::Province => "province",
            Field::PostalCode => "postalCode",
            Field::FatherName => "fatherName",
            Field::MotherName => "motherName",
            Field::ParentPhone => "parentPhone",
            Field::ParentOccupation => "parentOccupation",
            Field::PreviousSchool => "previousSchool",
            Field::LastEducation => "lastEducation",
            Field::Program => "program",
            Field::Boarding => "boarding",
            Field::Notes => "notes",
            Field::AgreeTerms => "agreeTerms",
        }
    }

    /// Returns the label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Nama Lengkap",
            Field::Gender => "Jenis Kelamin",
            Field::PlaceOfBirth => "Tempat Lahir",
            Field::DateOfBirth => "Tanggal Lahir (YYYY-MM-DD)",
            Field::Phone => "No. HP / WhatsApp",
            Field::Address => "Alamat Lengkap",
            Field::City => "Kota / Kabupaten",
            Field::Province => "Provinsi",
            Field::PostalCode => "Kode Pos",
            Field::FatherName => "Nama Ayah",
            Field::MotherName => "Nama Ibu",
            Field::ParentPhone => "No. HP Orang Tua",
            Field::ParentOccupation => "Pekerjaan Orang Tua",
            Field::PreviousSchool => "Asal Sekolah",
            Field::LastEducation => "Pendidikan Terakhir",
            Field::Program => "Program",
            Field::Boarding => "Status Tinggal",
            Field::Notes => "Catatan",
            Field::AgreeTerms => "Saya menyetujui syarat dan ketentuan",
        }
    }

    /// Returns every field in form order.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}
