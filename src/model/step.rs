use super::field::Field;

/// Number of input steps in the registration wizard.
pub const STEP_COUNT: u8 = 5;

/// One page of the wizard and the fields it validates before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub ordinal: u8,
    pub label: &'static str,
    pub fields: &'static [Field],
}

/// The wizard steps in order; `STEPS[n - 1]` is step `n`.
pub static STEPS: &[StepDefinition] = &[
    StepDefinition {
        ordinal: 1,
        label: "Data Calon Santri",
        fields: &[
            Field::FullName,
            Field::Gender,
            Field::PlaceOfBirth,
            Field::DateOfBirth,
            Field::Phone,
        ],
    },
    StepDefinition {
        ordinal: 2,
        label: "Alamat",
        fields: &[
            Field::Address,
            Field::City,
            Field::Province,
            Field::PostalCode,
        ],
    },
    StepDefinition {
        ordinal: 3,
        label: "Data Orang Tua / Wali",
        fields: &[
            Field::FatherName,
            Field::MotherName,
            Field::ParentPhone,
            Field::ParentOccupation,
        ],
    },
    StepDefinition {
        ordinal: 4,
        label: "Pendidikan & Program",
        fields: &[
            Field::PreviousSchool,
            Field::LastEducation,
            Field::Program,
            Field::Boarding,
            Field::Notes,
        ],
    },
    StepDefinition {
        ordinal: 5,
        label: "Konfirmasi",
        fields: &[Field::AgreeTerms],
    },
];

/// Returns the definition for step `ordinal` (1-based).
pub fn step(ordinal: u8) -> Option<&'static StepDefinition> {
    STEPS.get(usize::from(ordinal).checked_sub(1)?)
}

/// Returns the step that owns a field.
pub fn owning_step(field: Field) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|s| s.fields.contains(&field))
}
