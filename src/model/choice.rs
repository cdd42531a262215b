/// One allowed value of an enumerated field.
///
/// `code` is what the form stores; `label` is what the intake receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

impl Choice {
    const fn new(code: &'static str, label: &'static str) -> Self {
        Self { code, label }
    }
}

pub const GENDERS: &[Choice] = &[
    Choice::new("male", "Laki-laki"),
    Choice::new("female", "Perempuan"),
];

pub const EDUCATION_LEVELS: &[Choice] = &[
    Choice::new("sd", "SD/MI"),
    Choice::new("smp", "SMP/MTs"),
    Choice::new("sma", "SMA/MA"),
];

pub const PROGRAMS: &[Choice] = &[
    Choice::new("tahfidz", "Tahfidz Al-Qur'an"),
    Choice::new("kitab", "Kajian Kitab Kuning"),
    Choice::new("reguler", "Reguler"),
];

pub const BOARDING_OPTIONS: &[Choice] = &[
    Choice::new("mukim", "Mukim (asrama)"),
    Choice::new("pulang", "Pulang-pergi"),
];

/// Looks up a choice by its stored code.
pub fn find_choice(choices: &'static [Choice], code: &str) -> Option<&'static Choice> {
    choices.iter().find(|c| c.code == code)
}

/// Returns the code that follows `current` in `choices`, wrapping around.
///
/// An unset or unknown `current` selects the first choice when moving
/// forward and the last one when moving backward.
pub fn cycle_choice(choices: &'static [Choice], current: &str, forward: bool) -> &'static str {
    let Some(last) = choices.len().checked_sub(1) else {
        return "";
    };
    let next = match choices.iter().position(|c| c.code == current) {
        Some(i) if forward => (i + 1) % choices.len(),
        Some(i) => (i + last) % choices.len(),
        None if forward => 0,
        None => last,
    };
    choices[next].code
}
