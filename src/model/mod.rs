mod activity;
mod choice;
mod field;
mod form_state;
mod schema;
mod step;
mod user;
mod validation;

pub use activity::{Activity, ActivityDraft, public_activities};
pub use choice::{
    BOARDING_OPTIONS, Choice, EDUCATION_LEVELS, GENDERS, PROGRAMS, cycle_choice, find_choice,
};
pub use field::Field;
pub use form_state::{FieldValue, FormState};
pub use schema::{FieldSpec, Rule, SCHEMA, rule_for};
pub use step::{STEP_COUNT, STEPS, StepDefinition, owning_step, step};
pub use user::{AccessDenied, Role, UserSession, authorize_content};
pub use validation::{ValidationError, normalize_phone, validate_field};
