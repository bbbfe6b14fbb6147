//! Patients, their clinical analyses, and the discharge lifecycle.

use chrono::NaiveDate;

use super::{
    department::WardNumber,
    id::{DepartmentId, DoctorId, PatientId},
    person::{BirthYear, PersonName},
};

/// A clinical test record.
///
/// Analyses are immutable: once appended to a patient they are never edited
/// or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    name: String,
    result: String,
    date: NaiveDate,
}

impl Analysis {
    pub(crate) const fn new(name: String, result: String, date: NaiveDate) -> Self {
        Self { name, result, date }
    }

    /// Name of the test, e.g. "CBC".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recorded result.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Date the test was taken.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The foreign-key triple fixed at admission time.
///
/// Each reference was resolved against its store at the moment of admission.
/// Entities are never deleted, so the triple cannot dangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The admitting department.
    pub department: DepartmentId,
    /// The ward within that department.
    pub ward: WardNumber,
    /// The attending doctor.
    pub doctor: DoctorId,
}

/// Intake record for admitting a new patient.
///
/// The registry validates the birth year, resolves the placement references
/// and allocates the identifier; admission is all-or-nothing.
#[derive(Debug, Clone)]
pub struct Admission {
    /// Full name.
    pub name: PersonName,
    /// Raw birth year, validated on admission.
    pub birth_year: i32,
    /// Primary diagnosis.
    pub diagnosis: String,
    /// Date of admission.
    pub date: NaiveDate,
    /// Where, and under whom, the patient is admitted.
    pub placement: Placement,
}

/// An admitted patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: PatientId,
    name: PersonName,
    birth_year: BirthYear,
    diagnosis: String,
    admitted: NaiveDate,
    placement: Placement,
    analyses: Vec<Analysis>,
    discharged: Option<NaiveDate>,
}

impl Patient {
    pub(crate) const fn new(
        id: PatientId,
        name: PersonName,
        birth_year: BirthYear,
        diagnosis: String,
        admitted: NaiveDate,
        placement: Placement,
    ) -> Self {
        Self {
            id,
            name,
            birth_year,
            diagnosis,
            admitted,
            placement,
            analyses: Vec::new(),
            discharged: None,
        }
    }

    /// The patient's unique identifier.
    #[must_use]
    pub const fn id(&self) -> PatientId {
        self.id
    }

    /// The patient's full name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// The patient's birth year.
    #[must_use]
    pub const fn birth_year(&self) -> BirthYear {
        self.birth_year
    }

    /// The primary diagnosis recorded at admission.
    #[must_use]
    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    /// The date of admission.
    #[must_use]
    pub const fn admitted(&self) -> NaiveDate {
        self.admitted
    }

    /// The department/ward/doctor triple fixed at admission.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// The patient's analyses, oldest first.
    #[must_use]
    pub fn analyses(&self) -> &[Analysis] {
        &self.analyses
    }

    /// The discharge date, if the patient has been discharged.
    #[must_use]
    pub const fn discharged(&self) -> Option<NaiveDate> {
        self.discharged
    }

    pub(crate) fn record_analysis(&mut self, analysis: Analysis) {
        self.analyses.push(analysis);
    }

    /// Marks the patient discharged. The caller (the registry) has already
    /// checked that no discharge date is set.
    pub(crate) fn set_discharged(&mut self, date: NaiveDate) {
        debug_assert!(self.discharged.is_none());
        self.discharged = Some(date);
    }
}
