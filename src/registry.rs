//! The in-memory registry of hospital entities.
//!
//! The [`Registry`] owns every store (departments with their wards, doctors,
//! and patients) and exposes every operation the interactive shell
//! drives. It is an explicit context object: constructed once, passed to
//! each operation, no global state.
//!
//! Entities reference each other by typed identifier rather than by
//! ownership. The registry is the only place those references are created,
//! and it validates each one against the owning store before mutating
//! anything, so a stored reference is valid at the moment it is recorded.
//! Nothing is ever deleted, so references cannot dangle afterwards.
//!
//! Stores are ordered maps keyed by identifier. Identifiers are issued
//! monotonically, so iteration order is insertion order and lookups stay
//! `O(log n)`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use nonempty::NonEmpty;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Doctor, NewDoctor,
    department::{Department, Ward, WardNumber},
    id::{DepartmentId, DoctorId, IdSequence, PatientId},
    patient::{Admission, Analysis, Patient},
    person::{BirthYear, BirthYearError},
};

/// Errors raised by registry operations.
///
/// Every variant is recoverable: the operation that raised it made no
/// partial mutation, and the caller may retry with corrected input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A birth year fell outside the accepted range.
    #[error(transparent)]
    BirthYearOutOfRange(#[from] BirthYearError),

    /// The same ward number was given more than once for a new department.
    /// Ward numbers are unique within a department.
    #[error("ward {0} is listed more than once for the new department")]
    DuplicateWardNumber(WardNumber),

    /// No department with the given identifier exists.
    #[error("department {0} not found")]
    DepartmentNotFound(DepartmentId),

    /// The department exists but has no ward with the given number.
    #[error("ward {ward} not found in department {department}")]
    WardNotFound {
        /// The department that was searched.
        department: DepartmentId,
        /// The ward number that was not found.
        ward: WardNumber,
    },

    /// No doctor with the given identifier exists.
    #[error("doctor {0} not found")]
    DoctorNotFound(DoctorId),

    /// No patient with the given identifier exists.
    #[error("patient {0} not found")]
    PatientNotFound(PatientId),

    /// The doctor is already assigned to the ward. Neither side of the link
    /// was changed.
    #[error("doctor {doctor} is already assigned to ward {ward}")]
    AlreadyAssigned {
        /// The doctor whose assignment was requested.
        doctor: DoctorId,
        /// The ward the doctor is already assigned to.
        ward: WardNumber,
    },

    /// The patient already has a discharge date. The stored date is
    /// unchanged.
    #[error("patient {patient} was already discharged on {on}")]
    AlreadyDischarged {
        /// The patient whose discharge was requested.
        patient: PatientId,
        /// The discharge date already on record.
        on: NaiveDate,
    },
}

/// The registry of departments, doctors, and patients.
///
/// Single-threaded by design: every operation takes `&self` or `&mut self`
/// and runs to completion before the next one. A caller exposing this as a
/// shared service must add its own serialization.
#[derive(Debug, Default)]
pub struct Registry {
    departments: BTreeMap<DepartmentId, Department>,
    doctors: BTreeMap<DoctorId, Doctor>,
    patients: BTreeMap<PatientId, Patient>,

    department_ids: IdSequence<DepartmentId>,
    doctor_ids: IdSequence<DoctorId>,
    patient_ids: IdSequence<PatientId>,
}

impl Registry {
    /// Creates an empty registry. Identifier sequences for every kind start
    /// at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a department owning one ward per given number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateWardNumber`] if the same number appears
    /// more than once; the department is not created.
    #[instrument(skip(self, name, wards))]
    pub fn create_department(
        &mut self,
        name: String,
        wards: NonEmpty<WardNumber>,
    ) -> Result<&Department, Error> {
        if let Some(duplicate) = duplicate_ward_number(&wards) {
            return Err(Error::DuplicateWardNumber(duplicate));
        }

        let id = self.department_ids.next_id();
        let wards = wards.into_iter().map(Ward::new).collect();
        tracing::debug!(%id, "registered department");
        Ok(self
            .departments
            .entry(id)
            .or_insert_with(|| Department::new(id, name, wards)))
    }

    /// Looks up a department by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepartmentNotFound`] if no such department exists.
    pub fn department(&self, id: DepartmentId) -> Result<&Department, Error> {
        self.departments
            .get(&id)
            .ok_or(Error::DepartmentNotFound(id))
    }

    /// Looks up a ward by department identifier and ward number.
    ///
    /// A two-stage lookup: the department first, then the ward within it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepartmentNotFound`] or [`Error::WardNotFound`].
    pub fn ward(&self, department: DepartmentId, number: WardNumber) -> Result<&Ward, Error> {
        self.department(department)?
            .ward(number)
            .ok_or(Error::WardNotFound {
                department,
                ward: number,
            })
    }

    /// All departments, in creation order.
    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    /// Registers a doctor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BirthYearOutOfRange`] if the birth year is
    /// implausible; the doctor is not registered.
    #[instrument(skip(self, doctor))]
    pub fn create_doctor(&mut self, doctor: NewDoctor) -> Result<&Doctor, Error> {
        let birth_year = BirthYear::try_from(doctor.birth_year)?;

        let id = self.doctor_ids.next_id();
        tracing::debug!(%id, "registered doctor");
        Ok(self.doctors.entry(id).or_insert_with(|| {
            Doctor::new(id, doctor.name, birth_year, doctor.position, doctor.phone)
        }))
    }

    /// Looks up a doctor by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoctorNotFound`] if no such doctor exists.
    pub fn doctor(&self, id: DoctorId) -> Result<&Doctor, Error> {
        self.doctors.get(&id).ok_or(Error::DoctorNotFound(id))
    }

    /// All doctors, in registration order.
    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values()
    }

    /// Assigns a doctor to a ward.
    ///
    /// The doctor↔ward link is bidirectional: the ward's doctor list and
    /// the doctor's ward list are appended together, within this one call.
    /// There is no API that can update one side without the other, and no
    /// unassign operation exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoctorNotFound`], [`Error::DepartmentNotFound`] or
    /// [`Error::WardNotFound`] when a reference fails to resolve, and
    /// [`Error::AlreadyAssigned`] when the link already exists. In every
    /// error case neither side is changed.
    #[instrument(skip(self))]
    pub fn assign_doctor(
        &mut self,
        doctor: DoctorId,
        department: DepartmentId,
        ward: WardNumber,
    ) -> Result<(), Error> {
        let doctor_record = self
            .doctors
            .get_mut(&doctor)
            .ok_or(Error::DoctorNotFound(doctor))?;
        let ward_record = self
            .departments
            .get_mut(&department)
            .ok_or(Error::DepartmentNotFound(department))?
            .ward_mut(ward)
            .ok_or(Error::WardNotFound { department, ward })?;

        if ward_record.has_doctor(doctor) {
            return Err(Error::AlreadyAssigned { doctor, ward });
        }

        // Both sides of the link move together.
        ward_record.assign(doctor);
        doctor_record.add_ward(ward);
        tracing::debug!(%doctor, %department, %ward, "assigned doctor to ward");
        Ok(())
    }

    /// Admits a patient.
    ///
    /// Admission is all-or-nothing: the birth year is validated and the
    /// department, ward, and doctor references are resolved, in that order,
    /// before anything is stored. The patient identifier is allocated only
    /// once every check has passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BirthYearOutOfRange`], [`Error::DepartmentNotFound`],
    /// [`Error::WardNotFound`] or [`Error::DoctorNotFound`]; no patient
    /// record is created on failure.
    #[instrument(skip(self, admission))]
    pub fn admit_patient(&mut self, admission: Admission) -> Result<&Patient, Error> {
        let Admission {
            name,
            birth_year,
            diagnosis,
            date,
            placement,
        } = admission;

        let birth_year = BirthYear::try_from(birth_year)?;
        self.ward(placement.department, placement.ward)?;
        if !self.doctors.contains_key(&placement.doctor) {
            return Err(Error::DoctorNotFound(placement.doctor));
        }

        let id = self.patient_ids.next_id();
        tracing::debug!(%id, "admitted patient");
        Ok(self.patients.entry(id).or_insert_with(|| {
            Patient::new(id, name, birth_year, diagnosis, date, placement)
        }))
    }

    /// Looks up a patient by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatientNotFound`] if no such patient exists.
    pub fn patient(&self, id: PatientId) -> Result<&Patient, Error> {
        self.patients.get(&id).ok_or(Error::PatientNotFound(id))
    }

    /// All patients, in admission order.
    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    /// Appends an analysis to a patient's record.
    ///
    /// Discharge state is not checked: a discharged patient may still
    /// receive a retrospective analysis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatientNotFound`] if no such patient exists.
    #[instrument(skip(self, name, result))]
    pub fn add_analysis(
        &mut self,
        patient: PatientId,
        name: String,
        result: String,
        date: NaiveDate,
    ) -> Result<(), Error> {
        let record = self
            .patients
            .get_mut(&patient)
            .ok_or(Error::PatientNotFound(patient))?;
        record.record_analysis(Analysis::new(name, result, date));
        tracing::debug!(%patient, "recorded analysis");
        Ok(())
    }

    /// Discharges a patient: a one-way, terminal transition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatientNotFound`] if no such patient exists, or
    /// [`Error::AlreadyDischarged`] (carrying the date already on record)
    /// if the patient was discharged before; the stored date is never
    /// overwritten.
    #[instrument(skip(self))]
    pub fn discharge_patient(&mut self, patient: PatientId, date: NaiveDate) -> Result<(), Error> {
        let record = self
            .patients
            .get_mut(&patient)
            .ok_or(Error::PatientNotFound(patient))?;

        if let Some(on) = record.discharged() {
            return Err(Error::AlreadyDischarged { patient, on });
        }

        record.set_discharged(date);
        tracing::debug!(%patient, %date, "discharged patient");
        Ok(())
    }
}

fn duplicate_ward_number(numbers: &NonEmpty<WardNumber>) -> Option<WardNumber> {
    let mut seen = BTreeSet::new();
    numbers.iter().find(|number| !seen.insert(**number)).copied()
}

#[cfg(test)]
mod tests {
    use nonempty::nonempty;

    use super::*;
    use crate::domain::{patient::Placement, person::PersonName};

    fn ward(number: u32) -> WardNumber {
        WardNumber::new(number).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn name(surname: &str) -> PersonName {
        PersonName::new(surname.to_string(), "Ivan".to_string(), String::new())
    }

    fn new_doctor(surname: &str) -> NewDoctor {
        NewDoctor {
            name: name(surname),
            birth_year: 1975,
            position: "cardiologist".to_string(),
            phone: "555-0101".to_string(),
        }
    }

    fn admission(department: DepartmentId, ward: WardNumber, doctor: DoctorId) -> Admission {
        Admission {
            name: name("Petrov"),
            birth_year: 1990,
            diagnosis: "angina".to_string(),
            date: date("2024-01-05"),
            placement: Placement {
                department,
                ward,
                doctor,
            },
        }
    }

    /// Registry with one department (wards 101, 102) and one doctor.
    fn cardiology() -> (Registry, DepartmentId, DoctorId) {
        let mut registry = Registry::new();
        let department = registry
            .create_department("Cardiology".to_string(), nonempty![ward(101), ward(102)])
            .unwrap()
            .id();
        let doctor = registry.create_doctor(new_doctor("Ivanov")).unwrap().id();
        (registry, department, doctor)
    }

    #[test]
    fn identifiers_increase_independently_per_kind() {
        let mut registry = Registry::new();

        let first_department = registry
            .create_department("Cardiology".to_string(), nonempty![ward(101)])
            .unwrap()
            .id();
        let second_department = registry
            .create_department("Neurology".to_string(), nonempty![ward(201)])
            .unwrap()
            .id();
        let first_doctor = registry.create_doctor(new_doctor("Ivanov")).unwrap().id();

        assert_eq!(first_department.get(), 1);
        assert_eq!(second_department.get(), 2);
        assert_eq!(first_doctor.get(), 1);
    }

    #[test]
    fn create_department_rejects_duplicate_ward_numbers() {
        let mut registry = Registry::new();

        let err = registry
            .create_department(
                "Cardiology".to_string(),
                nonempty![ward(101), ward(102), ward(101)],
            )
            .unwrap_err();

        assert_eq!(err, Error::DuplicateWardNumber(ward(101)));
        assert_eq!(registry.departments().count(), 0);
    }

    #[test]
    fn ward_lookup_resolves_department_first() {
        let (registry, department, _) = cardiology();

        assert_eq!(
            registry.ward(department, ward(102)).unwrap().number(),
            ward(102)
        );

        let missing_department = "99".parse().unwrap();
        assert_eq!(
            registry.ward(missing_department, ward(101)).unwrap_err(),
            Error::DepartmentNotFound(missing_department)
        );
        assert_eq!(
            registry.ward(department, ward(999)).unwrap_err(),
            Error::WardNotFound {
                department,
                ward: ward(999)
            }
        );
    }

    #[test]
    fn create_doctor_rejects_implausible_birth_year() {
        let mut registry = Registry::new();

        let mut doctor = new_doctor("Ivanov");
        doctor.birth_year = 1900;

        assert!(matches!(
            registry.create_doctor(doctor),
            Err(Error::BirthYearOutOfRange(_))
        ));
        assert_eq!(registry.doctors().count(), 0);
    }

    #[test]
    fn assignment_updates_both_sides_together() {
        let (mut registry, department, doctor) = cardiology();

        registry.assign_doctor(doctor, department, ward(101)).unwrap();
        registry.assign_doctor(doctor, department, ward(102)).unwrap();

        for number in [ward(101), ward(102)] {
            let ward_record = registry.ward(department, number).unwrap();
            assert!(ward_record.has_doctor(doctor));
            assert!(registry.doctor(doctor).unwrap().wards().contains(&number));
        }
    }

    #[test]
    fn repeated_assignment_is_rejected_and_changes_nothing() {
        let (mut registry, department, doctor) = cardiology();

        registry.assign_doctor(doctor, department, ward(101)).unwrap();
        let err = registry
            .assign_doctor(doctor, department, ward(101))
            .unwrap_err();

        assert_eq!(
            err,
            Error::AlreadyAssigned {
                doctor,
                ward: ward(101)
            }
        );
        assert_eq!(
            registry.ward(department, ward(101)).unwrap().doctors(),
            [doctor]
        );
        assert_eq!(registry.doctor(doctor).unwrap().wards(), [ward(101)]);
    }

    #[test]
    fn assignment_resolves_doctor_then_department_then_ward() {
        let (mut registry, department, doctor) = cardiology();
        let missing_doctor = "99".parse().unwrap();
        let missing_department = "99".parse().unwrap();

        assert_eq!(
            registry
                .assign_doctor(missing_doctor, department, ward(101))
                .unwrap_err(),
            Error::DoctorNotFound(missing_doctor)
        );
        assert_eq!(
            registry
                .assign_doctor(doctor, missing_department, ward(101))
                .unwrap_err(),
            Error::DepartmentNotFound(missing_department)
        );
        assert_eq!(
            registry
                .assign_doctor(doctor, department, ward(999))
                .unwrap_err(),
            Error::WardNotFound {
                department,
                ward: ward(999)
            }
        );

        // No side of the mirror was touched by any failed attempt.
        assert!(registry.doctor(doctor).unwrap().wards().is_empty());
        assert!(registry
            .ward(department, ward(101))
            .unwrap()
            .doctors()
            .is_empty());
    }

    #[test]
    fn admission_stores_the_resolved_placement() {
        let (mut registry, department, doctor) = cardiology();

        let patient = registry
            .admit_patient(admission(department, ward(101), doctor))
            .unwrap();

        assert_eq!(patient.id().get(), 1);
        assert_eq!(
            patient.placement(),
            Placement {
                department,
                ward: ward(101),
                doctor
            }
        );
        assert!(patient.analyses().is_empty());
        assert_eq!(patient.discharged(), None);
    }

    #[test]
    fn failed_admission_creates_no_patient_and_burns_no_id() {
        let (mut registry, department, doctor) = cardiology();
        let missing_department = "99".parse().unwrap();
        let missing_doctor = "99".parse().unwrap();

        assert_eq!(
            registry
                .admit_patient(admission(missing_department, ward(101), doctor))
                .unwrap_err(),
            Error::DepartmentNotFound(missing_department)
        );
        assert_eq!(
            registry
                .admit_patient(admission(department, ward(999), doctor))
                .unwrap_err(),
            Error::WardNotFound {
                department,
                ward: ward(999)
            }
        );
        assert_eq!(
            registry
                .admit_patient(admission(department, ward(101), missing_doctor))
                .unwrap_err(),
            Error::DoctorNotFound(missing_doctor)
        );
        assert_eq!(registry.patients().count(), 0);

        // The first successful admission still receives id 1.
        let patient = registry
            .admit_patient(admission(department, ward(101), doctor))
            .unwrap();
        assert_eq!(patient.id().get(), 1);
    }

    #[test]
    fn admission_rejects_implausible_birth_year() {
        let (mut registry, department, doctor) = cardiology();

        let mut admission = admission(department, ward(101), doctor);
        admission.birth_year = 2026;

        assert!(matches!(
            registry.admit_patient(admission),
            Err(Error::BirthYearOutOfRange(_))
        ));
        assert_eq!(registry.patients().count(), 0);
    }

    #[test]
    fn analyses_append_in_order() {
        let (mut registry, department, doctor) = cardiology();
        let patient = registry
            .admit_patient(admission(department, ward(101), doctor))
            .unwrap()
            .id();

        registry
            .add_analysis(
                patient,
                "CBC".to_string(),
                "Normal".to_string(),
                date("2024-01-10"),
            )
            .unwrap();
        registry
            .add_analysis(
                patient,
                "ECG".to_string(),
                "Sinus rhythm".to_string(),
                date("2024-01-11"),
            )
            .unwrap();

        let names: Vec<_> = registry
            .patient(patient)
            .unwrap()
            .analyses()
            .iter()
            .map(Analysis::name)
            .collect();
        assert_eq!(names, ["CBC", "ECG"]);
    }

    #[test]
    fn analysis_is_accepted_after_discharge() {
        let (mut registry, department, doctor) = cardiology();
        let patient = registry
            .admit_patient(admission(department, ward(101), doctor))
            .unwrap()
            .id();

        registry
            .discharge_patient(patient, date("2024-01-15"))
            .unwrap();
        registry
            .add_analysis(
                patient,
                "Follow-up".to_string(),
                "Clear".to_string(),
                date("2024-01-20"),
            )
            .unwrap();

        assert_eq!(registry.patient(patient).unwrap().analyses().len(), 1);
    }

    #[test]
    fn discharge_is_a_one_way_transition() {
        let (mut registry, department, doctor) = cardiology();
        let patient = registry
            .admit_patient(admission(department, ward(101), doctor))
            .unwrap()
            .id();

        registry
            .discharge_patient(patient, date("2024-01-15"))
            .unwrap();
        let err = registry
            .discharge_patient(patient, date("2024-01-16"))
            .unwrap_err();

        assert_eq!(
            err,
            Error::AlreadyDischarged {
                patient,
                on: date("2024-01-15")
            }
        );
        assert_eq!(
            registry.patient(patient).unwrap().discharged(),
            Some(date("2024-01-15"))
        );
    }

    #[test]
    fn operations_on_unknown_patients_are_rejected() {
        let mut registry = Registry::new();
        let missing = "1".parse().unwrap();

        assert_eq!(
            registry
                .add_analysis(
                    missing,
                    "CBC".to_string(),
                    "Normal".to_string(),
                    date("2024-01-10")
                )
                .unwrap_err(),
            Error::PatientNotFound(missing)
        );
        assert_eq!(
            registry
                .discharge_patient(missing, date("2024-01-15"))
                .unwrap_err(),
            Error::PatientNotFound(missing)
        );
        assert_eq!(
            registry.patient(missing).unwrap_err(),
            Error::PatientNotFound(missing)
        );
    }

    #[test]
    fn listings_preserve_insertion_order() {
        let mut registry = Registry::new();
        for department in ["Cardiology", "Neurology", "Surgery"] {
            registry
                .create_department(department.to_string(), nonempty![ward(101)])
                .unwrap();
        }

        let names: Vec<_> = registry.departments().map(Department::name).collect();
        assert_eq!(names, ["Cardiology", "Neurology", "Surgery"]);
    }

    #[test]
    fn cardiology_admission_lifecycle() {
        let mut registry = Registry::new();

        let department = registry
            .create_department("Cardiology".to_string(), nonempty![ward(101), ward(102)])
            .unwrap()
            .id();
        let doctor = registry.create_doctor(new_doctor("Ivanov")).unwrap().id();
        assert_eq!(department.get(), 1);
        assert_eq!(doctor.get(), 1);

        registry.assign_doctor(doctor, department, ward(101)).unwrap();

        let patient = registry
            .admit_patient(admission(department, ward(101), doctor))
            .unwrap()
            .id();
        assert_eq!(patient.get(), 1);

        registry
            .add_analysis(
                patient,
                "CBC".to_string(),
                "Normal".to_string(),
                date("2024-01-10"),
            )
            .unwrap();
        assert_eq!(registry.patient(patient).unwrap().analyses().len(), 1);

        registry
            .discharge_patient(patient, date("2024-01-15"))
            .unwrap();
        assert_eq!(
            registry
                .discharge_patient(patient, date("2024-01-16"))
                .unwrap_err(),
            Error::AlreadyDischarged {
                patient,
                on: date("2024-01-15")
            }
        );
        assert_eq!(
            registry.patient(patient).unwrap().discharged(),
            Some(date("2024-01-15"))
        );
    }
}
