//! In-memory hospital registry.
//!
//! Departments own wards; doctors and patients refer to them by typed
//! identifier. The [`Registry`] maintains the cross-references, including
//! the bidirectional doctor/ward assignment link, and the patient
//! lifecycle from admission to discharge. State lives for the process
//! lifetime only.

pub mod domain;
pub use domain::{
    Admission, Analysis, BirthYear, Department, DepartmentId, Doctor, DoctorId, NewDoctor,
    Patient, PatientId, PersonName, Placement, Ward, WardNumber,
};

/// The registry and its operations.
pub mod registry;
pub use registry::{Error, Registry};
