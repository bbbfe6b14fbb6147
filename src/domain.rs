//! Domain model for the hospital registry.
//!
//! This module contains the core entity types (departments, wards, doctors,
//! patients, analyses), the typed identifiers that relate them, and the
//! validated value types used at the intake boundary.

/// Typed entity identifiers and the per-kind allocator.
pub mod id;
pub use id::{DepartmentId, DoctorId, PatientId};

/// Names and validated birth years.
pub mod person;
pub use person::{BirthYear, PersonName};

/// Departments and the wards they own.
pub mod department;
pub use department::{Department, Ward, WardNumber};

mod doctor;
pub use doctor::{Doctor, NewDoctor};

/// Patients, analyses, and the discharge lifecycle.
pub mod patient;
pub use patient::{Admission, Analysis, Patient, Placement};
