//! Plain-text listing renderers for the interactive shell.
//!
//! Pure functions from registry state to display strings, so the shell can
//! print them and the tests can inspect them.

use std::fmt::Write as _;

use clinica::{Registry, Ward};

/// Renders the department listing, ward numbers included.
pub fn departments(registry: &Registry) -> String {
    let mut listing = registry.departments().peekable();
    if listing.peek().is_none() {
        return "No registered departments.".to_string();
    }

    let mut out = String::from("--- Departments ---\n");
    for department in listing {
        let _ = writeln!(out, "id {}  {}", department.id(), department.name());
        let _ = writeln!(out, "    wards: {}", numbers(department.wards()));
    }
    out
}

/// Renders the doctor listing with ward assignments.
pub fn doctors(registry: &Registry) -> String {
    let mut listing = registry.doctors().peekable();
    if listing.peek().is_none() {
        return "No registered doctors.".to_string();
    }

    let mut out = String::from("--- Doctors ---\n");
    for doctor in listing {
        let _ = writeln!(
            out,
            "id {}  {}, {}, tel {}",
            doctor.id(),
            doctor.name(),
            doctor.position(),
            doctor.phone()
        );
        if !doctor.wards().is_empty() {
            let assigned = doctor
                .wards()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "    wards: {assigned}");
        }
    }
    out
}

/// Renders the patient listing with placement, analyses, and discharge
/// state.
pub fn patients(registry: &Registry) -> String {
    let mut listing = registry.patients().peekable();
    if listing.peek().is_none() {
        return "No registered patients.".to_string();
    }

    let mut out = String::from("--- Patients ---\n");
    for patient in listing {
        let _ = writeln!(
            out,
            "id {}  {}, born {}",
            patient.id(),
            patient.name(),
            patient.birth_year()
        );
        let _ = writeln!(
            out,
            "    diagnosis: {}, admitted {}",
            patient.diagnosis(),
            patient.admitted()
        );

        let placement = patient.placement();
        let _ = write!(
            out,
            "    department {}, ward {}, doctor {}",
            placement.department, placement.ward, placement.doctor
        );
        if let Some(date) = patient.discharged() {
            let _ = write!(out, ", discharged {date}");
        }
        out.push('\n');

        if !patient.analyses().is_empty() {
            let _ = writeln!(out, "    analyses:");
            for analysis in patient.analyses() {
                let _ = writeln!(
                    out,
                    "      - {}: {} ({})",
                    analysis.name(),
                    analysis.result(),
                    analysis.date()
                );
            }
        }
    }
    out
}

fn numbers(wards: &[Ward]) -> String {
    wards
        .iter()
        .map(|ward| ward.number().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
