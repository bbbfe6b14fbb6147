//! The interactive menu loop.
//!
//! A thin I/O wrapper: prompts collect and parse input, the registry runs
//! the operation, the outcome is printed. Every domain rule lives in the
//! registry; recoverable registry errors are reported and the menu is shown
//! again.

use chrono::NaiveDate;
use clinica::{
    Admission, BirthYear, DepartmentId, DoctorId, NewDoctor, PatientId, PersonName, Placement,
    Registry, WardNumber,
};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use nonempty::NonEmpty;

use super::{render, terminal::Colorize};

const MENU: &[&str] = &[
    "Add department",
    "List departments",
    "Add doctor",
    "List doctors",
    "Assign doctor to ward",
    "Admit patient",
    "List patients",
    "Add analysis",
    "Discharge patient",
    "Quit",
];

/// Runs the menu loop until the user quits.
pub fn run(registry: &mut Registry) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Hospital registry")
            .items(MENU)
            .default(0)
            .interact()?;

        match choice {
            0 => add_department(registry, &theme)?,
            1 => println!("{}", render::departments(registry)),
            2 => add_doctor(registry, &theme)?,
            3 => println!("{}", render::doctors(registry)),
            4 => assign_doctor(registry, &theme)?,
            5 => admit_patient(registry, &theme)?,
            6 => println!("{}", render::patients(registry)),
            7 => add_analysis(registry, &theme)?,
            8 => discharge_patient(registry, &theme)?,
            _ => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Registry errors are recoverable; print them and return to the menu.
fn report(err: &clinica::Error) {
    println!("{}", err.to_string().warning());
}

fn person_name(theme: &ColorfulTheme, who: &str) -> anyhow::Result<PersonName> {
    let surname = Input::<String>::with_theme(theme)
        .with_prompt(format!("{who} surname"))
        .interact_text()?;
    let given_name = Input::<String>::with_theme(theme)
        .with_prompt(format!("{who} given name"))
        .interact_text()?;
    let patronymic = Input::<String>::with_theme(theme)
        .with_prompt(format!("{who} patronymic"))
        .allow_empty(true)
        .interact_text()?;
    Ok(PersonName::new(surname, given_name, patronymic))
}

fn birth_year(theme: &ColorfulTheme) -> anyhow::Result<i32> {
    Ok(Input::<i32>::with_theme(theme)
        .with_prompt("Birth year")
        .validate_with(|year: &i32| BirthYear::new(*year).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?)
}

fn date(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<NaiveDate> {
    Ok(Input::<NaiveDate>::with_theme(theme)
        .with_prompt(format!("{prompt} (YYYY-MM-DD)"))
        .interact_text()?)
}

fn add_department(registry: &mut Registry, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let name = Input::<String>::with_theme(theme)
        .with_prompt("Department name")
        .interact_text()?;
    let count = Input::<u32>::with_theme(theme)
        .with_prompt("Number of wards")
        .validate_with(|count: &u32| {
            if *count > 0 {
                Ok(())
            } else {
                Err("enter a positive number")
            }
        })
        .interact_text()?;

    let first = Input::<WardNumber>::with_theme(theme)
        .with_prompt("Ward 1 number")
        .interact_text()?;
    let mut wards = NonEmpty::new(first);
    for i in 2..=count {
        let number = Input::<WardNumber>::with_theme(theme)
            .with_prompt(format!("Ward {i} number"))
            .interact_text()?;
        wards.push(number);
    }

    match registry.create_department(name, wards) {
        Ok(department) => println!(
            "{}",
            format!(
                "Department '{}' added with id {}",
                department.name(),
                department.id()
            )
            .success()
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn add_doctor(registry: &mut Registry, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let name = person_name(theme, "Doctor")?;
    let birth_year = birth_year(theme)?;
    let position = Input::<String>::with_theme(theme)
        .with_prompt("Position")
        .interact_text()?;
    let phone = Input::<String>::with_theme(theme)
        .with_prompt("Phone")
        .interact_text()?;

    match registry.create_doctor(NewDoctor {
        name,
        birth_year,
        position,
        phone,
    }) {
        Ok(doctor) => println!(
            "{}",
            format!("Doctor {} added with id {}", doctor.name(), doctor.id()).success()
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn assign_doctor(registry: &mut Registry, theme: &ColorfulTheme) -> anyhow::Result<()> {
    if registry.doctors().next().is_none() || registry.departments().next().is_none() {
        println!("{}", "Add doctors and departments first.".dim());
        return Ok(());
    }

    println!("{}", render::doctors(registry));
    let doctor = Input::<DoctorId>::with_theme(theme)
        .with_prompt("Doctor id")
        .interact_text()?;

    println!("{}", render::departments(registry));
    let department = Input::<DepartmentId>::with_theme(theme)
        .with_prompt("Department id")
        .interact_text()?;
    let ward = Input::<WardNumber>::with_theme(theme)
        .with_prompt("Ward number")
        .interact_text()?;

    match registry.assign_doctor(doctor, department, ward) {
        Ok(()) => println!(
            "{}",
            format!("Doctor {doctor} assigned to ward {ward}").success()
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn admit_patient(registry: &mut Registry, theme: &ColorfulTheme) -> anyhow::Result<()> {
    if registry.departments().next().is_none() || registry.doctors().next().is_none() {
        println!("{}", "Add departments and doctors first.".dim());
        return Ok(());
    }

    let name = person_name(theme, "Patient")?;
    let birth_year = birth_year(theme)?;
    let diagnosis = Input::<String>::with_theme(theme)
        .with_prompt("Primary diagnosis")
        .interact_text()?;
    let admitted = date(theme, "Admission date")?;

    println!("{}", render::departments(registry));
    let department = Input::<DepartmentId>::with_theme(theme)
        .with_prompt("Department id")
        .interact_text()?;
    if let Ok(found) = registry.department(department) {
        let available = found
            .wards()
            .iter()
            .map(|ward| ward.number().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", format!("Available wards: {available}").dim());
    }
    let ward = Input::<WardNumber>::with_theme(theme)
        .with_prompt("Ward number")
        .interact_text()?;

    println!("{}", render::doctors(registry));
    let doctor = Input::<DoctorId>::with_theme(theme)
        .with_prompt("Attending doctor id")
        .interact_text()?;

    match registry.admit_patient(Admission {
        name,
        birth_year,
        diagnosis,
        date: admitted,
        placement: Placement {
            department,
            ward,
            doctor,
        },
    }) {
        Ok(patient) => println!(
            "{}",
            format!("Patient {} admitted with id {}", patient.name(), patient.id()).success()
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn add_analysis(registry: &mut Registry, theme: &ColorfulTheme) -> anyhow::Result<()> {
    if registry.patients().next().is_none() {
        println!("{}", "No registered patients.".dim());
        return Ok(());
    }

    println!("{}", render::patients(registry));
    let patient = Input::<PatientId>::with_theme(theme)
        .with_prompt("Patient id")
        .interact_text()?;
    let name = Input::<String>::with_theme(theme)
        .with_prompt("Analysis name")
        .interact_text()?;
    let result = Input::<String>::with_theme(theme)
        .with_prompt("Result")
        .interact_text()?;
    let taken = date(theme, "Analysis date")?;

    match registry.add_analysis(patient, name, result, taken) {
        Ok(()) => println!(
            "{}",
            format!("Analysis recorded for patient {patient}").success()
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn discharge_patient(registry: &mut Registry, theme: &ColorfulTheme) -> anyhow::Result<()> {
    if registry.patients().next().is_none() {
        println!("{}", "No registered patients.".dim());
        return Ok(());
    }

    println!("{}", render::patients(registry));
    let patient = Input::<PatientId>::with_theme(theme)
        .with_prompt("Patient id")
        .interact_text()?;
    let on = date(theme, "Discharge date")?;

    match registry.discharge_patient(patient, on) {
        Ok(()) => println!(
            "{}",
            format!("Patient {patient} discharged on {on}").success()
        ),
        Err(err) => report(&err),
    }
    Ok(())
}
